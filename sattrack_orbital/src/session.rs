/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

//! a tracking session owns the acquired catalog and the selected fleet. Both are replaced as one
//! immutable snapshot on refresh, so concurrent telemetry or pass computations never see a mix of
//! old and new data

use std::sync::{Arc,RwLock};
use chrono::{DateTime,Utc};
use tokio::sync::Mutex;
use tracing::info;
use crate::{
    Observer, TrackerConfig,
    errors::{SatTrackError,Result,op_failed},
    tle::Catalog,
    acquisition::{CatalogOrigin,CatalogSource,ElementAcquisition},
    fleet::{Fleet,FleetSelector},
    propagation::Propagator,
    state::StateProvider,
    passes::{PassEvent,PassPredictor},
    telemetry::{TelemetryEntry,compute_telemetry},
};

#[derive(Debug,Clone)]
pub struct TrackerSnapshot {
    pub catalog: Catalog,
    pub fleet: Fleet,
    pub origin: CatalogOrigin,
    pub acquired: DateTime<Utc>,
}

pub struct TrackingSession<S,P> where S: CatalogSource, P: Propagator {
    config: TrackerConfig,
    selector: FleetSelector,
    acquisition: ElementAcquisition<S>,
    provider: StateProvider<P>,

    snapshot: RwLock<Arc<TrackerSnapshot>>,
    refresh_lock: Mutex<()>, // only one acquisition at a time
}

impl<S,P> TrackingSession<S,P> where S: CatalogSource, P: Propagator {

    /// acquire the catalog and select the fleet. This only fails if there are no element sets at all
    pub async fn initialize (config: TrackerConfig, acquisition: ElementAcquisition<S>, propagator: P) -> Result<Self> {
        let selector = FleetSelector::from_config( &config);
        let snapshot = Self::acquire_snapshot( &acquisition, &selector).await?;

        Ok( TrackingSession {
            config,
            selector,
            acquisition,
            provider: StateProvider::new( propagator),
            snapshot: RwLock::new( Arc::new( snapshot)),
            refresh_lock: Mutex::new(()),
        })
    }

    async fn acquire_snapshot (acquisition: &ElementAcquisition<S>, selector: &FleetSelector) -> Result<TrackerSnapshot> {
        let acquired = acquisition.acquire().await?;
        let fleet = selector.select( &acquired.catalog);
        info!("tracking {} of {} satellites ({:?})", fleet.len(), acquired.catalog.len(), acquired.origin);

        Ok( TrackerSnapshot { catalog: acquired.catalog, fleet, origin: acquired.origin, acquired: Utc::now() } )
    }

    pub fn config (&self) -> &TrackerConfig { &self.config }
    pub fn provider (&self) -> &StateProvider<P> { &self.provider }
    pub fn acquisition (&self) -> &ElementAcquisition<S> { &self.acquisition }

    /// the current catalog and fleet. The returned snapshot stays valid across refreshes
    pub fn snapshot (&self) -> Arc<TrackerSnapshot> {
        match self.snapshot.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone()
        }
    }

    /// drop the cache and re-run acquisition and selection. Readers switch to the new snapshot atomically
    pub async fn refresh (&self) -> Result<Arc<TrackerSnapshot>> {
        let _guard = self.refresh_lock.lock().await;

        self.acquisition.clear_cache()?;
        let snapshot = Arc::new( Self::acquire_snapshot( &self.acquisition, &self.selector).await?);

        match self.snapshot.write() {
            Ok(mut guard) => *guard = snapshot.clone(),
            Err(poisoned) => *poisoned.into_inner() = snapshot.clone()
        }
        Ok(snapshot)
    }

    /// telemetry rows of the current fleet
    pub fn telemetry (&self, date: &DateTime<Utc>, observer: &Observer) -> Vec<TelemetryEntry> {
        let snapshot = self.snapshot();
        compute_telemetry( &self.provider, &snapshot.fleet, date, observer)
    }

    /// pass events of fleet member `name` within the configured pass window starting at `start`
    pub fn pass_schedule (&self, name: &str, observer: &Observer, start: &DateTime<Utc>) -> Result<Vec<PassEvent>> {
        let snapshot = self.snapshot();
        let rec = snapshot.fleet.get( name).ok_or_else( || op_failed!("not a tracked satellite: {}", name))?;

        PassPredictor::new( &self.provider, self.config.coarse_step)
            .predict_window( rec, observer, start, self.config.pass_window, self.config.min_elevation_deg)
    }
}
