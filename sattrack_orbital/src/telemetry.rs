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

//! per satellite live telemetry rows for a fleet

use std::fmt;
use chrono::{DateTime,Utc};
use serde::{Deserialize,Serialize};
use tracing::debug;
use crate::{Observer, fleet::Fleet, propagation::Propagator, state::{OrbitalState,StateProvider}};

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct TelemetryRow {
    pub name: String,
    pub visible: bool,
    pub speed_kms: f64,
    pub footprint_m2: f64,
    pub compass: String,
    pub elevation_deg: f64,
    pub azimuth_deg: f64,
    pub range_km: f64,
    pub altitude_km: f64,
    pub orbit_class: String,
    pub latitude_deg: f64,
    pub longitude_deg: f64,
}

impl TelemetryRow {
    pub fn new (name: &str, state: &OrbitalState) -> Self {
        TelemetryRow {
            name: name.to_string(),
            visible: state.is_visible(),
            speed_kms: state.speed_kms(),
            footprint_m2: state.footprint_m2(),
            compass: state.compass().to_string(),
            elevation_deg: state.topocentric.elevation_deg,
            azimuth_deg: state.topocentric.azimuth_deg,
            range_km: state.topocentric.range_km,
            altitude_km: state.sub_point.altitude_km,
            orbit_class: state.orbit_class().to_string(),
            latitude_deg: state.sub_point.latitude_deg,
            longitude_deg: state.sub_point.longitude_deg,
        }
    }
}

impl fmt::Display for TelemetryRow {
    /// single line with footprint in km²
    fn fmt (&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "{:<24} {:<4} {:5.2} km/s  el {:6.1}° az {:5.1}° {:<2} {:8.0} km {:11.0} km²  {:<14} {:8.3},{:9.3}",
            self.name, if self.visible {"LIVE"} else {"OFF"}, self.speed_kms, self.elevation_deg, self.azimuth_deg, self.compass,
            self.altitude_km, self.footprint_m2 / 1.0e6, self.orbit_class, self.latitude_deg, self.longitude_deg)
    }
}

/// a row or the reason why there is none. One failing satellite does not affect the others
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub enum TelemetryEntry {
    Row(TelemetryRow),
    Failed { name: String, reason: String },
}

impl TelemetryEntry {
    pub fn name (&self) -> &str {
        match self {
            TelemetryEntry::Row(row) => &row.name,
            TelemetryEntry::Failed { name, .. } => name,
        }
    }

    pub fn row (&self) -> Option<&TelemetryRow> {
        match self {
            TelemetryEntry::Row(row) => Some(row),
            _ => None
        }
    }
}

/// telemetry for all fleet members at `date`, in fleet order. An empty fleet gives an empty result
pub fn compute_telemetry<P> (provider: &StateProvider<P>, fleet: &Fleet, date: &DateTime<Utc>, observer: &Observer) -> Vec<TelemetryEntry>
    where P: Propagator
{
    fleet.iter().map( |rec| {
        match provider.state_at( rec, date, observer) {
            Ok(state) => TelemetryEntry::Row( TelemetryRow::new( rec.name(), &state)),
            Err(e) => {
                debug!("no state for {}: {}", rec.name(), e);
                TelemetryEntry::Failed { name: rec.name().to_string(), reason: e.to_string() }
            }
        }
    }).collect()
}
