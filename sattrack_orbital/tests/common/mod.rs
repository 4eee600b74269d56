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

//! test doubles for the catalog source and propagation seams

#![allow(dead_code)]

use std::{path::PathBuf, sync::{Mutex, atomic::{AtomicUsize,Ordering}}};
use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime,Utc};
use reqwest::StatusCode;
use sattrack_common::{cartesian3::Cartesian3, cartographic::Cartographic, datetime::to_unix_secs, net::NetError};
use sattrack_orbital::{
    Observer, errors::{SatTrackError,Result},
    acquisition::{CatalogSource,FALLBACK_TLE_DATA}, propagation::{InertialState,Propagator}, tle::ElementRecord
};

/// a fresh (empty) per test directory
pub fn test_dir (name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join( format!("sattrack_test_{}_{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all( &dir);
    std::fs::create_dir_all( &dir).unwrap();
    dir
}

#[derive(Debug,Clone)]
pub enum MockResponse {
    Text(String),
    Status(u16),
}

/// a catalog source that replays scripted responses (the last one repeats) and counts fetches
pub struct MockSource {
    responses: Mutex<Vec<MockResponse>>,
    calls: AtomicUsize,
}

impl MockSource {
    pub fn new (responses: Vec<MockResponse>) -> Self {
        MockSource { responses: Mutex::new(responses), calls: AtomicUsize::new(0) }
    }

    pub fn serving (text: &str) -> Self { MockSource::new( vec![ MockResponse::Text( text.to_string())]) }
    pub fn failing (status: u16) -> Self { MockSource::new( vec![ MockResponse::Status(status)]) }

    pub fn calls (&self) -> usize { self.calls.load( Ordering::SeqCst) }
}

#[async_trait]
impl CatalogSource for MockSource {
    fn description (&self) -> String { "mock".to_string() }

    async fn fetch (&self) -> Result<Bytes> {
        self.calls.fetch_add( 1, Ordering::SeqCst);

        let response = {
            let mut responses = self.responses.lock().unwrap();
            if responses.len() > 1 { responses.remove(0) } else { responses[0].clone() }
        };

        match response {
            MockResponse::Text(text) => Ok( Bytes::from( text)),
            MockResponse::Status(code) => Err( SatTrackError::NetError( NetError::StatusError( StatusCode::from_u16(code).unwrap())))
        }
    }
}

/// a catalog with more constellation members than the default cap
pub fn catalog_text_with_constellation (n: usize) -> String {
    let mut text = FALLBACK_TLE_DATA.to_string();
    for i in 0..n {
        let cn = 45000 + i;
        text.push_str( &format!("STARLINK-{}\n", 2000 + i));
        text.push_str( &format!("1 {}U 19074B   23335.23456789  .00012345  00000+0  12345-3 0  9993\n", cn));
        text.push_str( &format!("2 {}  53.0547 175.3002 0001234  90.1234 270.1234 15.06399672 12340\n", cn));
    }
    text
}

pub fn record_named (name: &str, catalog_number: u32) -> ElementRecord {
    ElementRecord::new(
        name,
        format!("1 {:05}U 19074B   23335.23456789  .00012345  00000+0  12345-3 0  9993", catalog_number),
        format!("2 {:05}  53.0547 175.3002 0001234  90.1234 270.1234 15.06399672 12340", catalog_number)
    ).unwrap()
}

/// the observer for which [`HumpPropagator`] positions are computed
pub fn equator_observer () -> Observer {
    Observer::new( 0.0, 0.0).unwrap()
}

/// a synthetic propagator whose satellites appear due north of [`equator_observer`] with a periodic
/// elevation profile: a gaussian hump peaking at `peak_deg` in the middle of each period, -30° elsewhere.
/// Positions are earth fixed already
pub struct HumpPropagator {
    pub t0: DateTime<Utc>,
    pub period_secs: f64,
    pub width_secs: f64,
    pub peak_deg: f64,
    pub failing: Vec<String>,
}

impl HumpPropagator {
    pub fn new (t0: DateTime<Utc>) -> Self {
        HumpPropagator { t0, period_secs: 5400.0, width_secs: 600.0, peak_deg: 40.0, failing: Vec::new() }
    }

    pub fn elevation (&self, t: &DateTime<Utc>) -> f64 {
        let dt = (to_unix_secs(t) - to_unix_secs(&self.t0)).rem_euclid( self.period_secs) - self.period_secs / 2.0;
        -30.0 + (self.peak_deg + 30.0) * (-(dt / self.width_secs).powi(2)).exp()
    }
}

impl Propagator for HumpPropagator {
    fn propagate (&self, rec: &ElementRecord, times: &[DateTime<Utc>]) -> Result<Vec<InertialState>> {
        if self.failing.iter().any( |n| n == rec.name()) {
            return Err( SatTrackError::PropagationError( format!("no orbit for {}", rec.name())))
        }

        let origin = Cartesian3::from( &Cartographic::from_degrees( 0.0, 0.0, 0.0));
        let range = 1.0e6;

        Ok( times.iter().map( |t| {
            let el = self.elevation(t).to_radians();
            let position = origin + Cartesian3::new( range * el.sin(), 0.0, range * el.cos());
            InertialState { position, velocity: Cartesian3::new( 0.0, 7500.0, 0.0) }
        }).collect() )
    }

    fn to_earth_fixed (&self, _t: &DateTime<Utc>, p: &Cartesian3) -> Cartesian3 {
        *p
    }
}
