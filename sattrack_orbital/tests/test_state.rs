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

use chrono::{DateTime,Utc};
use sattrack_common::datetime::parse_datetime;
use sattrack_orbital::{
    Observer, errors::Result,
    acquisition::fallback_catalog,
    geometry::OrbitClass,
    propagation::{InertialState, Propagator, Sgp4Propagator},
    state::StateProvider,
    tle::ElementRecord
};

/// SGP4 with the generic earth rotation model instead of satkit's frame transformation
struct GmstSgp4(Sgp4Propagator);

impl Propagator for GmstSgp4 {
    fn propagate (&self, rec: &ElementRecord, times: &[DateTime<Utc>]) -> Result<Vec<InertialState>> {
        self.0.propagate( rec, times)
    }
}

fn record (name: &str) -> ElementRecord {
    fallback_catalog().unwrap().into_iter().find( |r| r.name().starts_with(name)).unwrap()
}

fn cairo () -> Observer {
    Observer::new( 30.0444, 31.2357).unwrap()
}

#[test]
fn test_iss_state() {
    let provider = StateProvider::new( Sgp4Propagator::new());
    let t = parse_datetime("2023-12-01T12:00:00Z").unwrap();

    let state = provider.state_at( &record("ISS"), &t, &cairo()).unwrap();
    println!("{state:?}");

    assert!( state.sub_point.altitude_km > 380.0 && state.sub_point.altitude_km < 460.0);
    assert!( state.sub_point.latitude_deg.abs() <= 52.0);
    assert!( state.sub_point.longitude_deg >= -180.0 && state.sub_point.longitude_deg <= 180.0);
    assert!( state.speed_kms() > 7.5 && state.speed_kms() < 7.8);
    assert_eq!( state.orbit_class(), OrbitClass::Leo);

    let topo = &state.topocentric;
    assert!( topo.azimuth_deg >= 0.0 && topo.azimuth_deg < 360.0);
    assert!( topo.elevation_deg >= -90.0 && topo.elevation_deg <= 90.0);
    assert_eq!( state.is_visible(), topo.elevation_deg > 0.0);
}

#[test]
fn test_deterministic() {
    let provider = StateProvider::new( Sgp4Propagator::new());
    let t = parse_datetime("2023-12-02T03:04:05Z").unwrap();
    let rec = record("TIANGONG");

    let s1 = provider.state_at( &rec, &t, &cairo()).unwrap();
    let s2 = provider.state_at( &rec, &t, &cairo()).unwrap();
    assert_eq!( s1, s2);

    let el = provider.elevation_at( &rec, &t, &cairo()).unwrap();
    assert_eq!( el, s1.topocentric.elevation_deg);
}

#[test]
fn test_orbit_classes() {
    let provider = StateProvider::new( Sgp4Propagator::new());
    let t = parse_datetime("2023-12-01T12:00:00Z").unwrap();

    let geo = provider.state_at( &record("NILESAT"), &t, &cairo()).unwrap();
    assert!( geo.sub_point.altitude_km > 35700.0 && geo.sub_point.altitude_km < 35900.0);
    assert!( geo.sub_point.latitude_deg.abs() < 0.5);
    assert_eq!( geo.orbit_class(), OrbitClass::Geo);

    let meo = provider.state_at( &record("NAVSTAR"), &t, &cairo()).unwrap();
    assert!( meo.sub_point.altitude_km > 19000.0 && meo.sub_point.altitude_km < 21500.0);
    assert_eq!( meo.orbit_class(), OrbitClass::Meo);
}

#[test]
fn test_earth_rotation_models_agree() {
    let satkit = StateProvider::new( Sgp4Propagator::new());
    let gmst = StateProvider::new( GmstSgp4( Sgp4Propagator::new()));
    let t = parse_datetime("2023-12-01T18:30:00Z").unwrap();
    let rec = record("HUBBLE");

    let a = satkit.state_at( &rec, &t, &cairo()).unwrap();
    let b = gmst.state_at( &rec, &t, &cairo()).unwrap();

    assert!( (a.sub_point.latitude_deg - b.sub_point.latitude_deg).abs() < 0.05);
    assert!( (a.sub_point.longitude_deg - b.sub_point.longitude_deg).abs() < 0.05);
    assert!( (a.topocentric.elevation_deg - b.topocentric.elevation_deg).abs() < 0.05);
}

#[test]
fn test_batch_elevations() {
    let provider = StateProvider::new( Sgp4Propagator::new());
    let rec = record("ISS");
    let t0 = parse_datetime("2023-12-01T12:00:00Z").unwrap();
    let dates: Vec<DateTime<Utc>> = (0..10).map( |i| t0 + chrono::TimeDelta::seconds(i * 60)).collect();

    let batch = provider.elevations( &rec, &dates, &cairo()).unwrap();
    assert_eq!( batch.len(), dates.len());
    for (d, el) in dates.iter().zip( batch.iter()) {
        assert!( (provider.elevation_at( &rec, d, &cairo()).unwrap() - el).abs() < 1e-9);
    }
}
