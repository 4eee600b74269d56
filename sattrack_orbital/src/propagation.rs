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

//! the orbit propagation seam. [`Sgp4Propagator`] is the production implementation based on satkit,
//! tests can substitute synthetic orbits

use chrono::{DateTime,Utc};
use satkit::{TLE, Instant, sgp4::sgp4, frametransform::qteme2itrf};
use sattrack_common::{cartesian3::Cartesian3, datetime::to_unix_secs, geo_constants::MEAN_EARTH_RADIUS, TWO_PI};
use crate::{instant_from_datetime, errors::{SatTrackError,Result,propagation_error}, tle::ElementRecord};

/// position (meters) and velocity (meters/sec) in the true-equator mean-equinox (TEME) frame
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct InertialState {
    pub position: Cartesian3,
    pub velocity: Cartesian3,
}

/// something that can compute inertial satellite states for element records.
/// Implementations have to be pure: the same record and time always give the same state
pub trait Propagator: Send + Sync {

    /// states for all provided times, in the same order
    fn propagate (&self, rec: &ElementRecord, times: &[DateTime<Utc>]) -> Result<Vec<InertialState>>;

    fn propagate_at (&self, rec: &ElementRecord, t: &DateTime<Utc>) -> Result<InertialState> {
        self.propagate( rec, std::slice::from_ref(t))?
            .pop()
            .ok_or_else( || propagation_error!("no state for {} at {}", rec.name(), t))
    }

    /// rotate an inertial position into the earth fixed (ECEF) frame.
    /// The default only accounts for earth rotation (GMST), without polar motion or nutation
    fn to_earth_fixed (&self, t: &DateTime<Utc>, p: &Cartesian3) -> Cartesian3 {
        p.rotated_z( -gmst( t))
    }
}

/// the satkit SGP4/SDP4 propagator
#[derive(Debug,Clone,Copy,Default)]
pub struct Sgp4Propagator;

impl Sgp4Propagator {
    pub fn new () -> Self { Sgp4Propagator }

    fn load_tle (rec: &ElementRecord) -> Result<TLE> {
        TLE::load_3line( rec.name(), rec.line1(), rec.line2())
            .map_err( |e| propagation_error!("invalid element set for {}: {:?}", rec.name(), e))
    }
}

impl Propagator for Sgp4Propagator {
    fn propagate (&self, rec: &ElementRecord, times: &[DateTime<Utc>]) -> Result<Vec<InertialState>> {
        if times.is_empty() { return Ok( Vec::new()) }

        let mut tle = Sgp4Propagator::load_tle( rec)?;
        let tvec: Vec<Instant> = times.iter().map( instant_from_datetime).collect();
        let (pteme, vteme, _errs) = sgp4( &mut tle, &tvec);

        let mut states = Vec::with_capacity( times.len());
        for i in 0..times.len() {
            let position = Cartesian3::new( pteme[(0,i)], pteme[(1,i)], pteme[(2,i)]);
            let velocity = Cartesian3::new( vteme[(0,i)], vteme[(1,i)], vteme[(2,i)]);

            if !position.is_finite() || !velocity.is_finite() {
                return Err( propagation_error!("SGP4 failed for {} at {}", rec.name(), times[i]))
            }
            if position.length() < MEAN_EARTH_RADIUS {
                return Err( propagation_error!("{} has decayed at {}", rec.name(), times[i]))
            }
            states.push( InertialState { position, velocity });
        }

        Ok(states)
    }

    fn to_earth_fixed (&self, t: &DateTime<Utc>, p: &Cartesian3) -> Cartesian3 {
        let rot = qteme2itrf( &instant_from_datetime(t)).to_rotation_matrix();
        p.transformed( rot.matrix())
    }
}

/// Greenwich mean sidereal time in radians (IAU 1982), treating UTC as UT1
pub fn gmst (t: &DateTime<Utc>) -> f64 {
    let jd = to_unix_secs(t) / 86400.0 + 2440587.5;
    let tu = (jd - 2451545.0) / 36525.0;

    let secs = 67310.54841 + (876600.0 * 3600.0 + 8640184.812866) * tu + 0.093104 * tu * tu - 6.2e-6 * tu * tu * tu;
    (secs % 86400.0 / 86400.0 * TWO_PI).rem_euclid( TWO_PI)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sattrack_common::datetime::parse_datetime;

    #[test]
    fn test_gmst() {
        // J2000.0 epoch: 18h41m50.548s
        let t = parse_datetime("2000-01-01T12:00:00Z").unwrap();
        let expected = (18.0 + 41.0/60.0 + 50.54841/3600.0) * 15.0;
        assert!( (gmst(&t).to_degrees() - expected).abs() < 1e-3);
    }

    #[test]
    fn test_earth_fixed_rotation() {
        let t = parse_datetime("2023-12-01T12:00:00Z").unwrap();
        let p = Cartesian3::new( 7.0e6, 1.0e6, 5.0e5);

        let itrf = Sgp4Propagator::new().to_earth_fixed( &t, &p);
        let pef = p.rotated_z( -gmst(&t));

        assert!( (itrf.length() - p.length()).abs() < 1e-3);
        // TEME->ITRF only differs from the pure earth rotation by UT1-UTC and polar motion
        assert!( (itrf - pef).length() < 100.0);
    }
}
