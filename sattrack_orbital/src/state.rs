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

//! orbital states of a satellite at a given time, as seen from a ground observer

use chrono::{DateTime,Utc};
use serde::{Deserialize,Serialize};
use sattrack_common::{cartesian3::Cartesian3, cartographic::{Cartographic,LookAngles}};
use crate::{
    Observer, errors::Result, tle::ElementRecord, propagation::{InertialState,Propagator},
    geometry::{self,CompassPoint,OrbitClass}
};

/// the point on the earth surface directly below the satellite
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct SubPoint {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub altitude_km: f64,
}

/// observer relative direction and distance
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct Topocentric {
    pub elevation_deg: f64,
    pub azimuth_deg: f64,
    pub range_km: f64,
}

impl From<LookAngles> for Topocentric {
    fn from (la: LookAngles) -> Self {
        Topocentric { elevation_deg: la.elevation_deg, azimuth_deg: la.azimuth_deg, range_km: la.range_m / 1000.0 }
    }
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct OrbitalState {
    pub date: DateTime<Utc>,
    pub sub_point: SubPoint,
    /// inertial (TEME) velocity in km/s
    pub velocity_kms: [f64; 3],
    pub topocentric: Topocentric,
}

impl OrbitalState {
    pub fn speed_kms (&self) -> f64 { geometry::speed_kms( &self.velocity_kms) }

    pub fn is_visible (&self) -> bool { geometry::is_visible( self.topocentric.elevation_deg) }
    pub fn compass (&self) -> CompassPoint { geometry::compass( self.topocentric.azimuth_deg) }
    pub fn orbit_class (&self) -> OrbitClass { OrbitClass::from_altitude( self.sub_point.altitude_km) }
    pub fn footprint_m2 (&self) -> f64 { geometry::footprint_area( self.sub_point.altitude_km) }
}

/// computes [`OrbitalState`]s through a [`Propagator`]. This does not keep any per-satellite state
pub struct StateProvider<P> where P: Propagator {
    propagator: P,
}

impl<P> StateProvider<P> where P: Propagator {
    pub fn new (propagator: P) -> Self {
        StateProvider { propagator }
    }

    pub fn propagator (&self) -> &P {
        &self.propagator
    }

    pub fn state_at (&self, rec: &ElementRecord, date: &DateTime<Utc>, observer: &Observer) -> Result<OrbitalState> {
        let inertial = self.propagator.propagate_at( rec, date)?;
        Ok( self.to_orbital_state( date, &inertial, &observer.cartographic()))
    }

    /// just the topocentric elevation, which is what pass prediction needs
    pub fn elevation_at (&self, rec: &ElementRecord, date: &DateTime<Utc>, observer: &Observer) -> Result<f64> {
        let inertial = self.propagator.propagate_at( rec, date)?;
        let ecef = self.propagator.to_earth_fixed( date, &inertial.position);
        Ok( observer.cartographic().look_angles( &ecef).elevation_deg )
    }

    pub fn elevations (&self, rec: &ElementRecord, dates: &[DateTime<Utc>], observer: &Observer) -> Result<Vec<f64>> {
        let obs = observer.cartographic();
        let states = self.propagator.propagate( rec, dates)?;

        Ok( dates.iter().zip( states.iter()).map( |(date,s)| {
            let ecef = self.propagator.to_earth_fixed( date, &s.position);
            obs.look_angles( &ecef).elevation_deg
        }).collect() )
    }

    fn to_orbital_state (&self, date: &DateTime<Utc>, inertial: &InertialState, obs: &Cartographic) -> OrbitalState {
        let ecef = self.propagator.to_earth_fixed( date, &inertial.position);
        let geo = Cartographic::from( &ecef);
        let v: Cartesian3 = inertial.velocity * 0.001;

        OrbitalState {
            date: *date,
            sub_point: SubPoint { latitude_deg: geo.latitude_deg(), longitude_deg: geo.longitude_deg(), altitude_km: geo.height_km() },
            velocity_kms: [v.x, v.y, v.z],
            topocentric: Topocentric::from( obs.look_angles( &ecef)),
        }
    }
}
