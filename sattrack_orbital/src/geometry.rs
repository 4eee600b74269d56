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

//! derived quantities of orbital states

use std::fmt;
use serde::{Deserialize,Serialize};
use sattrack_common::{angle::sector_index, geo_constants::MEAN_EARTH_RADIUS, PI};

pub const LEO_MAX_ALTITUDE_KM: f64 = 2000.0;
pub const MEO_MAX_ALTITUDE_KM: f64 = 35000.0;

/* #region compass ***********************************************************************************/

#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize)]
pub enum CompassPoint { N, NE, E, SE, S, SW, W, NW }

const COMPASS_POINTS: [CompassPoint; 8] = [
    CompassPoint::N, CompassPoint::NE, CompassPoint::E, CompassPoint::SE,
    CompassPoint::S, CompassPoint::SW, CompassPoint::W, CompassPoint::NW
];

impl CompassPoint {
    pub fn label (&self) -> &'static str {
        match self {
            CompassPoint::N => "N",
            CompassPoint::NE => "NE",
            CompassPoint::E => "E",
            CompassPoint::SE => "SE",
            CompassPoint::S => "S",
            CompassPoint::SW => "SW",
            CompassPoint::W => "W",
            CompassPoint::NW => "NW",
        }
    }
}

impl fmt::Display for CompassPoint {
    fn fmt (&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str( self.label())
    }
}

/// the nearest of 8 compass points for an azimuth in degrees (any value, wraps at 360)
pub fn compass (azimuth_deg: f64) -> CompassPoint {
    COMPASS_POINTS[ sector_index( azimuth_deg, COMPASS_POINTS.len())]
}

/* #endregion compass */

/* #region orbit class *******************************************************************************/

#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize)]
pub enum OrbitClass {
    Leo,
    Meo,
    Geo,
}

impl OrbitClass {
    /// classify by altitude above the earth surface
    pub fn from_altitude (altitude_km: f64) -> Self {
        if altitude_km < LEO_MAX_ALTITUDE_KM {
            OrbitClass::Leo
        } else if altitude_km < MEO_MAX_ALTITUDE_KM {
            OrbitClass::Meo
        } else {
            OrbitClass::Geo
        }
    }

    pub fn label (&self) -> &'static str {
        match self {
            OrbitClass::Leo => "LEO (Internet)",
            OrbitClass::Meo => "MEO (GPS)",
            OrbitClass::Geo => "GEO (TV)",
        }
    }
}

impl fmt::Display for OrbitClass {
    fn fmt (&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str( self.label())
    }
}

/* #endregion orbit class */

/// area of the spherical cap that is visible from the given altitude, in square meters.
/// Negative altitudes have no footprint
pub fn footprint_area (altitude_km: f64) -> f64 {
    let h = altitude_km * 1000.0;
    if h <= 0.0 { return 0.0 }

    let r = MEAN_EARTH_RADIUS;
    2.0 * PI * r * r * (1.0 - r / (r + h))
}

/// magnitude of a velocity vector given in km/s
pub fn speed_kms (velocity_kms: &[f64; 3]) -> f64 {
    let [x,y,z] = *velocity_kms;
    (x*x + y*y + z*z).sqrt()
}

/// above the geometric horizon
pub fn is_visible (elevation_deg: f64) -> bool {
    elevation_deg > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compass_boundaries() {
        assert_eq!( compass( 0.0), CompassPoint::N);
        assert_eq!( compass( 360.0), CompassPoint::N);
        assert_eq!( compass( 22.4), CompassPoint::N);
        assert_eq!( compass( 22.6), CompassPoint::NE);
        assert_eq!( compass( 22.5), CompassPoint::N);
        assert_eq!( compass( 112.5), CompassPoint::E);
        assert_eq!( compass( 202.5), CompassPoint::S);
        assert_eq!( compass( 157.5), CompassPoint::S);
        assert_eq!( compass( 90.0), CompassPoint::E);
        assert_eq!( compass( 337.6), CompassPoint::N);
        assert_eq!( compass( 315.0), CompassPoint::NW);
    }
}
