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

use serde::{Deserialize, Deserializer, de::Error as DeError};

/// map degrees into [0,360)
#[inline]
pub fn normalize_360 (d: f64) -> f64 {
    let x = d % 360.0;
    if x < 0.0 { 360.0 + x } else { x }
}

/// index of the equal sized sector that contains the provided azimuth. Sector 0 is centered
/// on north, sectors proceed clockwise (e.g. n_sectors=8 gives N,NE,E,..,NW).
/// Azimuths on a sector boundary go to the even sector index
pub fn sector_index (azimuth_deg: f64, n_sectors: usize) -> usize {
    let width = 360.0 / n_sectors as f64;
    let idx = (normalize_360(azimuth_deg) / width).round_ties_even() as usize;
    idx % n_sectors
}

//--- serde support for plain f64 fields that have to be within a given degree range

fn de_degrees_in_range<'a,D> (deserializer: D, min: f64, max: f64) -> Result<f64,D::Error> where D: Deserializer<'a> {
    let v = f64::deserialize(deserializer)?;
    if v >= min && v <= max {
        Ok(v)
    } else {
        Err( D::Error::custom( format!("degrees out of range [{min}..{max}]: {v}")))
    }
}

pub fn de_latitude<'a,D> (deserializer: D) -> Result<f64,D::Error> where D: Deserializer<'a> {
    de_degrees_in_range( deserializer, -90.0, 90.0)
}

pub fn de_longitude<'a,D> (deserializer: D) -> Result<f64,D::Error> where D: Deserializer<'a> {
    de_degrees_in_range( deserializer, -180.0, 180.0)
}
