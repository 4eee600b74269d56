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

//! domain neutral utilities shared by the sattrack crates: angles, geodetic coordinates,
//! file and network helpers, datetime helpers and RON config lookup

use std::f64::consts::{PI as STD_PI};

pub mod macros;
pub mod angle;
pub mod geo_constants;
pub mod cartesian3;
pub mod cartographic;
pub mod fs;
pub mod net;
pub mod datetime;
pub mod config;

// syntactic sugar - this is just more readable in many cases
#[inline(always)] pub fn asin(x:f64) -> f64 {x.asin() }
#[inline(always)] pub fn atan2(y:f64,x:f64) -> f64 { y.atan2(x) }

pub const PI: f64 = STD_PI;
pub const TWO_PI: f64 = PI * 2.0;
