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

use std::ops::{Add, Mul, Sub};
use nalgebra::{Matrix3, Rotation3, Vector3};
use serde::{Serialize,Deserialize};
use crate::geo_constants::{EARTH_RADIUS_RATIO_SQUARED, EQUATORIAL_EARTH_RADIUS, E_EARTH_SQUARED};
use crate::cartographic::Cartographic;

/// a plain 3D vector without unit or frame semantics. Within sattrack this is used for
/// ECEF (ITRF) and TEME positions in meters and for velocities in meters/sec

#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct Cartesian3 {
    pub x: f64,
    pub y: f64,
    pub z: f64
}

impl Cartesian3 {
    pub fn new (x: f64, y: f64, z: f64)->Cartesian3 {
        Cartesian3{x,y,z}
    }

    pub fn to_vector3 (&self)->Vector3<f64> {
        Vector3::new( self.x, self.y, self.z)
    }

    pub fn from_vector3 (v: &Vector3<f64>)->Cartesian3 {
        Cartesian3 { x: v.x, y: v.y, z: v.z }
    }

    /// apply a 3x3 (rotation) matrix
    pub fn transformed (&self, m: &Matrix3<f64>)->Cartesian3 {
        Cartesian3::from_vector3( &(m * self.to_vector3()))
    }

    pub fn length(&self) -> f64 {
        self.length_squared().sqrt()
    }

    pub fn length_squared(&self) -> f64 {
        (self.x * self.x) + (self.y * self.y) + (self.z * self.z)
    }

    /// rotate around the z-axis by `angle` radians (right handed, counter clockwise seen from +z)
    pub fn rotated_z (&self, angle: f64)->Self {
        let rot = Rotation3::from_axis_angle( &Vector3::z_axis(), angle);
        Cartesian3::from_vector3( &(rot * self.to_vector3()))
    }

    pub fn is_finite (&self)->bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl std::fmt::Display for Cartesian3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.x, self.y, self.z)
    }
}

impl Add for Cartesian3 {
     type Output = Self;

     fn add (self, rhs: Self) -> Self {
        Cartesian3 { x: self.x + rhs.x, y: self.y + rhs.y, z: self.z + rhs.z }
     }
}

impl Sub for Cartesian3 {
     type Output = Self;

     fn sub (self, rhs: Self) -> Self {
        Cartesian3 { x: self.x - rhs.x, y: self.y - rhs.y, z: self.z - rhs.z }
     }
}

impl Sub for &Cartesian3 {
     type Output = Cartesian3;

     fn sub (self, rhs: &Cartesian3) -> Cartesian3 {
        Cartesian3 { x: self.x - rhs.x, y: self.y - rhs.y, z: self.z - rhs.z }
     }
}

impl Mul<f64> for Cartesian3 {
     type Output = Self;

     fn mul (self, rhs: f64) -> Self {
        Cartesian3 { x: self.x * rhs, y: self.y * rhs, z: self.z * rhs }
     }
}

impl From<Cartographic> for Cartesian3 {
    fn from(p: Cartographic) -> Self {
        Cartesian3::from(&p)
    }
}

impl From<&Cartographic> for Cartesian3 {
    /// geodetic (WGS84) to ECEF
    fn from(p: &Cartographic) -> Self {
        let φ = p.latitude;
        let λ = p.longitude;
        let h = p.height;

        let sin_φ = φ.sin();
        let cos_φ = φ.cos();

        let b = EQUATORIAL_EARTH_RADIUS / ( 1.0 - E_EARTH_SQUARED* (sin_φ * sin_φ)).sqrt();
        let c = (b + h)*cos_φ;

        let x = c *  λ.cos();
        let y = c *  λ.sin();
        let z = (EARTH_RADIUS_RATIO_SQUARED * b + h) * sin_φ;

        Cartesian3::new( x, y, z)
    }
}
