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

//! satellite tracking and pass prediction: element set acquisition with cache and fallback,
//! fleet selection, SGP4 based orbital states as seen from a ground observer and
//! rise/culmination/set prediction

use std::{path::PathBuf, time::Duration};
use chrono::{DateTime,Utc};
use satkit::Instant;
use serde::{Deserialize,Serialize};
use tracing::warn;
use sattrack_common::{angle::{de_latitude,de_longitude}, cartographic::Cartographic, config::ConfigError, datetime::{self, deserialize_duration, serialize_duration}, pkg_cache_dir};

pub mod errors;
use errors::{SatTrackError,Result,op_failed};

pub mod tle;
pub mod acquisition;
pub mod fleet;
pub mod propagation;
pub mod geometry;
pub mod state;
pub mod passes;
pub mod telemetry;
pub mod session;

pub const CONFIG_FILE: &str = "sattrack.ron";

/// load a RON config that belongs to this crate (see [`sattrack_common::config`] for lookup order)
pub fn load_config<C> (filename: &str) -> Result<C> where C: for<'a> Deserialize<'a> {
    Ok( sattrack_common::config::load_config( env!("CARGO_PKG_NAME"), filename)? )
}

/// load the tracker config from `filename`. If there is no such config we use the built-in defaults
pub fn load_tracker_config (filename: &str) -> Result<TrackerConfig> {
    match load_config::<TrackerConfig>( filename) {
        Ok(config) => Ok(config),
        Err(SatTrackError::ConfigError( ConfigError::ResourceNotFoundError(_))) => {
            warn!("no config {} found, using defaults", filename);
            Ok( TrackerConfig::default())
        }
        Err(e) => Err(e)
    }
}

/// init tracing with a `RUST_LOG` env filter. This is for our executables
pub fn init_tracing () {
    tracing_subscriber::fmt()
        .with_env_filter( tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .init();
}

/// a ground position from which we observe satellites. Altitude is assumed to be sea level
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct Observer {
    #[serde(deserialize_with="de_latitude")]
    pub latitude_deg: f64,
    #[serde(deserialize_with="de_longitude")]
    pub longitude_deg: f64,
}

impl Observer {
    pub fn new (latitude_deg: f64, longitude_deg: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&latitude_deg) || !(-180.0..=180.0).contains(&longitude_deg) {
            return Err( op_failed!("observer position out of range: {}, {}", latitude_deg, longitude_deg))
        }
        Ok( Observer { latitude_deg, longitude_deg } )
    }

    pub fn cartographic (&self) -> Cartographic {
        Cartographic::from_degrees( self.longitude_deg, self.latitude_deg, 0.0)
    }
}

/// a named observer position
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct Site {
    pub name: String,
    #[serde(deserialize_with="de_latitude")]
    pub latitude_deg: f64,
    #[serde(deserialize_with="de_longitude")]
    pub longitude_deg: f64,
}

impl Site {
    pub fn new (name: impl ToString, latitude_deg: f64, longitude_deg: f64) -> Result<Self> {
        Observer::new( latitude_deg, longitude_deg)?;
        Ok( Site { name: name.to_string(), latitude_deg, longitude_deg } )
    }

    pub fn observer (&self) -> Observer {
        Observer { latitude_deg: self.latitude_deg, longitude_deg: self.longitude_deg }
    }
}

/// the tracker configuration, normally read from `sattrack.ron`
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct TrackerConfig {
    /// where to fetch the bulk element sets from
    pub catalog_url: String,

    #[serde(deserialize_with="deserialize_duration", serialize_with="serialize_duration")]
    pub fetch_timeout: Duration,

    /// cache file for downloaded element sets. Relative paths are resolved against the crate cache dir
    pub cache_file: PathBuf,

    /// name substrings of the satellites to track, in display order (first catalog match each)
    pub targets: Vec<String>,

    /// name substring that identifies members of the tracked constellation
    pub constellation_marker: String,
    pub constellation_cap: usize,

    pub min_elevation_deg: f64,

    #[serde(deserialize_with="deserialize_duration", serialize_with="serialize_duration")]
    pub pass_window: Duration,

    /// sampling interval of the pass search. Has to be well below the shortest pass we want to find
    #[serde(deserialize_with="deserialize_duration", serialize_with="serialize_duration")]
    pub coarse_step: Duration,

    pub sites: Vec<Site>,
    pub default_site: String,
}

impl TrackerConfig {
    pub fn site (&self, name: &str) -> Option<&Site> {
        self.sites.iter().find( |s| s.name.eq_ignore_ascii_case(name))
    }

    pub fn default_observer (&self) -> Result<Observer> {
        self.site( &self.default_site)
            .map( |s| s.observer())
            .ok_or_else( || op_failed!("unknown default site {}", self.default_site))
    }

    pub fn cache_path (&self) -> PathBuf {
        if self.cache_file.is_absolute() {
            self.cache_file.clone()
        } else {
            pkg_cache_dir!().join( &self.cache_file)
        }
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        let site = |name: &str, latitude_deg: f64, longitude_deg: f64| Site { name: name.to_string(), latitude_deg, longitude_deg };

        TrackerConfig {
            catalog_url: "https://celestrak.org/NORAD/elements/gp.php?GROUP=active&FORMAT=tle".to_string(),
            fetch_timeout: datetime::secs(5),
            cache_file: PathBuf::from("active_sats.txt"),
            targets: ["ISS (ZARYA)", "NILESAT 201", "BADR-4", "TIANGONG", "NAVSTAR 80", "HUBBLE"]
                .iter().map( |s| s.to_string()).collect(),
            constellation_marker: "STARLINK".to_string(),
            constellation_cap: 5,
            min_elevation_deg: 10.0,
            pass_window: datetime::hours(24),
            coarse_step: datetime::secs(30),
            sites: vec![
                site( "Cairo", 30.0444, 31.2357),
                site( "Mecca", 21.3891, 39.8579),
                site( "London", 51.5074, -0.1278),
                site( "New York", 40.7128, -74.0060),
                site( "Tokyo", 35.6762, 139.6503),
                site( "Sydney", -33.8688, 151.2093),
            ],
            default_site: "Cairo".to_string(),
        }
    }
}

//--- general utility functions

/// the satkit time for a chrono UTC datetime
pub fn instant_from_datetime (dt: &DateTime<Utc>)->Instant {
    Instant::from_unixtime( datetime::to_unix_secs(dt))
}
