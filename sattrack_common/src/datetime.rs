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

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Deserializer, Serializer};
use std::time::Duration;
use parse_duration::parse;

#[inline] pub fn secs (n: u64)->Duration { Duration::from_secs(n) }
#[inline] pub fn minutes (n: u64)->Duration { Duration::from_secs(n * 60) }
#[inline] pub fn hours (n: u64)->Duration { Duration::from_secs(n * 3600) }

/// this should be used wherever we might have to use sim clock instead of wall clock
#[inline]
pub fn utc_now()->DateTime<Utc> {
    Utc::now()
}

/// fractional unix epoch seconds (sub-microsecond resolution is not preserved)
pub fn to_unix_secs (dt: &DateTime<Utc>)->f64 {
    dt.timestamp() as f64 + dt.timestamp_subsec_nanos() as f64 * 1e-9
}

/// inverse of [`to_unix_secs`], rounded to microseconds. Returns None if outside the chrono range
pub fn from_unix_secs (secs: f64)->Option<DateTime<Utc>> {
    if !secs.is_finite() { return None }
    DateTime::<Utc>::from_timestamp_micros( (secs * 1_000_000.0).round() as i64)
}

/// add a std Duration to a DateTime (saturating at the chrono max)
pub fn add_duration (dt: &DateTime<Utc>, dur: Duration)->DateTime<Utc> {
    match TimeDelta::from_std(dur) {
        Ok(td) => dt.checked_add_signed(td).unwrap_or(DateTime::<Utc>::MAX_UTC),
        Err(_) => DateTime::<Utc>::MAX_UTC
    }
}

/// parse RFC 3339 / ISO 8601 datetime specs such as "2023-12-01T12:00:00Z"
pub fn parse_datetime (s: &str)->Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .or_else( |_| DateTime::parse_from_str(s, "%+"))
        .ok()
        .map( |dt| dt.to_utc())
}

pub fn hms_utc_string (dt: &DateTime<Utc>)->String {
    dt.format("%H:%M:%S").to_string()
}

//--- support for serde

/// deserialize human readable duration specs such as "5s", "30 sec" or "24h"
pub fn deserialize_duration <'a,D>(deserializer: D) -> Result<Duration,D::Error>
    where D: Deserializer<'a>
{
    String::deserialize(deserializer).and_then( |string| {
        parse(string.as_str())
            .map_err( |e| serde::de::Error::custom(format!("{:?}",e)))
    })
}

pub fn serialize_duration<S: Serializer> (dur: &Duration, s: S) -> Result<S::Ok, S::Error>  {
    let dfm = format!("{}s", dur.as_secs_f64());
    s.serialize_str(&dfm)
}
