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

use anyhow::{anyhow,Result};
use sattrack_common::{define_cli, datetime::{parse_datetime, utc_now}};
use sattrack_orbital::{
    init_tracing, load_tracker_config, CONFIG_FILE,
    acquisition::{ElementAcquisition,HttpCatalogSource}, propagation::Sgp4Propagator, session::TrackingSession,
    passes::PassPredictor
};

define_cli! { ARGS [about="show rise, peak and set times of a tracked satellite within the pass window"] =
    date: Option<String> [help="start datetime spec (if not specified use current datetime)", long, short],
    site: Option<String> [help="name of observer site (if not specified use configured default)", long, short],
    min_elevation: Option<f64> [help="minimum elevation in degrees (if not specified use configured value)", long, short],
    config: String [help="filename of tracker config", long, default_value=CONFIG_FILE],
    satellite: String [help="name of tracked satellite"]
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = load_tracker_config( &ARGS.config)?;
    let site_name = ARGS.site.as_ref().unwrap_or( &config.default_site);
    let site = config.site( site_name).ok_or_else( || anyhow!("unknown site {}", site_name))?.clone();
    let observer = site.observer();

    let start = match &ARGS.date {
        Some(ds) => parse_datetime( ds).ok_or_else( || anyhow!("invalid datetime spec {}", ds))?,
        None => utc_now()
    };
    let min_elevation = ARGS.min_elevation.unwrap_or( config.min_elevation_deg);
    let window = config.pass_window;
    let coarse_step = config.coarse_step;

    let acquisition = ElementAcquisition::new( config.cache_path(), HttpCatalogSource::from_config( &config)?);
    let session = TrackingSession::initialize( config, acquisition, Sgp4Propagator::new()).await?;
    let snapshot = session.snapshot();
    let rec = snapshot.fleet.get( &ARGS.satellite)
        .ok_or_else( || anyhow!("not a tracked satellite: {} (tracked: {:?})", ARGS.satellite, snapshot.fleet.names()))?;

    let events = PassPredictor::new( session.provider(), coarse_step)
        .predict_window( rec, &observer, &start, window, min_elevation)?;

    println!("passes of {} over {} above {:.1}° starting {}", rec.name(), site.name, min_elevation, start);
    if events.is_empty() {
        println!("no visible passes.");
    }
    for e in &events {
        println!("  {e}");
    }

    Ok(())
}
