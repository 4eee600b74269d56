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

use anyhow::Result;
use sattrack_common::{define_cli, datetime::utc_now};
use sattrack_orbital::{
    init_tracing, load_tracker_config, CONFIG_FILE,
    acquisition::{ElementAcquisition,HttpCatalogSource}, propagation::Sgp4Propagator, session::TrackingSession
};

define_cli! { ARGS [about="show the tracked fleet and the orbit class of its members"] =
    config: String [help="filename of tracker config", long, default_value=CONFIG_FILE]
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = load_tracker_config( &ARGS.config)?;
    let observer = config.default_observer()?;
    let acquisition = ElementAcquisition::new( config.cache_path(), HttpCatalogSource::from_config( &config)?);
    let session = TrackingSession::initialize( config, acquisition, Sgp4Propagator::new()).await?;

    let snapshot = session.snapshot();
    let now = utc_now();
    println!("{} of {} satellites ({:?} catalog)", snapshot.fleet.len(), snapshot.catalog.len(), snapshot.origin);

    for rec in &snapshot.fleet {
        match session.provider().state_at( rec, &now, &observer) {
            Ok(state) => println!("{:>6}  {:<24} {:<16} {:8.0} km", rec.catalog_number(), rec.name(), state.orbit_class(), state.sub_point.altitude_km),
            Err(e) => println!("{:>6}  {:<24} {}", rec.catalog_number(), rec.name(), e)
        }
    }

    Ok(())
}
