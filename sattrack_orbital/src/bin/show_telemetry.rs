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

use std::time::Duration;
use anyhow::{anyhow,Result};
use tokio::time::{interval,MissedTickBehavior};
use sattrack_common::{define_cli, datetime::{utc_now, hms_utc_string}};
use sattrack_orbital::{
    init_tracing, load_tracker_config, CONFIG_FILE,
    acquisition::{ElementAcquisition,HttpCatalogSource}, propagation::Sgp4Propagator, session::TrackingSession,
    telemetry::TelemetryEntry
};

define_cli! { ARGS [about="show live telemetry of the tracked fleet, updated every second"] =
    site: Option<String> [help="name of observer site (if not specified use configured default)", long, short],
    count: Option<usize> [help="number of updates (if not specified run until interrupted)", long, short],
    json: bool [help="print rows as JSON lines", long, short],
    config: String [help="filename of tracker config", long, default_value=CONFIG_FILE]
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = load_tracker_config( &ARGS.config)?;
    let site_name = ARGS.site.as_ref().unwrap_or( &config.default_site);
    let observer = config.site( site_name).ok_or_else( || anyhow!("unknown site {}", site_name))?.observer();

    let acquisition = ElementAcquisition::new( config.cache_path(), HttpCatalogSource::from_config( &config)?);
    let session = TrackingSession::initialize( config, acquisition, Sgp4Propagator::new()).await?;

    let mut ticker = interval( Duration::from_secs(1));
    ticker.set_missed_tick_behavior( MissedTickBehavior::Skip);
    let mut n = 0;

    loop {
        ticker.tick().await;
        let now = utc_now();
        let entries = session.telemetry( &now, &observer);

        if entries.is_empty() {
            println!("{} no data", hms_utc_string(&now));
        } else if ARGS.json {
            for e in &entries {
                println!("{}", serde_json::to_string(e)?);
            }
        } else {
            println!("--- {}", hms_utc_string(&now));
            for e in &entries {
                match e {
                    TelemetryEntry::Row(r) => println!("{r}"),
                    TelemetryEntry::Failed { name, reason } => println!("{:<24} {}", name, reason)
                }
            }
        }

        n += 1;
        if ARGS.count.is_some_and( |max| n >= max) { break }
    }

    Ok(())
}
