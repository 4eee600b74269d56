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
use sattrack_common::define_cli;
use sattrack_orbital::{init_tracing, load_tracker_config, CONFIG_FILE, acquisition::{ElementAcquisition,HttpCatalogSource}};

define_cli! { ARGS [about="retrieve and cache the element catalog (cache, network or embedded fallback)"] =
    refresh: bool [help="remove cached element sets before acquisition", long, short],
    list: bool [help="list the names of all acquired element sets", long, short],
    config: String [help="filename of tracker config", long, default_value=CONFIG_FILE]
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = load_tracker_config( &ARGS.config)?;
    let acquisition = ElementAcquisition::new( config.cache_path(), HttpCatalogSource::from_config( &config)?);

    if ARGS.refresh {
        acquisition.clear_cache()?;
    }

    let acquired = acquisition.acquire().await?;
    println!("{} element sets from {:?} (cache: {})", acquired.catalog.len(), acquired.origin, acquisition.cache_path().display());

    if ARGS.list {
        for rec in &acquired.catalog {
            println!("{:>6}  {}", rec.catalog_number(), rec.name());
        }
    }

    Ok(())
}
