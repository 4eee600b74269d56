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

//! obtaining element catalogs through a cache -> network -> embedded fallback chain.
//! Only the total loss of all three sources is an error

use std::{path::{Path,PathBuf}, time::Duration};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use serde::{Deserialize,Serialize};
use tracing::{debug,info,warn};
use sattrack_common::{fs::{is_non_empty_file, filepath_contents_as_string, set_filepath_contents_atomic, remove_existing_file}, net::{get_bytes, timeout_client}};

use crate::{TrackerConfig, errors::{SatTrackError,Result,op_failed}, tle::{Catalog,parse_catalog}};

/// a remote source of bulk element sets in 3-line text format
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// what we log for this source
    fn description (&self) -> String;

    /// fetch the raw catalog text. Implementations have to return (with an error) within their timeout
    async fn fetch (&self) -> Result<Bytes>;
}

/// a HTTP GET based catalog source such as celestrak's `gp.php?GROUP=active&FORMAT=tle`
pub struct HttpCatalogSource {
    url: String,
    timeout: Duration,
    client: Client,
}

impl HttpCatalogSource {
    pub fn new (url: impl ToString, timeout: Duration) -> Result<Self> {
        let client = timeout_client( timeout)?;
        Ok( HttpCatalogSource { url: url.to_string(), timeout, client } )
    }

    pub fn from_config (config: &TrackerConfig) -> Result<Self> {
        HttpCatalogSource::new( &config.catalog_url, config.fetch_timeout)
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    fn description (&self) -> String {
        self.url.clone()
    }

    async fn fetch (&self) -> Result<Bytes> {
        // the client timeout covers the request, this covers connection pool waits and DNS
        match tokio::time::timeout( self.timeout, get_bytes( &self.client, &self.url)).await {
            Ok(res) => Ok( res? ),
            Err(_) => Err( op_failed!("fetching {} timed out after {:?}", self.url, self.timeout))
        }
    }
}

/// where an acquired catalog came from
#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize)]
pub enum CatalogOrigin {
    Cache,
    Network,
    Fallback,
}

#[derive(Debug,Clone)]
pub struct Acquired {
    pub catalog: Catalog,
    pub origin: CatalogOrigin,
}

/// the element acquisition pipeline. Sources are tried in order:
///   1. the cache file (no freshness check - staleness is accepted)
///   2. the network source, persisting the response to the cache file if it parses
///   3. the embedded [`FALLBACK_TLE_DATA`]
pub struct ElementAcquisition<S> where S: CatalogSource {
    cache_path: PathBuf,
    source: S,
}

impl<S> ElementAcquisition<S> where S: CatalogSource {
    pub fn new (cache_path: impl AsRef<Path>, source: S) -> Self {
        ElementAcquisition { cache_path: cache_path.as_ref().to_path_buf(), source }
    }

    pub fn cache_path (&self) -> &Path {
        &self.cache_path
    }

    pub fn source (&self) -> &S {
        &self.source
    }

    /// obtain a catalog. This only fails with [`SatTrackError::EmptyCatalog`] if the embedded data is unusable
    pub async fn acquire (&self) -> Result<Acquired> {
        match self.read_cache() {
            Ok(Some(catalog)) => {
                info!("using {} cached element sets from {:?}", catalog.len(), self.cache_path);
                return Ok( Acquired { catalog, origin: CatalogOrigin::Cache } )
            }
            Ok(None) => debug!("no cached element sets in {:?}", self.cache_path),
            Err(e) => warn!("ignoring unusable element cache {:?}: {}", self.cache_path, e)
        }

        match self.fetch_and_store().await {
            Ok(catalog) => {
                info!("retrieved {} element sets from {}", catalog.len(), self.source.description());
                Ok( Acquired { catalog, origin: CatalogOrigin::Network } )
            }
            Err(e) => {
                warn!("{}, using embedded element sets", e);
                let catalog = fallback_catalog()?;
                Ok( Acquired { catalog, origin: CatalogOrigin::Fallback } )
            }
        }
    }

    /// remove the cache file so that the next [`acquire`](Self::acquire) goes to the network.
    /// Returns true if there was a cache file
    pub fn clear_cache (&self) -> Result<bool> {
        let removed = remove_existing_file( &self.cache_path)?;
        if removed { info!("removed element cache {:?}", self.cache_path) }
        Ok(removed)
    }

    fn read_cache (&self) -> Result<Option<Catalog>> {
        if !is_non_empty_file( &self.cache_path) {
            return Ok(None)
        }
        let text = filepath_contents_as_string( &self.cache_path)?;
        Ok( Some( parse_catalog( &text)?))
    }

    /// fetch, parse and then persist. Responses that do not parse never make it into the cache
    async fn fetch_and_store (&self) -> Result<Catalog> {
        let bytes = self.source.fetch().await
            .map_err( |e| SatTrackError::AcquisitionFailure( format!("{}: {}", self.source.description(), e)))?;

        let text = std::str::from_utf8( &bytes)
            .map_err( |e| SatTrackError::AcquisitionFailure( format!("non UTF-8 catalog: {}", e)))?;
        let catalog = parse_catalog( text)
            .map_err( |e| SatTrackError::AcquisitionFailure( format!("unparsable catalog: {}", e)))?;

        if let Err(e) = set_filepath_contents_atomic( &self.cache_path, &bytes) {
            warn!("failed to store element cache {:?}: {}", self.cache_path, e);
        }

        Ok(catalog)
    }
}

/// the parsed embedded element sets. Failure here is the only unrecoverable acquisition error
pub fn fallback_catalog () -> Result<Catalog> {
    match parse_catalog( FALLBACK_TLE_DATA) {
        Ok(catalog) if !catalog.is_empty() => Ok(catalog),
        _ => Err( SatTrackError::EmptyCatalog)
    }
}

/// a small set of element sets we can always fall back to. These are old so propagation accuracy
/// degrades over time, but geometry stays plausible
pub const FALLBACK_TLE_DATA: &str = "\
ISS (ZARYA)
1 25544U 98067A   23335.44285481  .00012930  00000+0  23436-3 0  9997
2 25544  51.6418 152.8821 0004881 229.7580 201.7785 15.49611897427529
NILESAT 201
1 36830U 10037A   23335.14512311 -.00000243  00000+0  00000+0 0  9993
2 36830   0.0261 245.8421 0002077 341.4455 309.6932  1.00270302 48121
BADR-4
1 29279U 06032A   23335.51698016 -.00000261  00000+0  00000+0 0  9990
2 29279   0.0427 210.4502 0003373 305.6045 147.3043  1.00271855 62512
TIANGONG
1 48274U 21035A   23335.41783012  .00031860  00000+0  38601-3 0  9996
2 48274  41.4736 351.4123 0003833 270.9590 139.2779 15.60037903145271
NAVSTAR 80 (USA 309)
1 46826U 20078A   23335.26801389 -.00000053  00000+0  00000+0 0  9993
2 46826  55.2640 160.9977 0009915 269.6902  90.2285  2.00555664 22011
HUBBLE
1 20580U 90037B   23334.83968157  .00001820  00000+0  72385-4 0  9995
2 20580  28.4695 107.3704 0002663 311.0111 142.1867 15.09305242612287
STARLINK-1008
1 44714U 19074B   23335.23456789  .00012345  00000+0  12345-3 0  9993
2 44714  53.0547 175.3002 0001234  90.1234 270.1234 15.06399672 12340
";
