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

mod common;

use std::{fs, time::{Duration,Instant}};
use sattrack_orbital::{
    errors::SatTrackError,
    acquisition::{CatalogOrigin, CatalogSource, ElementAcquisition, HttpCatalogSource, FALLBACK_TLE_DATA},
    tle::parse_catalog
};
use common::{MockResponse, MockSource, catalog_text_with_constellation, test_dir};

#[tokio::test]
async fn test_cache_hit_does_not_fetch() {
    let dir = test_dir("cache_hit");
    let cache = dir.join("active_sats.txt");
    fs::write( &cache, FALLBACK_TLE_DATA).unwrap();

    let acquisition = ElementAcquisition::new( &cache, MockSource::serving( &catalog_text_with_constellation(3)));
    let acquired = acquisition.acquire().await.unwrap();

    assert_eq!( acquired.origin, CatalogOrigin::Cache);
    assert_eq!( acquired.catalog.len(), 7);
    assert_eq!( acquisition.source().calls(), 0);
}

#[tokio::test]
async fn test_network_result_is_cached() {
    let dir = test_dir("network");
    let cache = dir.join("sub").join("active_sats.txt");
    let text = catalog_text_with_constellation(3);

    let acquisition = ElementAcquisition::new( &cache, MockSource::serving( &text));
    let acquired = acquisition.acquire().await.unwrap();
    assert_eq!( acquired.origin, CatalogOrigin::Network);
    assert_eq!( acquired.catalog.len(), 10);
    assert_eq!( fs::read_to_string( &cache).unwrap(), text);

    // second acquisition comes from the cache
    let acquired = acquisition.acquire().await.unwrap();
    assert_eq!( acquired.origin, CatalogOrigin::Cache);
    assert_eq!( acquisition.source().calls(), 1);
}

#[tokio::test]
async fn test_http_error_falls_back() {
    let dir = test_dir("http_500");
    let cache = dir.join("active_sats.txt");

    let acquisition = ElementAcquisition::new( &cache, MockSource::failing(500));
    let acquired = acquisition.acquire().await.unwrap();

    assert_eq!( acquired.origin, CatalogOrigin::Fallback);
    assert!( acquired.catalog.iter().any( |r| r.name() == "ISS (ZARYA)"));
    assert!( !cache.exists());
}

#[tokio::test]
async fn test_unparsable_response_is_not_cached() {
    let dir = test_dir("garbage");
    let cache = dir.join("active_sats.txt");

    let acquisition = ElementAcquisition::new( &cache, MockSource::serving("<html>rate limited</html>"));
    let acquired = acquisition.acquire().await.unwrap();

    assert_eq!( acquired.origin, CatalogOrigin::Fallback);
    assert!( !cache.exists());
}

#[tokio::test]
async fn test_corrupt_cache_is_replaced() {
    let dir = test_dir("corrupt_cache");
    let cache = dir.join("active_sats.txt");
    fs::write( &cache, "this is not a catalog").unwrap();

    let acquisition = ElementAcquisition::new( &cache, MockSource::serving( FALLBACK_TLE_DATA));
    let acquired = acquisition.acquire().await.unwrap();

    assert_eq!( acquired.origin, CatalogOrigin::Network);
    assert_eq!( parse_catalog( &fs::read_to_string( &cache).unwrap()).unwrap().len(), 7);
}

#[tokio::test]
async fn test_clear_cache_forces_fetch() {
    let dir = test_dir("clear_cache");
    let cache = dir.join("active_sats.txt");
    let source = MockSource::new( vec![
        MockResponse::Text( FALLBACK_TLE_DATA.to_string()),
        MockResponse::Text( catalog_text_with_constellation(2)),
    ]);

    let acquisition = ElementAcquisition::new( &cache, source);
    assert_eq!( acquisition.acquire().await.unwrap().catalog.len(), 7);

    assert!( acquisition.clear_cache().unwrap());
    assert!( !acquisition.clear_cache().unwrap());

    let acquired = acquisition.acquire().await.unwrap();
    assert_eq!( acquired.origin, CatalogOrigin::Network);
    assert_eq!( acquired.catalog.len(), 9);
    assert_eq!( acquisition.source().calls(), 2);
}

#[tokio::test]
async fn test_fetch_timeout() {
    // a server that accepts connections but never responds
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/gp.php?GROUP=active&FORMAT=tle", listener.local_addr().unwrap());
    tokio::spawn( async move {
        let mut conns = Vec::new();
        while let Ok((sock,_)) = listener.accept().await { conns.push(sock); }
    });

    let source = HttpCatalogSource::new( &url, Duration::from_millis(300)).unwrap();
    let t = Instant::now();
    let res = source.fetch().await;
    assert!( res.is_err());
    assert!( t.elapsed() < Duration::from_secs(5));

    let dir = test_dir("timeout");
    let acquisition = ElementAcquisition::new( dir.join("active_sats.txt"), source);
    assert_eq!( acquisition.acquire().await.unwrap().origin, CatalogOrigin::Fallback);
}

#[tokio::test]
async fn test_unreachable_host() {
    let source = HttpCatalogSource::new( "http://127.0.0.1:1/catalog.txt", Duration::from_secs(2)).unwrap();
    match source.fetch().await {
        Err(SatTrackError::NetError(_)) | Err(SatTrackError::OpFailedError(_)) => {}
        other => panic!("unexpected fetch result {:?}", other.map( |b| b.len()))
    }
}
