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

use std::path::Path;
use sattrack_common::datetime::{hours, minutes, secs};
use sattrack_orbital::{CONFIG_FILE, TrackerConfig, load_tracker_config};
use common::test_dir;

const CUSTOM_CONFIG: &str = r#"
TrackerConfig(
    catalog_url: "http://localhost:8080/active.txt",
    fetch_timeout: "2s",
    cache_file: "custom_sats.txt",
    targets: [ "HUBBLE" ],
    constellation_marker: "ONEWEB",
    constellation_cap: 2,
    min_elevation_deg: 5.0,
    pass_window: "12h",
    coarse_step: "1m",
    sites: [
        ( name: "Reykjavik", latitude_deg: 64.1466, longitude_deg: -21.9426 ),
    ],
    default_site: "reykjavik",
)
"#;

fn shipped_config_path () -> String {
    format!("{}/configs/{}", env!("CARGO_MANIFEST_DIR"), CONFIG_FILE)
}

fn write_config (dir: &str, contents: &str) -> String {
    let path = test_dir(dir).join("tracker.ron");
    std::fs::write( &path, contents).unwrap();
    path.to_string_lossy().to_string()
}

#[test]
fn test_shipped_config_matches_defaults() {
    let config = load_tracker_config( &shipped_config_path()).unwrap();
    println!("{config:?}");

    assert_eq!( config.fetch_timeout, secs(5));
    assert_eq!( config.pass_window, hours(24));
    assert_eq!( config.coarse_step, secs(30));
    assert_eq!( config, TrackerConfig::default());
}

#[test]
fn test_lookup_by_name() {
    // without overrides in SATTRACK_HOME or ~/.sattrack this resolves to the shipped config
    let config = load_tracker_config( CONFIG_FILE).unwrap();
    assert_eq!( config.targets, TrackerConfig::default().targets);
    assert_eq!( config.sites.len(), 6);
}

#[test]
fn test_missing_config_uses_defaults() {
    let config = load_tracker_config( "no_such_tracker_config.ron").unwrap();
    assert_eq!( config, TrackerConfig::default());

    // explicit paths have to exist
    let missing = test_dir("config_missing").join("tracker.ron");
    assert!( load_tracker_config( &missing.to_string_lossy()).is_err());
}

#[test]
fn test_custom_config() {
    let path = write_config( "config_custom", CUSTOM_CONFIG);
    let config = load_tracker_config( &path).unwrap();

    assert_eq!( config.fetch_timeout, secs(2));
    assert_eq!( config.pass_window, hours(12));
    assert_eq!( config.coarse_step, minutes(1));
    assert_eq!( config.targets, vec!["HUBBLE".to_string()]);
    assert_eq!( config.constellation_cap, 2);

    let observer = config.default_observer().unwrap();
    assert_eq!( observer.latitude_deg, 64.1466);
    assert_eq!( observer.longitude_deg, -21.9426);
}

#[test]
fn test_invalid_configs() {
    let path = write_config( "config_bad_latitude", &CUSTOM_CONFIG.replace("64.1466", "94.1466"));
    assert!( load_tracker_config( &path).is_err());

    let path = write_config( "config_bad_duration", &CUSTOM_CONFIG.replace(r#""12h""#, r#""twelve hours""#));
    assert!( load_tracker_config( &path).is_err());

    let path = write_config( "config_syntax", "TrackerConfig( catalog_url: ");
    assert!( load_tracker_config( &path).is_err());
}

#[test]
fn test_site_lookup() {
    let config = TrackerConfig::default();

    assert_eq!( config.site("new york").map( |s| s.name.as_str()), Some("New York"));
    assert_eq!( config.site("CAIRO").map( |s| s.name.as_str()), Some("Cairo"));
    assert!( config.site("Atlantis").is_none());

    let observer = config.default_observer().unwrap();
    assert_eq!( observer.latitude_deg, 30.0444);
    assert_eq!( observer.longitude_deg, 31.2357);

    let mut config = TrackerConfig::default();
    config.default_site = "Atlantis".to_string();
    assert!( config.default_observer().is_err());
}

#[test]
fn test_cache_path() {
    let mut config = TrackerConfig::default();

    let relative = config.cache_path();
    assert!( relative.starts_with( sattrack_common::config::cache_dir()));
    assert!( relative.ends_with( Path::new("sattrack_orbital").join("active_sats.txt")));

    let absolute = test_dir("config_cache").join("sats.txt");
    config.cache_file = absolute.clone();
    assert_eq!( config.cache_path(), absolute);
}
