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

//! RON based configuration lookup and the global sattrack directories.
//!
//! Config files are looked up in this order:
//!   1. `$SATTRACK_HOME/configs/<crate>/<file>`
//!   2. `~/.sattrack/configs/<crate>/<file>`
//!   3. `<workspace>/<crate>/configs/<file>` (the defaults that are kept in the source repo)
//!
//! The root dir (parent of `cache/`) is `$SATTRACK_ROOT` or `~/.sattrack`

use std::{env, path::{Path,PathBuf}, sync::OnceLock};
use serde::Deserialize;
use tracing::debug;
use crate::{define_error, fs::filepath_contents};

pub const CONFIGS: &'static str = "configs";

define_error!{ pub ConfigError =
    IOError(#[from] std::io::Error) : "IO error: {0}",
    RonError(#[from] ron::error::SpannedError) : "RON parse error: {0}",
    ResourceNotFoundError(String) : "config not found: {0}"
}

pub type Result<T> = std::result::Result<T, ConfigError>;

static ROOT_DIR: OnceLock<PathBuf> = OnceLock::new();
static CACHE_DIR: OnceLock<PathBuf> = OnceLock::new();

/// the global root dir: `$SATTRACK_ROOT` or `~/.sattrack` (falls back to the system temp dir if there is no HOME)
pub fn root_dir()->&'static PathBuf {
    ROOT_DIR.get_or_init(|| {
        if let Ok(root) = env::var("SATTRACK_ROOT") {
            PathBuf::from(root)
        } else if let Ok(home) = env::var("HOME") {
            Path::new(&home).join(".sattrack")
        } else {
            env::temp_dir().join("sattrack")
        }
    })
}

/// the global cache dir: `<root>/cache`. Note this does not create the directory
pub fn cache_dir()->&'static PathBuf {
    CACHE_DIR.get_or_init(|| root_dir().join("cache"))
}

/// the crate cache dir of the caller: `<root>/cache/<crate>`.
/// This is a macro so that it uses the crate name of the caller source
#[macro_export]
macro_rules! pkg_cache_dir {
    () => {
        $crate::config::cache_dir().join( env!("CARGO_PKG_NAME"))
    }
}

pub fn find_config_file (resource_crate: &str, filename: &str) -> Option<PathBuf> {
    let mut candidates: Vec<PathBuf> = Vec::with_capacity(3);

    if let Ok(home) = env::var("SATTRACK_HOME") {
        candidates.push( Path::new(&home).join(CONFIGS).join(resource_crate).join(filename));
    }
    if let Ok(usr_home) = env::var("HOME") {
        candidates.push( Path::new(&usr_home).join(".sattrack").join(CONFIGS).join(resource_crate).join(filename));
    }
    if let Some(ws) = get_workspace_dir() {
        candidates.push( ws.join(resource_crate).join(CONFIGS).join(filename));
    }

    candidates.into_iter().find( |p| p.is_file())
}

/// load a RON config for `resource_crate`, using the lookup order described above.
/// Explicit paths (containing a path separator) are loaded directly
pub fn load_config<C> (resource_crate: &str, filename: &str) -> Result<C> where C: for <'a> Deserialize<'a> {
    let path = Path::new(filename);
    if path.components().count() > 1 || path.is_absolute() {
        return load_config_path(path)
    }

    match find_config_file( resource_crate, filename) {
        Some(path) => {
            debug!("loading config {:?}", path);
            load_config_path(&path)
        }
        None => Err( ConfigError::ResourceNotFoundError( filename.to_string()))
    }
}

pub fn load_config_path<C,P> (path: P) -> Result<C> where C: for <'a> Deserialize<'a>, P: AsRef<Path> {
    let data = filepath_contents(&path.as_ref())?;
    Ok( ron::de::from_bytes( data.as_slice())? )
}

/// the workspace root is the first parent of CARGO_MANIFEST_DIR that has a Cargo.toml with a [workspace] section
fn get_workspace_dir()->Option<PathBuf> {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").ok().map(PathBuf::from)
        .or_else( || option_env!("CARGO_MANIFEST_DIR").map(PathBuf::from))?;

    manifest_dir.ancestors()
        .find( |p| {
            std::fs::read_to_string( p.join("Cargo.toml"))
                .map( |s| s.contains("[workspace]"))
                .unwrap_or(false)
        })
        .map( |p| p.to_path_buf())
}
