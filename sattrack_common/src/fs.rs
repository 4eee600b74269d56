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

use std::fs::{self,File};
use std::io::{self,Read,Write,ErrorKind};
use std::path::{Path,PathBuf};

use crate::io_error;

type Result<T> = std::result::Result<T,std::io::Error>;

pub fn ensure_dir (path: impl AsRef<Path>)->io::Result<()> {
    let path = path.as_ref();
    if !path.is_dir() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

pub fn is_non_empty_file (path: impl AsRef<Path>)->bool {
    fs::metadata(path).map( |md| md.is_file() && md.len() > 0).unwrap_or(false)
}

pub fn filepath_contents <P: AsRef<Path>> (path: &P) -> Result<Vec<u8>> {
    let mut file = File::open(path)?;
    let len = file.metadata()?.len();
    if len > 0 {
        let mut contents: Vec<u8> = Vec::with_capacity(len as usize);
        file.read_to_end(&mut contents)?;
        Ok(contents)

    } else { Err(io_error!(ErrorKind::Other, "file empty: {:?}", path.as_ref())) }
}

pub fn filepath_contents_as_string <P: AsRef<Path>> (path: &P) -> Result<String> {
    let bytes = filepath_contents(path)?;
    String::from_utf8(bytes).map_err(|e| io_error!(ErrorKind::InvalidData, "file not UTF-8: {:?} ({e})", path.as_ref()))
}

/// write `data` to a temporary sibling of `path` and rename it once complete so that readers
/// never see a partially written file
pub fn set_filepath_contents_atomic (path: impl AsRef<Path>, data: &[u8]) -> Result<()> {
    let path = path.as_ref();
    if let Some(dir) = path.parent().filter( |d| !d.as_os_str().is_empty()) {
        ensure_dir(dir)?;
    }

    let tmp_path = tmp_sibling(path);
    {
        let mut file = File::create(&tmp_path)?;
        file.write_all(data)?;
        file.flush()?;
    }
    fs::rename( &tmp_path, path)
}

/// remove file if it exists. Returns true if there was a file to remove
pub fn remove_existing_file (path: impl AsRef<Path>) -> Result<bool> {
    match fs::remove_file( path.as_ref()) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e)
    }
}

fn tmp_sibling (path: &Path)->PathBuf {
    let mut fname = path.file_name().map( |s| s.to_os_string()).unwrap_or_default();
    fname.push(".tmp");
    path.with_file_name(fname)
}
