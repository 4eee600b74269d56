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

//! two line element sets (TLEs) and the 3-line text format in which catalogs are distributed:
//! ```text
//! ISS (ZARYA)
//! 1 25544U 98067A   23335.44285481  .00012930  00000+0  23436-3 0  9997
//! 2 25544  51.6418 152.8821 0004881 229.7580 201.7785 15.49611897427529
//! ```

use std::fmt;
use serde::{Deserialize,Serialize};
use tracing::{debug,warn};
use crate::errors::{SatTrackError,Result,tle_error};

/// minimum length of a fixed format element line (the checksum is at index 68)
pub const TLE_LINE_LEN: usize = 69;

/// a named satellite with its two element lines. Records are validated on construction and
/// immutable afterwards, the element lines are kept verbatim so that they can be re-serialized
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct ElementRecord {
    name: String,
    line1: String,
    line2: String,
    catalog_number: u32,
}

impl ElementRecord {
    pub fn new (name: impl AsRef<str>, line1: impl ToString, line2: impl ToString) -> Result<Self> {
        let name = strip_name( name.as_ref()).to_string();
        let line1 = line1.to_string();
        let line2 = line2.to_string();

        if name.is_empty() { return Err( tle_error!("empty satellite name")) }
        check_element_line( &line1, '1')?;
        check_element_line( &line2, '2')?;

        let catalog_number = parse_catalog_number( &line1)?;
        let cn2 = parse_catalog_number( &line2)?;
        if catalog_number != cn2 {
            return Err( tle_error!("catalog number mismatch for {}: {} != {}", name, catalog_number, cn2))
        }

        let rec = ElementRecord { name, line1, line2, catalog_number };
        if !rec.checksum_valid() {
            warn!("element checksum mismatch for {} ({})", rec.name, rec.catalog_number);
        }
        Ok(rec)
    }

    pub fn name (&self) -> &str { &self.name }
    pub fn line1 (&self) -> &str { &self.line1 }
    pub fn line2 (&self) -> &str { &self.line2 }

    /// the NORAD catalog number (columns 3-7 of both lines)
    pub fn catalog_number (&self) -> u32 { self.catalog_number }

    /// do the trailing modulo-10 checksums of both lines match their contents
    pub fn checksum_valid (&self) -> bool {
        line_checksum_valid( &self.line1) && line_checksum_valid( &self.line2)
    }

    /// the 3-line text representation of this record (with trailing newline)
    pub fn to_tle_text (&self) -> String {
        format!("{}\n{}\n{}\n", self.name, self.line1, self.line2)
    }
}

impl fmt::Display for ElementRecord {
    fn fmt (&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "{} ({})", self.name, self.catalog_number)
    }
}

/// an ordered list of element records, in the order in which they were read
pub type Catalog = Vec<ElementRecord>;

/// parse a 3-line catalog. Names without element lines are skipped, element lines that do not come
/// in valid `1`/`2` pairs are errors. A text that does not contain any element set is an error, which is
/// how we detect that a server responded with something other than a catalog
pub fn parse_catalog (text: &str) -> Result<Catalog> {
    let lines: Vec<&str> = text.lines()
        .map( |l| l.trim_end())
        .filter( |l| !l.is_empty())
        .collect();

    let mut catalog = Catalog::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];

        if is_element_line( line, '1') {
            let Some(line2) = lines.get(i+1).filter( |l| is_element_line( l, '2')) else {
                return Err( tle_error!("element line 1 without line 2: {}", line))
            };

            let name = if i > 0 && !is_any_element_line( lines[i-1]) {
                lines[i-1].to_string()
            } else {
                // bare 2-line set, use the catalog number as the name
                let cn = parse_catalog_number( line)?;
                debug!("unnamed element set {}", cn);
                cn.to_string()
            };

            catalog.push( ElementRecord::new( name, line, line2)?);
            i += 2;

        } else if is_element_line( line, '2') {
            return Err( tle_error!("element line 2 without line 1: {}", line))

        } else {
            i += 1; // name line, picked up by the next element line
        }
    }

    if catalog.is_empty() {
        Err( tle_error!("no element sets found"))
    } else {
        Ok(catalog)
    }
}

/// serialize a catalog back into its 3-line text format
pub fn to_catalog_text (catalog: &[ElementRecord]) -> String {
    catalog.iter().map( |r| r.to_tle_text()).collect()
}

/// the modulo-10 checksum of the first 68 chars of an element line: digits count as their value,
/// '-' counts as 1, everything else as 0
pub fn tle_checksum (line: &str) -> u32 {
    line.bytes().take( TLE_LINE_LEN - 1).fold( 0, |acc, b| {
        match b {
            b'0'..=b'9' => acc + (b - b'0') as u32,
            b'-' => acc + 1,
            _ => acc
        }
    }) % 10
}

pub fn line_checksum_valid (line: &str) -> bool {
    match line.as_bytes().get( TLE_LINE_LEN - 1) {
        Some(c) if c.is_ascii_digit() => (c - b'0') as u32 == tle_checksum(line),
        _ => false
    }
}

//--- internal helpers

/// some sources use the "0 NAME" variant of 3-line sets
fn strip_name (name: &str) -> &str {
    let name = name.trim();
    name.strip_prefix("0 ").map( |n| n.trim_start()).unwrap_or(name)
}

fn is_element_line (line: &str, nr: char) -> bool {
    let mut cs = line.chars();
    line.len() >= TLE_LINE_LEN && cs.next() == Some(nr) && cs.next() == Some(' ')
}

fn is_any_element_line (line: &str) -> bool {
    is_element_line( line, '1') || is_element_line( line, '2')
}

fn check_element_line (line: &str, nr: char) -> Result<()> {
    if !line.is_ascii() {
        Err( tle_error!("non-ASCII element line {}: {}", nr, line))
    } else if !is_element_line( line, nr) {
        Err( tle_error!("malformed element line {}: {}", nr, line))
    } else {
        Ok(())
    }
}

/// leading letters of Alpha-5 catalog numbers ('I' and 'O' are not used), starting at 10
const ALPHA5_LETTERS: &str = "ABCDEFGHJKLMNPQRSTUVWXYZ";

/// catalog numbers are either up to 5 digits or Alpha-5 (a letter for the 10000s followed by 4 digits,
/// e.g. "B5544" is 115544)
fn parse_catalog_number (line: &str) -> Result<u32> {
    let field = line.get(2..7).ok_or_else( || tle_error!("element line too short: {}", line))?;
    let invalid = || tle_error!("invalid catalog number '{}'", field);

    let mut cs = field.chars();
    match cs.next() {
        Some(c) if c.is_ascii_alphabetic() => {
            let hi = ALPHA5_LETTERS.find(c).ok_or_else( invalid)? as u32 + 10;
            let digits = cs.as_str();
            if digits.len() != 4 || !digits.bytes().all( |b| b.is_ascii_digit()) { return Err( invalid()) }
            let lo = digits.parse::<u32>().map_err( |_| invalid())?;
            Ok( hi * 10000 + lo)
        }
        _ => field.trim().parse::<u32>().map_err( |_| invalid())
    }
}
