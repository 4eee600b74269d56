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

//! selecting the tracked fleet from a catalog with an ordered list of matching rules

use serde::{Deserialize,Serialize};
use tracing::debug;
use crate::{TrackerConfig, tle::ElementRecord};

pub const DEFAULT_CONSTELLATION_MARKER: &str = "STARLINK";

/// a declared matching rule. Matching is by case sensitive substring of the record name
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub enum TargetRule {
    /// the first catalog record whose name contains the pattern
    FirstMatch(String),

    /// up to `cap` catalog records whose names contain `marker`, in catalog order
    Constellation { marker: String, cap: usize },
}

impl TargetRule {
    pub fn matches (&self, name: &str) -> bool {
        match self {
            TargetRule::FirstMatch(pattern) => name.contains( pattern.as_str()),
            TargetRule::Constellation { marker, .. } => name.contains( marker.as_str()),
        }
    }
}

/// the selected satellites. Names are unique, order is rule order and catalog order within a rule
#[derive(Debug,Clone,Default,PartialEq)]
pub struct Fleet {
    members: Vec<ElementRecord>,
}

impl Fleet {
    pub fn new () -> Self { Fleet::default() }

    pub fn len (&self) -> usize { self.members.len() }
    pub fn is_empty (&self) -> bool { self.members.is_empty() }
    pub fn iter (&self) -> impl Iterator<Item=&ElementRecord> { self.members.iter() }
    pub fn members (&self) -> &[ElementRecord] { &self.members }

    pub fn contains (&self, name: &str) -> bool {
        self.members.iter().any( |r| r.name() == name)
    }

    /// lookup by exact name
    pub fn get (&self, name: &str) -> Option<&ElementRecord> {
        self.members.iter().find( |r| r.name() == name)
    }

    pub fn names (&self) -> Vec<&str> {
        self.members.iter().map( |r| r.name()).collect()
    }

    /// add a clone of `rec` unless there already is a member with the same name
    fn push_unique (&mut self, rec: &ElementRecord) -> bool {
        if self.contains( rec.name()) {
            false
        } else {
            self.members.push( rec.clone());
            true
        }
    }
}

impl<'a> IntoIterator for &'a Fleet {
    type Item = &'a ElementRecord;
    type IntoIter = std::slice::Iter<'a, ElementRecord>;

    fn into_iter (self) -> Self::IntoIter {
        self.members.iter()
    }
}

/// an ordered list of [`TargetRule`]s
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct FleetSelector {
    rules: Vec<TargetRule>,
}

impl FleetSelector {
    /// one `FirstMatch` rule per target (in order), followed by the constellation rule
    pub fn new<T: AsRef<str>> (targets: &[T], marker: &str, cap: usize) -> Self {
        let mut rules: Vec<TargetRule> = targets.iter().map( |t| TargetRule::FirstMatch( t.as_ref().to_string())).collect();
        rules.push( TargetRule::Constellation { marker: marker.to_string(), cap });
        FleetSelector { rules }
    }

    pub fn from_rules (rules: Vec<TargetRule>) -> Self {
        FleetSelector { rules }
    }

    pub fn from_config (config: &TrackerConfig) -> Self {
        FleetSelector::new( &config.targets, &config.constellation_marker, config.constellation_cap)
    }

    pub fn rules (&self) -> &[TargetRule] {
        &self.rules
    }

    /// apply all rules in order. Duplicates (by exact name) are dropped before they count against
    /// a constellation cap. Rules without matches are skipped
    pub fn select (&self, catalog: &[ElementRecord]) -> Fleet {
        let mut fleet = Fleet::new();

        for rule in &self.rules {
            match rule {
                TargetRule::FirstMatch(pattern) => {
                    match catalog.iter().find( |r| rule.matches( r.name())) {
                        Some(rec) => { fleet.push_unique( rec); }
                        None => debug!("no catalog match for target {:?}", pattern)
                    }
                }
                TargetRule::Constellation { marker, cap } => {
                    let mut n = 0;
                    for rec in catalog.iter().filter( |r| rule.matches( r.name())) {
                        if n >= *cap { break }
                        if fleet.push_unique( rec) { n += 1 }
                    }
                    if n == 0 { debug!("no catalog match for constellation {:?}", marker) }
                }
            }
        }

        fleet
    }
}

/// select targets (first match each) and up to `constellation_cap` members of the default constellation
pub fn select<T: AsRef<str>> (catalog: &[ElementRecord], targets: &[T], constellation_cap: usize) -> Fleet {
    FleetSelector::new( targets, DEFAULT_CONSTELLATION_MARKER, constellation_cap).select( catalog)
}
