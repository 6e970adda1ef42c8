// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2024 Jonathan Lee
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License version 3
// as published by the Free Software Foundation.
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see https://www.gnu.org/licenses/.

//! Tag block parsing.
//!
//! Series identifiers carry their attributes in a brace block such as
//! `requests{province: 北京, isp: telecom}`. The block is turned into an
//! ordered [`TagSet`].

use crate::record::RawRecord;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::debug;

static TAG_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{.+\}").expect("tag block pattern is valid"));

/// Ordered attribute list. Keys are unique and keep the position of their first
/// assignment; re-assigning a key replaces its value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TagSet {
    pairs: Vec<(String, String)>,
}

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.pairs.push((key, value)),
        }
    }
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
    pub fn len(&self) -> usize {
        self.pairs.len()
    }
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(_, v)| v.as_str())
    }

    /// Values of every attribute except `excluded`, ordered by attribute name.
    pub fn sorted_values_excluding(&self, excluded: &str) -> Vec<&str> {
        let mut pairs: Vec<_> = self.iter().filter(|(k, _)| *k != excluded).collect();
        pairs.sort_by(|a, b| a.0.cmp(b.0));
        pairs.into_iter().map(|(_, v)| v).collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TagSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tags = TagSet::new();
        for (k, v) in iter {
            tags.insert(k, v);
        }
        tags
    }
}

/// A parsed record: its tags and the value of its first sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaggedValue {
    pub tags: TagSet,
    pub value: f64,
}

impl TaggedValue {
    pub fn new(tags: TagSet, value: f64) -> Self {
        Self { tags, value }
    }
}

/// Extracts the tag block from a series identifier.
///
/// Returns `None` when the identifier has no brace block; such records carry no
/// attributes and are dropped by callers.
pub fn parse_target(identifier: &str) -> Option<TagSet> {
    let block = TAG_BLOCK.find(identifier)?.as_str();
    let inner: String = block.chars().filter(|c| *c != '{' && *c != '}').collect();
    let mut tags = TagSet::new();
    for cell in inner.split(',') {
        if cell.trim().is_empty() {
            continue;
        }
        let (key, value) = cell.split_once(':').unwrap_or((cell, ""));
        tags.insert(key.trim(), value.trim());
    }
    Some(tags)
}

pub fn parse_record(record: &RawRecord) -> Option<TaggedValue> {
    let Some(tags) = parse_target(&record.target) else {
        debug!(identifier = %record.target, "dropping record without tag block");
        return None;
    };
    Some(TaggedValue::new(tags, record.first_value()))
}

pub fn parse_batch(records: &[RawRecord]) -> Vec<TaggedValue> {
    records.iter().filter_map(parse_record).collect()
}
