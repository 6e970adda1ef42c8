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

use crate::config::DEFAULT_TOP_N;
use crate::tags::TaggedValue;
use serde::Serialize;
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntry {
    pub label: String,
    pub value: f64,
}

impl RankedEntry {
    /// Axis caption, e.g. `北京 : 500`.
    pub fn axis_label(&self) -> String {
        format!("{} : {}", self.label, self.value)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TopNRanker {
    limit: usize,
}

impl Default for TopNRanker {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_N)
    }
}

/// Descending order with NaN after every number.
fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a)
        .unwrap_or_else(|| a.is_nan().cmp(&b.is_nan()))
}

impl TopNRanker {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Keeps the `limit` largest values and returns them smallest first, so a
    /// horizontal bar chart draws the largest bar on top.
    pub fn rank(&self, records: &[TaggedValue]) -> Vec<RankedEntry> {
        let mut ordered: Vec<&TaggedValue> = records.iter().collect();
        // stable: equal values keep input order
        ordered.sort_by(|a, b| descending(a.value, b.value));
        ordered.truncate(self.limit);
        ordered
            .into_iter()
            .rev()
            .map(|record| RankedEntry {
                label: record.tags.values().collect::<Vec<_>>().join("-"),
                value: record.value,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::TagSet;

    fn record(name: &str, value: f64) -> TaggedValue {
        TaggedValue::new([("province", name)].into_iter().collect::<TagSet>(), value)
    }

    #[test]
    fn keeps_ten_largest_ascending() {
        let values = [5.0, 90.0, 1.0, 40.0, 12.0, 77.0, 3.0, 60.0, 88.0, 2.0, 99.0, 33.0];
        let records: Vec<_> = values
            .iter()
            .enumerate()
            .map(|(i, v)| record(&format!("r{i}"), *v))
            .collect();
        let ranked = TopNRanker::default().rank(&records);
        let got: Vec<f64> = ranked.iter().map(|e| e.value).collect();
        assert_eq!(
            got,
            vec![3.0, 5.0, 12.0, 33.0, 40.0, 60.0, 77.0, 88.0, 90.0, 99.0]
        );
    }

    #[test]
    fn equal_values_reverse_input_order() {
        let records = vec![record("first", 5.0), record("second", 5.0), record("top", 9.0)];
        let ranked = TopNRanker::default().rank(&records);
        let labels: Vec<_> = ranked.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["second", "first", "top"]);
    }

    #[test]
    fn short_and_empty_inputs() {
        let ranker = TopNRanker::new(10);
        assert!(ranker.rank(&[]).is_empty());
        let ranked = ranker.rank(&[record("a", 1.0), record("b", 2.0)]);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[1].label, "b");
    }

    #[test]
    fn nan_values_rank_last() {
        let ranked = TopNRanker::new(2).rank(&[
            record("missing", f64::NAN),
            record("low", 1.0),
            record("high", 2.0),
        ]);
        let labels: Vec<_> = ranked.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["low", "high"]);
    }

    #[test]
    fn label_joins_all_values_in_tag_order() {
        let tags: TagSet = [("province", "北京"), ("isp", "telecom")].into_iter().collect();
        let ranked = TopNRanker::default().rank(&[TaggedValue::new(tags, 500.0)]);
        assert_eq!(ranked[0].label, "北京-telecom");
        assert_eq!(ranked[0].axis_label(), "北京-telecom : 500");
    }
}
