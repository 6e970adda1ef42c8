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

//! Per-province series aggregation for choropleth maps.
//!
//! Records are grouped by the values of every attribute other than the province
//! attribute. Each group becomes one series holding a cell for every reference
//! province. Series live for the lifetime of the aggregator; every batch first
//! clears all cells, so provinces missing from a refresh show no data instead
//! of stale values.

use crate::config::{PanelConfig, DEFAULT_PROVINCE_KEY, DEFAULT_SERIES_NAME};
use crate::tags::TaggedValue;
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionValue {
    pub name: String,
    /// NaN when the province had no record in the latest batch.
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapSeries {
    pub name: String,
    pub data: Vec<RegionValue>,
}

impl MapSeries {
    fn blank(name: &str, provinces: &[String]) -> Self {
        Self {
            name: name.to_string(),
            data: provinces
                .iter()
                .map(|p| RegionValue {
                    name: p.clone(),
                    value: f64::NAN,
                })
                .collect(),
        }
    }
    fn clear(&mut self) {
        for cell in &mut self.data {
            cell.value = f64::NAN;
        }
    }
    pub fn value_of(&self, province: &str) -> Option<f64> {
        self.data
            .iter()
            .find(|cell| cell.name == province)
            .map(|cell| cell.value)
    }
    /// Provinces holding a number in the latest batch.
    pub fn filled(&self) -> impl Iterator<Item = &RegionValue> {
        self.data.iter().filter(|cell| !cell.value.is_nan())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub accepted: usize,
    pub rejected: usize,
    pub created_series: usize,
}

#[derive(Debug, Clone)]
pub struct AggregatorOptions {
    pub province_key: String,
    pub default_series: String,
}
impl Default for AggregatorOptions {
    fn default() -> Self {
        Self {
            province_key: DEFAULT_PROVINCE_KEY.to_string(),
            default_series: DEFAULT_SERIES_NAME.to_string(),
        }
    }
}
impl From<&PanelConfig> for AggregatorOptions {
    fn from(config: &PanelConfig) -> Self {
        Self {
            province_key: config.province_key.clone(),
            default_series: config.default_series.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProvinceSeriesAggregator {
    provinces: Vec<String>,
    province_index: HashMap<String, usize>,
    options: AggregatorOptions,
    series: IndexMap<String, MapSeries>,
}

impl ProvinceSeriesAggregator {
    pub fn new(provinces: Vec<String>, options: AggregatorOptions) -> Self {
        let province_index = provinces
            .iter()
            .enumerate()
            .map(|(idx, p)| (p.clone(), idx))
            .collect();
        Self {
            provinces,
            province_index,
            options,
            series: IndexMap::new(),
        }
    }
    pub fn from_config(config: &PanelConfig) -> Self {
        Self::new(config.provinces.clone(), AggregatorOptions::from(config))
    }
    pub fn provinces(&self) -> &[String] {
        &self.provinces
    }

    /// Composite series name: non-province values ordered by attribute name,
    /// joined with `-`.
    pub fn series_key(&self, record: &TaggedValue) -> String {
        let values = record
            .tags
            .sorted_values_excluding(&self.options.province_key);
        if values.is_empty() {
            self.options.default_series.clone()
        } else {
            values.join("-")
        }
    }

    pub fn apply_batch(&mut self, records: &[TaggedValue]) -> BatchSummary {
        let mut summary = BatchSummary::default();
        for series in self.series.values_mut() {
            series.clear();
        }
        for record in records {
            let Some(province) = record.tags.get(&self.options.province_key) else {
                debug!("dropping record without '{}' tag", self.options.province_key);
                summary.rejected += 1;
                continue;
            };
            let Some(&cell_idx) = self.province_index.get(province) else {
                debug!(province, "dropping record for unknown province");
                summary.rejected += 1;
                continue;
            };
            let key = self.series_key(record);
            let provinces = &self.provinces;
            let series = self.series.entry(key.clone()).or_insert_with(|| {
                summary.created_series += 1;
                MapSeries::blank(&key, provinces)
            });
            series.data[cell_idx].value = record.value;
            summary.accepted += 1;
        }
        info!(
            accepted = summary.accepted,
            rejected = summary.rejected,
            created = summary.created_series,
            total_series = self.series.len(),
            "applied map batch"
        );
        summary
    }

    pub fn series(&self) -> impl Iterator<Item = &MapSeries> {
        self.series.values()
    }
    pub fn get(&self, name: &str) -> Option<&MapSeries> {
        self.series.get(name)
    }
    pub fn len(&self) -> usize {
        self.series.len()
    }
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
    /// Series names in first-seen order.
    pub fn legend(&self) -> Vec<&str> {
        self.series.keys().map(String::as_str).collect()
    }
    pub fn legend_visible(&self) -> bool {
        self.series.len() > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::TagSet;

    fn record(pairs: &[(&str, &str)], value: f64) -> TaggedValue {
        TaggedValue::new(pairs.iter().copied().collect::<TagSet>(), value)
    }

    fn aggregator() -> ProvinceSeriesAggregator {
        ProvinceSeriesAggregator::new(
            vec!["P".to_string(), "Q".to_string(), "R".to_string()],
            AggregatorOptions::default(),
        )
    }

    #[test]
    fn composite_key_orders_by_attribute_name() {
        let agg = aggregator();
        let rec = record(&[("b", "y"), ("province", "P"), ("a", "x")], 1.0);
        assert_eq!(agg.series_key(&rec), "x-y");
        assert_eq!(agg.series_key(&record(&[("province", "P")], 1.0)), "main");
        assert_eq!(
            agg.series_key(&record(&[("a", ""), ("b", "y"), ("province", "P")], 1.0)),
            "-y"
        );
    }

    #[test]
    fn new_series_prefilled_with_nan() {
        let mut agg = aggregator();
        let summary = agg.apply_batch(&[record(&[("province", "Q")], 7.0)]);
        assert_eq!(summary.created_series, 1);
        let series = agg.get("main").unwrap();
        assert_eq!(series.data.len(), 3);
        assert!(series.value_of("P").unwrap().is_nan());
        assert_eq!(series.value_of("Q"), Some(7.0));
        assert!(series.value_of("R").unwrap().is_nan());
    }

    #[test]
    fn last_value_wins_within_batch() {
        let mut agg = aggregator();
        agg.apply_batch(&[
            record(&[("province", "P")], 1.0),
            record(&[("province", "P")], 2.0),
        ]);
        assert_eq!(agg.get("main").unwrap().value_of("P"), Some(2.0));
    }

    #[test]
    fn rejects_missing_and_unknown_provinces() {
        let mut agg = aggregator();
        let summary = agg.apply_batch(&[
            record(&[("isp", "x")], 1.0),
            record(&[("province", "Z")], 1.0),
            record(&[("province", "R")], 3.0),
        ]);
        assert_eq!(summary.accepted, 1);
        assert_eq!(summary.rejected, 2);
        assert_eq!(agg.legend(), vec!["main"]);
        assert!(!agg.legend_visible());
    }

    #[test]
    fn legend_keeps_first_seen_order() {
        let mut agg = aggregator();
        agg.apply_batch(&[
            record(&[("isp", "b"), ("province", "P")], 1.0),
            record(&[("isp", "a"), ("province", "P")], 1.0),
        ]);
        agg.apply_batch(&[
            record(&[("isp", "c"), ("province", "P")], 1.0),
            record(&[("isp", "a"), ("province", "P")], 1.0),
        ]);
        assert_eq!(agg.legend(), vec!["b", "a", "c"]);
        assert!(agg.legend_visible());
        assert!(agg.get("b").unwrap().value_of("P").unwrap().is_nan());
    }
}
