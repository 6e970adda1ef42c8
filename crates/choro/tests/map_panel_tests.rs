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

use anyhow::Result;
use choro::{
    decode_batch, option::to_json, parse_batch, MapPanel, Panel, PanelConfig, PanelError,
    ProvinceSeriesAggregator, RawRecord,
};

const PROVINCES: [&str; 4] = ["北京", "上海", "广东", "四川"];

fn config() -> PanelConfig {
    PanelConfig::with_provinces(PROVINCES)
}

#[test]
fn unknown_province_is_dropped_end_to_end() -> Result<()> {
    let batch = decode_batch(
        r#"[
            {"target": "series{province:北京}", "datapoints": [[500, 0]]},
            {"target": "series{province:Unknown}", "datapoints": [[1, 0]]}
        ]"#,
    )?;
    let mut panel = MapPanel::new(config())?;
    let option = panel.on_data_received(&batch);

    assert_eq!(option.series.len(), 1);
    let series = &option.series[0];
    assert_eq!(series.name, "main");
    assert_eq!(series.data.len(), PROVINCES.len());
    for cell in &series.data {
        if cell.name == "北京" {
            assert_eq!(cell.value, 500.0);
        } else {
            assert!(cell.value.is_nan(), "{} should be empty", cell.name);
        }
    }
    assert!(series.data.iter().all(|c| c.name != "Unknown"));
    assert!(!option.legend.show);
    Ok(())
}

#[test]
fn repeated_batch_is_idempotent() -> Result<()> {
    let batch = vec![
        RawRecord::single("bw{isp: telecom, province: 北京}", 10.0),
        RawRecord::single("bw{isp: unicom, province: 上海}", 20.0),
    ];
    let mut panel = MapPanel::new(config())?;
    let first = panel.on_data_received(&batch);
    let second = panel.on_data_received(&batch);

    assert_eq!(first.legend.data, second.legend.data);
    assert_eq!(second.series.len(), 2);
    for (a, b) in first.series.iter().zip(&second.series) {
        assert_eq!(a.name, b.name);
        for (ca, cb) in a.data.iter().zip(&b.data) {
            assert_eq!(ca.name, cb.name);
            assert!(ca.value == cb.value || (ca.value.is_nan() && cb.value.is_nan()));
        }
    }
    Ok(())
}

#[test]
fn provinces_missing_from_next_batch_are_cleared() {
    let mut agg = ProvinceSeriesAggregator::from_config(&config());
    agg.apply_batch(&parse_batch(&[
        RawRecord::single("m{province: 北京}", 1.0),
        RawRecord::single("m{province: 上海}", 2.0),
    ]));
    agg.apply_batch(&parse_batch(&[RawRecord::single("m{province: 北京}", 3.0)]));

    let series = agg.get("main").expect("series persists across batches");
    assert_eq!(series.value_of("北京"), Some(3.0));
    assert!(series.value_of("上海").is_some_and(f64::is_nan));
    assert_eq!(agg.len(), 1);
}

#[test]
fn composite_names_group_by_non_province_values() {
    let mut agg = ProvinceSeriesAggregator::from_config(&config());
    agg.apply_batch(&parse_batch(&[
        RawRecord::single("m{a: x, b: y, province: 北京}", 1.0),
        RawRecord::single("m{b: y, province: 上海, a: x}", 2.0),
        RawRecord::single("m{province: 广东}", 3.0),
    ]));
    assert_eq!(agg.legend(), vec!["x-y", "main"]);
    let xy = agg.get("x-y").unwrap();
    assert_eq!(xy.filled().count(), 2);
    assert_eq!(agg.get("main").unwrap().value_of("广东"), Some(3.0));
}

#[test]
fn first_render_carries_setup_then_updates_only() -> Result<()> {
    let mut panel = MapPanel::new(config())?;
    let batch = vec![RawRecord::single("m{province: 四川}", 7.0)];
    let first = panel.on_data_received(&batch);
    let second = panel.on_data_received(&batch);
    assert!(first.is_setup());
    assert!(!second.is_setup());

    let json = to_json(&second)?;
    assert!(json.get("visualMap").is_none());
    assert_eq!(json["yAxis"]["data"][0], "四川 : 7");
    Ok(())
}

#[test]
fn ranked_axis_lists_largest_last() -> Result<()> {
    let batch: Vec<_> = PROVINCES
        .iter()
        .zip([4.0, 9.0, 1.0, 6.0])
        .map(|(p, v)| RawRecord::single(format!("m{{province: {p}}}"), v))
        .collect();
    let mut panel = MapPanel::new(config())?;
    let option = panel.on_data_received(&batch);
    assert_eq!(
        option.y_axis.data,
        vec!["广东 : 1", "北京 : 4", "四川 : 6", "上海 : 9"]
    );
    Ok(())
}

#[test]
fn data_error_leaves_state_untouched() -> Result<()> {
    let mut panel = MapPanel::new(config())?;
    panel.on_data_received(&[RawRecord::single("m{province: 北京}", 5.0)]);
    panel.on_data_error(&PanelError::fetch_failed("upstream returned 502"));
    let series = panel.aggregator().get("main").unwrap();
    assert_eq!(series.value_of("北京"), Some(5.0));
    Ok(())
}

#[test]
fn invalid_config_is_rejected() {
    assert!(MapPanel::new(PanelConfig::default()).is_err());
}
