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

//! ECharts option objects.
//!
//! Options are partial: fields left as `None` are omitted so the renderer merges
//! them into the option it already holds. NaN values serialise as `null`, which
//! the renderer draws as "no data".

use crate::aggregate::{MapSeries, ProvinceSeriesAggregator, RegionValue};
use crate::config::{PanelConfig, VisualMapConfig};
use crate::error::{Result, SerialisationError};
use crate::rank::RankedEntry;
use crate::treemap::{TreemapNode, TreemapStyle};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub show: bool,
    pub orient: &'static str,
    pub left: &'static str,
    pub data: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tooltip {
    pub trigger: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatter: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Toolbox {
    pub show: bool,
    pub orient: &'static str,
    pub left: &'static str,
    pub top: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InRange {
    pub color: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisualMap {
    pub left: &'static str,
    pub top: &'static str,
    pub text: [String; 2],
    pub calculable: bool,
    pub min: f64,
    pub max: f64,
    #[serde(rename = "inRange")]
    pub in_range: InRange,
}

impl From<&VisualMapConfig> for VisualMap {
    fn from(config: &VisualMapConfig) -> Self {
        Self {
            left: "left",
            top: "bottom",
            text: config.text.clone(),
            calculable: true,
            min: config.min,
            max: config.max,
            in_range: InRange {
                color: config.colours.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Show {
    pub show: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueAxis {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub scale: bool,
    pub position: &'static str,
    pub boundary_gap: bool,
    pub split_line: Show,
    pub axis_line: Show,
    pub axis_tick: Show,
}

impl ValueAxis {
    fn hidden(position: &'static str) -> Self {
        Self {
            kind: "value",
            scale: true,
            position,
            boundary_gap: false,
            split_line: Show { show: false },
            axis_line: Show { show: false },
            axis_tick: Show { show: false },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryAxis {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub name_gap: u32,
    pub position: &'static str,
    pub data: Vec<String>,
}

impl CategoryAxis {
    pub fn ranked(position: &'static str, entries: &[RankedEntry]) -> Self {
        Self {
            kind: "category",
            name_gap: 16,
            position,
            data: entries.iter().map(RankedEntry::axis_label).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmphasisStyle {
    pub border_width: u32,
    pub border_color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalLabelStyle {
    pub label: Show,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapItemStyle {
    pub normal: NormalLabelStyle,
    pub emphasis: EmphasisStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapSeriesOption {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub map_type: String,
    pub roam: bool,
    pub show_legend_symbol: bool,
    pub data: Vec<RegionValue>,
    pub item_style: MapItemStyle,
}

impl MapSeriesOption {
    pub fn new(series: &MapSeries, map_name: &str) -> Self {
        Self {
            name: series.name.clone(),
            kind: "map",
            map_type: map_name.to_string(),
            roam: false,
            show_legend_symbol: false,
            data: series.data.clone(),
            item_style: MapItemStyle {
                normal: NormalLabelStyle {
                    label: Show { show: false },
                },
                emphasis: EmphasisStyle {
                    border_width: 1,
                    border_color: "#fff",
                },
            },
        }
    }
}

/// Choropleth with the ranked list drawn as a category axis beside it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapChartOption {
    pub legend: Legend,
    pub series: Vec<MapSeriesOption>,
    pub y_axis: CategoryAxis,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<Tooltip>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visual_map: Option<VisualMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toolbox: Option<Toolbox>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_axis: Option<ValueAxis>,
}

impl MapChartOption {
    /// Dynamic parts only: series, legend and the ranked axis.
    pub fn update(
        aggregator: &ProvinceSeriesAggregator,
        ranked: &[RankedEntry],
        map_name: &str,
    ) -> Self {
        Self {
            legend: Legend {
                show: aggregator.legend_visible(),
                orient: "vertical",
                left: "left",
                data: aggregator.legend().into_iter().map(str::to_string).collect(),
            },
            series: aggregator
                .series()
                .map(|s| MapSeriesOption::new(s, map_name))
                .collect(),
            y_axis: CategoryAxis::ranked("right", ranked),
            tooltip: None,
            visual_map: None,
            toolbox: None,
            x_axis: None,
        }
    }

    /// Adds the static parts sent with the first render.
    pub fn with_setup(mut self, config: &PanelConfig) -> Self {
        self.tooltip = Some(Tooltip {
            trigger: "item",
            formatter: Some("{b}<br/>{c}"),
        });
        self.visual_map = Some(VisualMap::from(&config.visual_map));
        self.toolbox = Some(Toolbox {
            show: true,
            orient: "vertical",
            left: "right",
            top: "center",
        });
        self.x_axis = Some(ValueAxis::hidden("right"));
        self
    }

    pub fn is_setup(&self) -> bool {
        self.visual_map.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarSeriesOption {
    pub id: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub data: Vec<f64>,
}

/// Standalone horizontal bar chart of the ranked list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopChartOption {
    pub y_axis: CategoryAxis,
    pub series: Vec<BarSeriesOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<Tooltip>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_axis: Option<ValueAxis>,
}

impl TopChartOption {
    pub fn update(ranked: &[RankedEntry]) -> Self {
        Self {
            y_axis: CategoryAxis::ranked("left", ranked),
            series: vec![BarSeriesOption {
                id: "bar",
                kind: "bar",
                data: ranked.iter().map(|e| e.value).collect(),
            }],
            tooltip: None,
            x_axis: None,
        }
    }
    pub fn with_setup(mut self) -> Self {
        self.tooltip = Some(Tooltip {
            trigger: "item",
            formatter: None,
        });
        self.x_axis = Some(ValueAxis::hidden("top"));
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    pub color: String,
    pub font_size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreemapLabel {
    pub show: bool,
    pub formatter: &'static str,
    pub text_style: TextStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreemapNormalStyle {
    pub label: TreemapLabel,
    pub border_width: u32,
    pub border_color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreemapItemStyle {
    pub normal: TreemapNormalStyle,
}

impl From<&TreemapStyle> for TreemapItemStyle {
    fn from(style: &TreemapStyle) -> Self {
        Self {
            normal: TreemapNormalStyle {
                label: TreemapLabel {
                    show: true,
                    formatter: "{b}",
                    text_style: TextStyle {
                        color: style.text_colour.clone(),
                        font_size: style.font_size,
                    },
                },
                border_width: style.border_width,
                border_color: style.border_colour.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreemapSeriesOption {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub item_style: TreemapItemStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<TreemapNode>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreemapOption {
    pub series: Vec<TreemapSeriesOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<Tooltip>,
}

impl TreemapOption {
    /// `data: None` restyles the series without replacing its nodes.
    pub fn new(style: &TreemapStyle, data: Option<Vec<TreemapNode>>) -> Self {
        Self {
            series: vec![TreemapSeriesOption {
                name: "treemap",
                kind: "treemap",
                item_style: TreemapItemStyle::from(style),
                data,
            }],
            tooltip: None,
        }
    }
    pub fn with_setup(mut self) -> Self {
        self.tooltip = Some(Tooltip {
            trigger: "item",
            formatter: Some("{b}: {c}"),
        });
        self
    }
}

pub fn to_json<T: Serialize>(option: &T) -> Result<serde_json::Value> {
    serde_json::to_value(option).map_err(|e| SerialisationError::Json { source: e }.into())
}

pub fn to_json_string<T: Serialize>(option: &T) -> Result<String> {
    serde_json::to_string_pretty(option).map_err(|e| SerialisationError::Json { source: e }.into())
}
