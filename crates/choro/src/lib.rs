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

pub mod aggregate;
pub mod config;
pub mod error;
pub mod option;
pub mod panel;
pub mod rank;
pub mod record;
pub mod tags;
pub mod treemap;

pub use aggregate::{AggregatorOptions, BatchSummary, MapSeries, ProvinceSeriesAggregator, RegionValue};
pub use config::{PanelConfig, TreemapStyleConfig, VisualMapConfig};
pub use error::{ConfigError, DataError, PanelError, Result, SerialisationError};
pub use option::{MapChartOption, TopChartOption, TreemapOption};
pub use panel::{MapPanel, Panel, TopPanel, TreemapPanel};
pub use rank::{RankedEntry, TopNRanker};
pub use record::{decode_batch, Datapoint, RawRecord};
pub use tags::{parse_batch, parse_record, parse_target, TagSet, TaggedValue};
pub use treemap::{TreemapNode, TreemapStyle};
