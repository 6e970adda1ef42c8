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

//! Panel controllers.
//!
//! A panel owns the caches for one chart and is driven by the host's refresh
//! hooks. Each hook runs to completion synchronously; `&mut self` keeps two
//! refreshes from interleaving on the same caches.

use crate::aggregate::ProvinceSeriesAggregator;
use crate::config::PanelConfig;
use crate::error::{ConfigResult, PanelError};
use crate::option::{MapChartOption, TopChartOption, TreemapOption};
use crate::rank::TopNRanker;
use crate::record::RawRecord;
use crate::tags::parse_batch;
use crate::treemap::{build_nodes, TreemapStyle};
use serde::Serialize;
use tracing::{debug, error};

pub trait Panel {
    type Output: Serialize;

    fn on_data_received(&mut self, records: &[RawRecord]) -> Self::Output;

    /// Reports a failed data fetch. Previously rendered state is left as is.
    fn on_data_error(&mut self, err: &PanelError) {
        error!(
            category = err.category(),
            recoverable = err.is_recoverable(),
            "fail to load data: {err}"
        );
    }

    /// Option to re-apply after a settings change, if the panel has one.
    fn on_render(&mut self) -> Option<Self::Output> {
        None
    }
}

#[derive(Debug)]
pub struct MapPanel {
    config: PanelConfig,
    aggregator: ProvinceSeriesAggregator,
    ranker: TopNRanker,
    initialised: bool,
}

impl MapPanel {
    pub fn new(config: PanelConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self {
            aggregator: ProvinceSeriesAggregator::from_config(&config),
            ranker: TopNRanker::new(config.top_n),
            config,
            initialised: false,
        })
    }
    pub fn aggregator(&self) -> &ProvinceSeriesAggregator {
        &self.aggregator
    }
}

impl Panel for MapPanel {
    type Output = MapChartOption;

    fn on_data_received(&mut self, records: &[RawRecord]) -> MapChartOption {
        let parsed = parse_batch(records);
        self.aggregator.apply_batch(&parsed);
        let ranked = self.ranker.rank(&parsed);
        let option = MapChartOption::update(&self.aggregator, &ranked, &self.config.map_name);
        if self.initialised {
            option
        } else {
            debug!("first map render, sending full option");
            self.initialised = true;
            option.with_setup(&self.config)
        }
    }
}

#[derive(Debug)]
pub struct TopPanel {
    ranker: TopNRanker,
    initialised: bool,
}

impl TopPanel {
    pub fn new(limit: usize) -> Self {
        Self {
            ranker: TopNRanker::new(limit),
            initialised: false,
        }
    }
}

impl Panel for TopPanel {
    type Output = TopChartOption;

    fn on_data_received(&mut self, records: &[RawRecord]) -> TopChartOption {
        let ranked = self.ranker.rank(&parse_batch(records));
        let option = TopChartOption::update(&ranked);
        if self.initialised {
            option
        } else {
            self.initialised = true;
            option.with_setup()
        }
    }
}

#[derive(Debug)]
pub struct TreemapPanel {
    style: TreemapStyle,
    initialised: bool,
}

impl TreemapPanel {
    pub fn new(config: &PanelConfig) -> ConfigResult<Self> {
        Ok(Self {
            style: TreemapStyle::from_config(&config.treemap)?,
            initialised: false,
        })
    }
    pub fn style(&self) -> &TreemapStyle {
        &self.style
    }
    /// Applies edited style settings; the next `on_render` re-emits them.
    pub fn set_style(&mut self, config: &PanelConfig) -> ConfigResult<()> {
        self.style = TreemapStyle::from_config(&config.treemap)?;
        Ok(())
    }
}

impl Panel for TreemapPanel {
    type Output = TreemapOption;

    fn on_data_received(&mut self, records: &[RawRecord]) -> TreemapOption {
        let nodes = build_nodes(&parse_batch(records));
        let option = TreemapOption::new(&self.style, Some(nodes));
        if self.initialised {
            option
        } else {
            self.initialised = true;
            option.with_setup()
        }
    }

    fn on_render(&mut self) -> Option<TreemapOption> {
        // nothing to restyle before the first data batch created the series
        self.initialised
            .then(|| TreemapOption::new(&self.style, None))
    }
}
