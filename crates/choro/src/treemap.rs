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

//! Treemap nodes and styling.

use crate::config::TreemapStyleConfig;
use crate::error::{ConfigError, ConfigResult};
use crate::tags::TaggedValue;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreemapNode {
    pub name: String,
    /// Percentage with two decimals, e.g. `12.50`.
    pub value: String,
}

/// Resolved style with colours already in `#rrggbb` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreemapStyle {
    pub font_size: u32,
    pub text_colour: String,
    pub border_colour: String,
    pub border_width: u32,
}

impl TreemapStyle {
    pub fn from_config(config: &TreemapStyleConfig) -> ConfigResult<Self> {
        Ok(Self {
            font_size: config.font_size,
            text_colour: rgb_tuple_to_hex(&config.text_colour)?,
            border_colour: rgb_tuple_to_hex(&config.border_colour)?,
            border_width: config.border_width,
        })
    }
}

/// Converts `(r,g,b)` into `#rrggbb`.
pub fn rgb_tuple_to_hex(colour: &str) -> ConfigResult<String> {
    let invalid = || ConfigError::InvalidColour {
        value: colour.to_string(),
    };
    let inner = colour
        .trim()
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .ok_or_else(invalid)?;
    let channels = inner
        .split(',')
        .map(|c| c.trim().parse::<u8>().map_err(|_| invalid()))
        .collect::<ConfigResult<Vec<_>>>()?;
    let &[r, g, b] = channels.as_slice() else {
        return Err(invalid());
    };
    Ok(format!("#{r:02x}{g:02x}{b:02x}"))
}

/// One node per record, named after the record's first tag value.
pub fn build_nodes(records: &[TaggedValue]) -> Vec<TreemapNode> {
    records
        .iter()
        .filter_map(|record| {
            let name = record.tags.values().next()?;
            Some(TreemapNode {
                name: name.to_string(),
                value: format!("{:.2}", record.value * 100.0),
            })
        })
        .collect()
}
