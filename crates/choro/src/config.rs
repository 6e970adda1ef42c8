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

use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

pub const DEFAULT_PROVINCE_KEY: &str = "province";
pub const DEFAULT_SERIES_NAME: &str = "main";
pub const DEFAULT_TOP_N: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    /// Reference province list, in display order.
    pub provinces: Vec<String>,
    pub province_key: String,
    /// Series name used when a record has no attribute besides its province.
    pub default_series: String,
    pub top_n: usize,
    pub map_name: String,
    pub visual_map: VisualMapConfig,
    pub treemap: TreemapStyleConfig,
}
impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            provinces: Vec::new(),
            province_key: DEFAULT_PROVINCE_KEY.to_string(),
            default_series: DEFAULT_SERIES_NAME.to_string(),
            top_n: DEFAULT_TOP_N,
            map_name: "china".to_string(),
            visual_map: VisualMapConfig::default(),
            treemap: TreemapStyleConfig::default(),
        }
    }
}
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualMapConfig {
    pub min: f64,
    pub max: f64,
    pub colours: Vec<String>,
    /// High and low end captions.
    pub text: [String; 2],
}
impl Default for VisualMapConfig {
    fn default() -> Self {
        Self {
            min: 300.0,
            max: 1100.0,
            colours: vec![
                "#0C8918".to_string(),
                "#9ED900".to_string(),
                "#F05654".to_string(),
                "#C91F37".to_string(),
            ],
            text: ["高".to_string(), "低".to_string()],
        }
    }
}
/// Treemap styling as entered in the panel editor; colours are `(r,g,b)` tuples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreemapStyleConfig {
    pub font_size: u32,
    pub text_colour: String,
    pub border_colour: String,
    pub border_width: u32,
}
impl Default for TreemapStyleConfig {
    fn default() -> Self {
        Self {
            font_size: 10,
            text_colour: "(255,255,255)".to_string(),
            border_colour: "(0,0,0)".to_string(),
            border_width: 1,
        }
    }
}
impl PanelConfig {
    pub fn with_provinces<I, S>(provinces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            provinces: provinces.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        info!("Loading panel configuration from {}", path.display());
        let content = fs::read_to_string(path).map_err(|source| ConfigError::ConfigFileError {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_string(&content)
    }
    pub fn from_yaml_string(yaml_content: &str) -> ConfigResult<Self> {
        let config: PanelConfig = serde_yaml::from_str(yaml_content)?;
        config.validate()?;
        info!(
            "Loaded panel configuration with {} provinces",
            config.provinces.len()
        );
        Ok(config)
    }
    pub fn validate(&self) -> ConfigResult<()> {
        if self.provinces.is_empty() {
            return Err(ConfigError::EmptyProvinceList);
        }
        let mut seen = HashSet::new();
        for province in &self.provinces {
            if !seen.insert(province.as_str()) {
                return Err(ConfigError::DuplicateProvince {
                    name: province.clone(),
                });
            }
        }
        if self.province_key.trim().is_empty() {
            return Err(ConfigError::InvalidField {
                field: "province_key".to_string(),
                value: self.province_key.clone(),
            });
        }
        if self.top_n == 0 {
            return Err(ConfigError::InvalidField {
                field: "top_n".to_string(),
                value: "0".to_string(),
            });
        }
        if self.visual_map.min > self.visual_map.max {
            return Err(ConfigError::InvalidField {
                field: "visual_map.min".to_string(),
                value: format!("{} > max {}", self.visual_map.min, self.visual_map.max),
            });
        }
        if self.visual_map.colours.is_empty() {
            warn!("visual_map.colours is empty; the renderer will fall back to its own palette");
        }
        Ok(())
    }
}
