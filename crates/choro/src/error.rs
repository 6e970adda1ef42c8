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

use thiserror::Error;
#[derive(Error, Debug)]
pub enum PanelError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Data error: {0}")]
    Data(#[from] DataError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialisation error: {0}")]
    Serialisation(#[from] SerialisationError),
}
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read panel configuration file '{path}': {source}")]
    ConfigFileError {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse YAML configuration: {source}")]
    YamlParseError {
        #[from]
        source: serde_yaml::Error,
    },
    #[error("Reference province list is empty")]
    EmptyProvinceList,
    #[error("Duplicate province in reference list: '{name}'")]
    DuplicateProvince { name: String },
    #[error("Invalid panel configuration: {field} = {value}")]
    InvalidField { field: String, value: String },
    #[error("Invalid colour '{value}': expected an '(r,g,b)' tuple")]
    InvalidColour { value: String },
}
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Failed to decode query result: {source}")]
    Decode {
        #[from]
        source: serde_json::Error,
    },
    #[error("Data source request failed: {reason}")]
    FetchFailed { reason: String },
}
#[derive(Error, Debug)]
pub enum SerialisationError {
    #[error("JSON serialisation failed: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}
pub type Result<T> = std::result::Result<T, PanelError>;
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
impl PanelError {
    pub fn fetch_failed(reason: impl Into<String>) -> Self {
        PanelError::Data(DataError::FetchFailed {
            reason: reason.into(),
        })
    }
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            PanelError::Data(DataError::FetchFailed { .. }) | PanelError::Io(_)
        )
    }
    pub fn category(&self) -> &'static str {
        match self {
            PanelError::Config(_) => "Configuration",
            PanelError::Data(_) => "Data",
            PanelError::Io(_) => "I/O",
            PanelError::Serialisation(_) => "Serialisation",
        }
    }
    pub fn user_message(&self) -> String {
        match self {
            PanelError::Data(DataError::FetchFailed { .. }) => {
                "Failed to load data for this panel. The previous chart is kept.".to_string()
            }
            PanelError::Config(ConfigError::ConfigFileError { .. }) => {
                "Unable to load panel configuration. Please check the configuration file."
                    .to_string()
            }
            PanelError::Config(ConfigError::EmptyProvinceList) => {
                "No provinces are configured, so no map series can be drawn.".to_string()
            }
            _ => self.to_string(),
        }
    }
}
