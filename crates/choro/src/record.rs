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

//! Raw time-series records as delivered by a dashboard query.

use crate::error::{DataError, PanelError, Result};
use serde::{Deserialize, Serialize};

/// One `[value, timestamp]` sample. Either side may be `null` in the wire format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Datapoint(pub Option<f64>, pub Option<f64>);

impl Datapoint {
    pub fn new(value: f64, timestamp: f64) -> Self {
        Self(Some(value), Some(timestamp))
    }
    pub fn value(&self) -> Option<f64> {
        self.0
    }
    pub fn timestamp(&self) -> Option<f64> {
        self.1
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub target: String,
    #[serde(default)]
    pub datapoints: Vec<Datapoint>,
}

impl RawRecord {
    pub fn new(target: impl Into<String>, datapoints: Vec<Datapoint>) -> Self {
        Self {
            target: target.into(),
            datapoints,
        }
    }

    /// Convenience for the common single-sample case.
    pub fn single(target: impl Into<String>, value: f64) -> Self {
        Self::new(target, vec![Datapoint::new(value, 0.0)])
    }

    /// Value of the first sample, NaN when there is none.
    pub fn first_value(&self) -> f64 {
        self.datapoints
            .first()
            .and_then(Datapoint::value)
            .unwrap_or(f64::NAN)
    }
}

/// Decodes a query result batch (a JSON array of records).
pub fn decode_batch(json: &str) -> Result<Vec<RawRecord>> {
    serde_json::from_str(json).map_err(|e| PanelError::Data(DataError::Decode { source: e }))
}
