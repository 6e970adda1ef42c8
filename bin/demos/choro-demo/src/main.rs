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

use anyhow::{Context, Result};
use choro::option::to_json_string;
use choro::{decode_batch, MapPanel, Panel, PanelConfig, PanelError, TopPanel, TreemapPanel};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PanelKind {
    Map,
    Top,
    Treemap,
}

/// Replays query result batches through a panel and prints each chart option.
#[derive(Debug, Parser)]
#[command(name = "choro-demo")]
struct Args {
    #[arg(short, long, default_value = "config/panel.yml")]
    config: PathBuf,
    #[arg(short, long, value_enum, default_value_t = PanelKind::Map)]
    panel: PanelKind,
    /// JSON files, each holding one batch of `{target, datapoints}` records.
    #[arg(required = true)]
    batches: Vec<PathBuf>,
}

fn replay<P: Panel>(panel: &mut P, batches: &[PathBuf]) -> Result<()> {
    for path in batches {
        info!("Refreshing from {}", path.display());
        let loaded = std::fs::read_to_string(path)
            .map_err(PanelError::from)
            .and_then(|content| decode_batch(&content));
        match loaded {
            Ok(records) => {
                let option = panel.on_data_received(&records);
                println!("{}", to_json_string(&option)?);
            }
            Err(e) => panel.on_data_error(&e),
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = PanelConfig::from_yaml_file(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;

    match args.panel {
        PanelKind::Map => replay(&mut MapPanel::new(config)?, &args.batches),
        PanelKind::Top => replay(&mut TopPanel::new(config.top_n), &args.batches),
        PanelKind::Treemap => replay(&mut TreemapPanel::new(&config)?, &args.batches),
    }
}
