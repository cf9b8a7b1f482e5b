//! Runtime configuration resolved from flags and environment.

use std::path::PathBuf;

use medbill_invoicing::SettlementPolicy;
use medbill_observability::LogFormat;
use medbill_reporting::{CoverageSplit, StatisticsOptions};

use crate::args::Cli;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_file: Option<PathBuf>,
    pub statistics: StatisticsOptions,
}

/// Log format from the raw flag, defaulting (with a note on stderr) when
/// unrecognized. Runs before logging is set up, hence no `tracing` here.
pub fn log_format(raw: Option<&str>) -> LogFormat {
    match raw.map(str::parse::<LogFormat>) {
        None => LogFormat::default(),
        Some(Ok(format)) => format,
        Some(Err(e)) => {
            eprintln!("medbill: {e}; using pretty logs");
            LogFormat::default()
        }
    }
}

fn settlement_policy(raw: Option<&str>) -> SettlementPolicy {
    match raw.map(|s| s.trim().to_ascii_lowercase()) {
        None => SettlementPolicy::default(),
        Some(s) if s == "both" => SettlementPolicy::BothPayers,
        Some(s) if s == "claimed" => SettlementPolicy::ClaimedPayers,
        Some(other) => {
            tracing::warn!(value = %other, "unknown settlement policy; using `both`");
            SettlementPolicy::default()
        }
    }
}

fn coverage_split(raw: Option<&str>) -> CoverageSplit {
    let Some(raw) = raw else {
        return CoverageSplit::default();
    };
    match raw.trim().parse::<u8>().map_err(|e| e.to_string()).and_then(|pct| {
        CoverageSplit::new(pct).map_err(|e| e.to_string())
    }) {
        Ok(split) => split,
        Err(e) => {
            tracing::warn!(value = %raw, error = %e, "invalid primary payer share; using 50");
            CoverageSplit::default()
        }
    }
}

impl Config {
    /// Resolve everything but the log format. Call after logging is set up
    /// so fallbacks are reported.
    pub fn from_cli(cli: &Cli) -> Self {
        let config = Self {
            data_file: cli.data_file.clone(),
            statistics: StatisticsOptions {
                policy: settlement_policy(cli.policy.as_deref()),
                split: coverage_split(cli.primary_share.as_deref()),
            },
        };
        tracing::debug!(?config, "configuration resolved");
        config
    }
}
