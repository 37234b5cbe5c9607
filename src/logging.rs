// Copyright (c) 2025 ADBC Drivers Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Logging setup for the client.
//!
//! ## Configuration priority
//!
//! 1. `databricks.log_level` / `databricks.log_file` database options
//! 2. `RUST_LOG` environment variable
//! 3. Default: `warn`
//!
//! ```bash
//! RUST_LOG=databricks_sql_frame=debug ./my_app
//! ```

use crate::error::{Error, Result};
use std::sync::OnceLock;
use tracing_subscriber::{
    fmt::{self, time::SystemTime},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

const LOG_TARGET: &str = "databricks_sql_frame";
const LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

static LOGGING_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Logging configuration taken from database options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogConfig {
    /// One of "OFF", "ERROR", "WARN", "INFO", "DEBUG", "TRACE" (any case).
    pub level: Option<String>,
    /// Log file path. If unset, logs go to stderr.
    pub file: Option<String>,
}

impl LogConfig {
    /// Check that `level` names a known log level.
    pub fn parse_level(level: &str) -> Result<String> {
        let lower = level.trim().to_ascii_lowercase();
        if LEVELS.contains(&lower.as_str()) {
            Ok(lower)
        } else {
            Err(Error::InvalidArgument(format!(
                "invalid log level '{}', expected one of {}",
                level,
                LEVELS.join(", ")
            )))
        }
    }

    fn is_off(&self) -> bool {
        self.level
            .as_deref()
            .is_some_and(|level| level.eq_ignore_ascii_case("off"))
    }

    fn filter(&self) -> EnvFilter {
        match self.level {
            Some(ref level) => EnvFilter::new(filter_directive(level)),
            None => EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(filter_directive("warn"))),
        }
    }
}

fn filter_directive(level: &str) -> String {
    format!("{}={}", LOG_TARGET, level.to_ascii_lowercase())
}

/// Install the tracing subscriber once per process.
///
/// Later calls are no-ops, as is any call after another subscriber was set.
pub fn init_logging(config: &LogConfig) {
    LOGGING_INITIALIZED.get_or_init(|| {
        if config.is_off() {
            return;
        }
        let filter = config.filter();

        if let Some(ref path) = config.file {
            let file = match std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
            {
                Ok(f) => f,
                Err(e) => {
                    eprintln!(
                        "databricks-sql-frame: failed to open log file {}: {}",
                        path, e
                    );
                    return;
                }
            };

            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_writer(file)
                        .with_target(false)
                        .with_ansi(false)
                        .with_timer(SystemTime),
                )
                .try_init()
                .ok();
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(false)
                        .with_timer(SystemTime),
                )
                .try_init()
                .ok();
        }
    });
}
