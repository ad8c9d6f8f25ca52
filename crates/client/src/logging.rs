// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use anyhow::{Context, Result};
use config::LogConfig;
use rolling_file::*;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Rotated files kept next to the active `logs.log`.
const MAX_ROTATED_FILES: usize = 9;

/// Installs the global subscriber described by `config`.
///
/// When file output is enabled the returned guard flushes the background
/// writer on drop, so keep it alive for as long as logs should be written.
///
/// # Log Rotation
/// When a log file reaches `write_max_file_size`, it is rotated:
/// - Current: logs.log
/// - After rotation: logs.log.1, logs.log.2, etc.
pub fn init(config: &LogConfig) -> Result<Option<WorkerGuard>> {
    let filter = build_filter(&config.level);
    let registry = tracing_subscriber::registry().with(filter);

    if !config.write {
        if config.json {
            registry.with(fmt::layer().json()).try_init()?;
        } else {
            registry.with(console_layer(config.strip_ansi)).try_init()?;
        }
        return Ok(None);
    }

    std::fs::create_dir_all(&config.write_path)
        .with_context(|| format!("Failed to create log directory '{}'", config.write_path))?;

    let log_file_path = PathBuf::from(&config.write_path).join("logs.log");
    let file_appender = BasicRollingFileAppender::new(
        log_file_path,
        RollingConditionBasic::new().max_size(config.write_max_file_size),
        MAX_ROTATED_FILES,
    )?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    if config.json {
        registry
            .with(fmt::layer().json())
            .with(fmt::layer().json().with_writer(non_blocking))
            .try_init()?;
    } else {
        let file_layer = fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false) // Never use ANSI in files
            .with_writer(non_blocking);

        registry
            .with(console_layer(config.strip_ansi))
            .with(file_layer)
            .try_init()?;
    }

    Ok(Some(guard))
}

fn console_layer<S>(strip_ansi: bool) -> fmt::Layer<S>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(!strip_ansi)
}

fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|e| {
        eprintln!(
            "Invalid log level '{}': {}. Falling back to 'info'",
            level, e
        );
        EnvFilter::new("info")
    })
}
