// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Biolinks and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Biolinks CLI entrypoint.
//!
//! Runs the interactive viewer over a JSON configuration file, or over the built-in demo
//! dataset with `--demo`. Logs go to `<log-dir>/biolinks.log` since the TUI owns the
//! terminal.

use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use biolinks::config::ViewerOptions;
use biolinks::loader::{AnnotationSource, PathSource};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const DEFAULT_CONFIG_FILE: &str = "biolinks.json";
const LOG_FILE: &str = "biolinks.log";
const LOG_ENV: &str = "BIOLINKS_LOG";

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [<config.json>] [--log-dir <dir>]\n  {program} [--config <config.json>] [--log-dir <dir>]\n  {program} --demo [--log-dir <dir>]\n\nIf config.json/--config is omitted, ./{DEFAULT_CONFIG_FILE} is used.\n--demo uses the built-in demo dataset and cannot be combined with a config file.\n\nLogs are written to <dir>/{LOG_FILE} (default: the system temp dir); set {LOG_ENV} to adjust the filter (default: info)."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    demo: bool,
    config: Option<String>,
    log_dir: Option<String>,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--demo" => {
                if options.demo {
                    return Err(());
                }
                options.demo = true;
            }
            "--config" => {
                if options.config.is_some() {
                    return Err(());
                }
                let path = args.next().ok_or(())?;
                options.config = Some(path);
            }
            "--log-dir" => {
                if options.log_dir.is_some() {
                    return Err(());
                }
                let dir = args.next().ok_or(())?;
                options.log_dir = Some(dir);
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if options.config.is_some() {
                    return Err(());
                }
                options.config = Some(arg);
            }
        }
    }

    if options.demo && options.config.is_some() {
        return Err(());
    }

    Ok(options)
}

fn init_logging(
    log_dir: &Path,
) -> Result<tracing_appender::non_blocking::WorkerGuard, Box<dyn Error>> {
    std::fs::create_dir_all(log_dir)?;
    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let file_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(writer)
        .with_filter(filter);

    tracing_subscriber::registry().with(file_layer).try_init()?;
    Ok(guard)
}

fn load_options(path: &Path) -> Result<ViewerOptions, Box<dyn Error>> {
    let mut options = ViewerOptions::load(path)?;
    let base = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    options.resolve_paths(base);
    Ok(options)
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "biolinks".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        let log_dir = options
            .log_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(std::env::temp_dir);
        let _log_guard = init_logging(&log_dir)?;

        let (viewer_options, source) = if options.demo {
            let viewer_options = biolinks::demo::demo_options()?;
            let source: Arc<dyn AnnotationSource> =
                Arc::new(biolinks::demo::demo_source(&viewer_options));
            (viewer_options, source)
        } else {
            let path = options.config.unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_owned());
            let source: Arc<dyn AnnotationSource> = Arc::new(PathSource::new());
            (load_options(Path::new(&path))?, source)
        };
        tracing::info!(
            title = %viewer_options.title,
            collections = viewer_options.content.len(),
            demo = options.demo,
            "starting viewer"
        );

        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
        let handle = runtime.handle().clone();

        runtime.block_on(async move {
            let tui_join = tokio::task::spawn_blocking(move || {
                biolinks::tui::run(viewer_options, source, handle).map_err(|err| err.to_string())
            })
            .await;

            let tui_result = tui_join.map_err(|err| -> Box<dyn Error> { Box::new(err) })?;
            tui_result.map_err(|err| {
                Box::new(std::io::Error::new(std::io::ErrorKind::Other, err)) as Box<dyn Error>
            })?;
            Ok::<(), Box<dyn Error>>(())
        })?;

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("biolinks: {err}");
        std::process::exit(1);
    }
}
