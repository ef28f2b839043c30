//! Application orchestrator.
//! Merges config sources, initializes logging, validates the roots, runs the sort pass
//! and, if requested, the cleanup pass, then reports the summary.

use anyhow::Result;
use std::process::ExitCode;
use tracing::{debug, error};

use ext_sort::cli::Args;
use ext_sort::config::load_config_from_xml;
use ext_sort::output as out;
use ext_sort::{cleanup, default_config_path, sort, Config};

use crate::logging::init_tracing;

/// Exit status when `fail_on_skips` is set and something was skipped.
const EXIT_SKIPPED: u8 = 2;

/// Run the CLI application.
pub fn run(args: Args) -> Result<ExitCode> {
    // Handle --print-config before logging init
    if args.print_config {
        match default_config_path() {
            Some(p) => {
                out::print_info(&format!("ext_sort config path:\n  {}\n", p.display()));
                if !p.exists() {
                    out::print_info("No config file exists there yet; defaults are used.");
                }
            }
            None => out::print_error("Could not determine a config path"),
        }
        return Ok(ExitCode::SUCCESS);
    }

    // Defaults < XML file < CLI flags.
    let mut cfg = Config::default();
    match load_config_from_xml() {
        Ok(Some(settings)) => settings.apply(&mut cfg),
        Ok(None) => {}
        Err(e) => {
            out::print_error(&format!("{e:#}"));
            return Ok(ExitCode::FAILURE);
        }
    }
    args.apply_overrides(&mut cfg);

    let guard = match init_tracing(&cfg.log_level, cfg.log_file.as_deref(), args.json) {
        Ok(g) => g,
        Err(e) => {
            out::print_error(&format!("Failed to initialize logging: {e:#}"));
            return Ok(ExitCode::FAILURE);
        }
    };

    debug!("Starting ext_sort: {:?}", args);

    let result = run_passes(&cfg);

    // Flush the file appender before exit.
    drop(guard);
    result
}

/// Fatal errors are reported here once and turned into a failing exit code.
fn run_passes(cfg: &Config) -> Result<ExitCode> {
    if let Err(e) = cfg.validate() {
        out::print_error(&e.to_string());
        return Ok(ExitCode::FAILURE);
    }

    let counters = match sort(&cfg.source, Some(cfg.effective_destination())) {
        Ok(c) => c,
        Err(e) => {
            error!(code = e.code(), error = %e, "Sort aborted");
            out::print_error(&e.to_string());
            return Ok(ExitCode::FAILURE);
        }
    };
    out::print_user(&out::sort_summary(&counters));
    let mut skipped = counters.skipped_files;

    if cfg.cleanup {
        let cleaned = cleanup(&cfg.source);
        out::print_user(&out::cleanup_summary(&cleaned));
        skipped += cleaned.skipped_folders;
    }

    if cfg.fail_on_skips && skipped > 0 {
        return Ok(ExitCode::from(EXIT_SKIPPED));
    }
    Ok(ExitCode::SUCCESS)
}
