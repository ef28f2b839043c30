//! User-facing terminal output.
//! Colored prefixes only when stdout is a TTY; summary lines are plain so they can be scripted.

use owo_colors::OwoColorize;

use crate::cleanup::CleanupCounters;
use crate::sort::RunCounters;

fn is_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

pub fn print_info(msg: &str) {
    if is_tty() {
        println!("{} {}", "info:".cyan().bold(), msg);
    } else {
        println!("info: {}", msg);
    }
}

pub fn print_warn(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "warn:".yellow().bold(), msg);
    } else {
        eprintln!("warn: {}", msg);
    }
}

pub fn print_error(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "error:".red().bold(), msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

/// Print a plain user-facing line (no prefix).
pub fn print_user(msg: &str) {
    println!("{}", msg);
}

pub fn sort_summary(c: &RunCounters) -> String {
    format!(
        "Finished processing files. Total files: {}, skipped files: {}",
        c.total_files_seen, c.skipped_files
    )
}

pub fn cleanup_summary(c: &CleanupCounters) -> String {
    format!("Finished cleanup. Skipped folders: {}", c.skipped_folders)
}
