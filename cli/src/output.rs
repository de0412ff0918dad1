//! CLI output helpers for review reports.

use clap::ValueEnum;
use colored::Colorize;
use sqlreview_catalog::{Advice, Status};

/// Report format for `sqlreview check`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Format {
    #[default]
    Text,
    Json,
}

pub fn heading(text: &str) -> String {
    format!("{}", text.bright_cyan())
}

pub fn muted(text: &str) -> String {
    format!("{}", text.bright_black())
}

pub fn success(text: &str) -> String {
    format!("{}", text.bright_green())
}

pub fn err_line(text: &str) -> String {
    format!("{} {}", "Error:".red().bold(), text)
}

fn status_label(status: Status) -> String {
    match status {
        Status::Success => format!("{}", status.as_str().green()),
        Status::Warn => format!("{}", status.as_str().yellow()),
        Status::Error => format!("{}", status.as_str().red().bold()),
    }
}

/// Whether any advice fails the review
pub fn has_errors(advice: &[Advice]) -> bool {
    advice.iter().any(|a| a.status == Status::Error)
}

/// Human-readable report, one block per advice plus a summary line
pub fn render_text(advice: &[Advice]) -> String {
    let mut lines = Vec::new();
    for item in advice {
        let location = item
            .line
            .map(|line| format!(" {}", muted(&format!("(line {line})"))))
            .unwrap_or_default();
        lines.push(format!(
            "{} [{}] {}{}",
            status_label(item.status),
            item.code,
            item.title,
            location
        ));
        if !item.content.is_empty() {
            lines.push(format!("    {}", item.content));
        }
    }

    let errors = advice.iter().filter(|a| a.status == Status::Error).count();
    let warnings = advice.iter().filter(|a| a.status == Status::Warn).count();
    lines.push(String::new());
    if errors == 0 && warnings == 0 {
        lines.push(success("No problems found"));
    } else {
        lines.push(heading(&format!("{errors} error(s), {warnings} warning(s)")));
    }
    lines.join("\n")
}

/// Machine-readable report
pub fn render_json(advice: &[Advice]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(advice)
}
