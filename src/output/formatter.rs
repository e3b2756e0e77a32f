use chrono::{Duration, Utc};
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::scoring::{ScoreBreakdown, MAX_TOTAL};
use crate::service::{RankedStartup, ScoreReport};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a breakdown as one line per category plus a total line.
/// Each line carries a bar with one cell per available point.
pub fn format_breakdown(breakdown: &ScoreBreakdown, use_colors: bool) -> String {
    let mut lines: Vec<String> = breakdown
        .iter()
        .map(|(category, score)| {
            let weight = category.weight();
            let filled = "#".repeat(score as usize);
            let empty = ".".repeat(weight.saturating_sub(score) as usize);
            if use_colors {
                format!(
                    "  {:<16}{:>3}/{:<3}{}{}",
                    category.label(),
                    score.bold(),
                    weight,
                    filled.green(),
                    empty.dimmed()
                )
            } else {
                format!(
                    "  {:<16}{:>3}/{:<3}{}{}",
                    category.label(),
                    score,
                    weight,
                    filled,
                    empty
                )
            }
        })
        .collect();

    let total = format!("  {:<16}{:>3}/{}", "Total", breakdown.total, MAX_TOTAL);
    lines.push(if use_colors {
        total.bold().to_string()
    } else {
        total
    });
    lines.join("\n")
}

/// Format a score report: header, breakdown (when scored) and suggestions
pub fn format_report(report: &ScoreReport, use_colors: bool) -> String {
    let mut out = Vec::new();

    let updated = report
        .updated_at
        .map(|t| format!(" (updated {})", format_age(Utc::now() - t)))
        .unwrap_or_default();
    let header = format!(
        "{}: {}/{}{}",
        report.startup_id, report.score_total, MAX_TOTAL, updated
    );
    out.push(if use_colors {
        header.bold().to_string()
    } else {
        header
    });

    if let Some(ref breakdown) = report.breakdown {
        out.push(format_breakdown(breakdown, use_colors));
    }

    out.push("Suggestions:".to_string());
    for suggestion in &report.suggestions {
        out.push(format!("  - {}", suggestion));
    }

    out.join("\n")
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
fn truncate_text(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

fn ranked_name(row: &RankedStartup) -> &str {
    row.project_name.as_deref().unwrap_or(&row.startup_id)
}

fn ranked_details(row: &RankedStartup) -> String {
    [
        row.business_name.as_deref(),
        row.stage.as_deref(),
        row.industry.as_deref(),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(" / ")
}

/// Format ranked startups as a table with columns: Index, Score, Name, Details
/// No headers. Index column is 3 chars ("99."), score column 3 chars.
pub fn format_ranked_table(rows: &[RankedStartup], use_colors: bool) -> String {
    if rows.is_empty() {
        return "No scored startups found.".to_string();
    }

    let term_width = get_terminal_width();
    let index_width = 3;
    let score_width = 3;
    let separator = "  ";

    rows.iter()
        .enumerate()
        .map(|(idx, row)| {
            let index_str = format!("{:>2}.", idx + 1);
            let score_padded = format!("{:>width$}", row.score_total, width = score_width);
            let details = ranked_details(row);

            let fixed_width =
                index_width + 1 + score_width + separator.len() * 2 + details.chars().count();
            let name = match term_width {
                Some(width) if width > fixed_width + 10 => {
                    truncate_text(ranked_name(row), width - fixed_width)
                }
                // Very narrow terminal
                Some(_) => truncate_text(ranked_name(row), 20),
                // No terminal (pipe), don't truncate
                None => ranked_name(row).to_string(),
            };

            if use_colors {
                format!(
                    "{} {}{}{}{}{}",
                    index_str.dimmed(),
                    score_padded.bold(),
                    separator,
                    name,
                    separator,
                    details.cyan()
                )
            } else {
                format!(
                    "{} {}{}{}{}{}",
                    index_str, score_padded, separator, name, separator, details
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format ranked startups as tab-separated values for scripting
/// Columns: score, startup id, name, stage (no headers, no colors)
pub fn format_tsv(rows: &[RankedStartup]) -> String {
    rows.iter()
        .map(|row| {
            format!(
                "{}\t{}\t{}\t{}",
                row.score_total,
                row.startup_id,
                ranked_name(row),
                row.stage.as_deref().unwrap_or("")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a duration into a human-readable age string
/// "2h ago" for hours, "3d ago" for days, "1w ago" for weeks
pub fn format_age(duration: Duration) -> String {
    let hours = duration.num_hours();
    let days = duration.num_days();
    let weeks = days / 7;

    if weeks >= 1 {
        format!("{}w ago", weeks)
    } else if days >= 1 {
        format!("{}d ago", days)
    } else if hours >= 1 {
        format!("{}h ago", hours)
    } else {
        let minutes = duration.num_minutes();
        if minutes >= 1 {
            format!("{}m ago", minutes)
        } else {
            "just now".to_string()
        }
    }
}
