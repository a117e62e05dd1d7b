//! Output formatting for CLI operations.

use debpatch::edit::EditResult;
use debpatch::read::{ExtractResult, Member};
use serde_json::json;

/// Trait for output formatting
pub trait OutputFormatter {
    /// Formats a list of members
    fn format_list(&self, members: &[Member]) -> String;

    /// Formats extraction results
    fn format_extract_result(&self, result: &ExtractResult) -> String;

    /// Formats the result of committing an edit
    fn format_edit_result(&self, archive: &str, result: &EditResult) -> String;
}

/// Human-readable output formatter
pub struct HumanFormatter;

impl OutputFormatter for HumanFormatter {
    fn format_list(&self, members: &[Member]) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{:>12} {:>19} {:>6} {:>6} {:>7} {}\n",
            "Size", "Modified", "Uid", "Gid", "Mode", "Name"
        ));
        output.push_str(&"-".repeat(70));
        output.push('\n');

        let mut total_size: u64 = 0;

        for member in members {
            total_size += member.size;

            let mtime_str = member
                .mtime
                .map(format_timestamp)
                .unwrap_or_else(|| "-".to_string());
            let id = |v: Option<u64>| v.map(|v| v.to_string()).unwrap_or_else(|| "-".into());
            let mode_str = member
                .mode
                .map(|m| format!("{:o}", m))
                .unwrap_or_else(|| "-".to_string());

            output.push_str(&format!(
                "{:>12} {:>19} {:>6} {:>6} {:>7} {}\n",
                humanize_bytes(member.size),
                mtime_str,
                id(member.uid),
                id(member.gid),
                mode_str,
                member.name
            ));
        }

        output.push_str(&"-".repeat(70));
        output.push('\n');
        output.push_str(&format!(
            "{} members, {} total\n",
            members.len(),
            humanize_bytes(total_size)
        ));

        output
    }

    fn format_extract_result(&self, result: &ExtractResult) -> String {
        let mut output = format!(
            "Extracted {} members ({})\n",
            result.members_extracted,
            humanize_bytes(result.bytes_extracted)
        );
        if result.members_skipped > 0 {
            output.push_str(&format!("Skipped {} members\n", result.members_skipped));
        }
        output
    }

    fn format_edit_result(&self, archive: &str, result: &EditResult) -> String {
        let mut output = format!(
            "Updated {}: {} replaced, {} added, {} unchanged ({})\n",
            archive,
            result.members_replaced,
            result.members_appended,
            result.members_copied,
            humanize_bytes(result.bytes_written)
        );
        if let Some(backup) = &result.backup {
            output.push_str(&format!("Original kept as {}\n", backup.display()));
        }
        output
    }
}

/// JSON output formatter
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_list(&self, members: &[Member]) -> String {
        let items: Vec<_> = members
            .iter()
            .map(|m| {
                json!({
                    "name": m.name,
                    "size": m.size,
                    "modified": m.mtime,
                    "uid": m.uid,
                    "gid": m.gid,
                    "mode": m.mode.map(|mode| format!("{:o}", mode)),
                    "offset": m.offset,
                })
            })
            .collect();

        serde_json::to_string_pretty(&items).unwrap_or_else(|_| "[]".to_string())
    }

    fn format_extract_result(&self, result: &ExtractResult) -> String {
        let obj = json!({
            "members_extracted": result.members_extracted,
            "members_skipped": result.members_skipped,
            "bytes_extracted": result.bytes_extracted,
            "paths": result.paths.iter().map(|p| p.display().to_string()).collect::<Vec<_>>(),
        });

        serde_json::to_string_pretty(&obj).unwrap_or_else(|_| "{}".to_string())
    }

    fn format_edit_result(&self, archive: &str, result: &EditResult) -> String {
        let obj = json!({
            "archive": archive,
            "members_copied": result.members_copied,
            "members_replaced": result.members_replaced,
            "members_appended": result.members_appended,
            "bytes_written": result.bytes_written,
            "backup": result.backup.as_ref().map(|p| p.display().to_string()),
        });

        serde_json::to_string_pretty(&obj).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Creates the appropriate formatter based on output format
pub fn create_formatter(format: super::OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        super::OutputFormat::Human => Box::new(HumanFormatter),
        super::OutputFormat::Json => Box::new(JsonFormatter),
    }
}

/// Converts bytes to a human-readable string
pub fn humanize_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Formats seconds since the epoch as a UTC datetime string
pub fn format_timestamp(secs: u64) -> String {
    let days_since_epoch = secs / 86400;
    let time_of_day = secs % 86400;
    let hours = time_of_day / 3600;
    let minutes = (time_of_day % 3600) / 60;
    let seconds = time_of_day % 60;

    let mut year = 1970;
    let mut remaining_days = days_since_epoch;

    loop {
        let days_in_year = if is_leap_year(year) { 366 } else { 365 };
        if remaining_days < days_in_year {
            break;
        }
        remaining_days -= days_in_year;
        year += 1;
    }

    let (month, day) = days_to_month_day(remaining_days, is_leap_year(year));

    format!(
        "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
        year, month, day, hours, minutes, seconds
    )
}

fn is_leap_year(year: u64) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

fn days_to_month_day(day_of_year: u64, leap: bool) -> (u64, u64) {
    let days_in_months: [u64; 12] = if leap {
        [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]
    } else {
        [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]
    };

    let mut remaining = day_of_year;
    for (i, &days) in days_in_months.iter().enumerate() {
        if remaining < days {
            return (i as u64 + 1, remaining + 1);
        }
        remaining -= days;
    }

    (12, 31)
}
