use std::io::{self, Write};

use colored::Colorize;
use time::UtcOffset;

use crate::duplicates::{Analysis, DuplicateStats, ListingRow, Status};
use crate::utils::{format_kb, format_mb, format_timestamp};

pub const NO_FILES_MESSAGE: &str = "No files found matching the given extensions.";
pub const NO_DUPLICATES_MESSAGE: &str = "No duplicate files found!";

pub fn print_no_files<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", NO_FILES_MESSAGE.yellow())
}

pub fn print_summary<W: Write>(out: &mut W, stats: &DuplicateStats, skipped: usize) -> io::Result<()> {
    writeln!(out, "{}", "Scan summary".bold())?;
    writeln!(out, "  Total files processed: {}", stats.total_files)?;
    writeln!(out, "  Unique files:          {}", stats.unique_count)?;
    writeln!(out, "  Duplicate groups:      {}", stats.duplicate_group_count)?;
    writeln!(out, "  Duplicate files:       {}", stats.total_duplicate_files)?;
    writeln!(out, "  Wasted space:          {}", format_mb(stats.wasted_bytes))?;
    if skipped > 0 {
        writeln!(out, "  Files skipped:         {}", skipped)?;
    }
    writeln!(out)
}

/// Every file, one line each. Rows are expected duplicates first.
pub fn print_listing<W: Write>(out: &mut W, rows: &[ListingRow<'_>], offset: UtcOffset) -> io::Result<()> {
    writeln!(
        out,
        "{}",
        format!(
            "{:<9}  {:>5}  {:>12}  {:<19}  {}",
            "STATUS", "COUNT", "SIZE", "MODIFIED", "PATH"
        )
        .bold()
    )?;

    for row in rows {
        let label = format!("{:<9}", row.status);
        let label = match row.status {
            Status::Duplicate => label.yellow(),
            Status::Unique => label.green(),
        };
        writeln!(
            out,
            "{}  {:>5}  {:>12}  {:<19}  {}",
            label,
            row.duplicate_count,
            format_kb(row.record.size_bytes),
            format_timestamp(row.record.last_modified, offset),
            row.record.full_path.display()
        )?;
    }
    writeln!(out)
}

/// Duplicate groups only, in first-seen order.
pub fn print_duplicate_groups<W: Write>(
    out: &mut W,
    analysis: &Analysis<'_>,
    offset: UtcOffset,
) -> io::Result<()> {
    let mut printed = 0;
    for group in analysis.duplicate_groups() {
        printed += 1;
        writeln!(
            out,
            "{} {}",
            format!("Duplicate group {}:", printed).yellow().bold(),
            group.hash
        )?;
        writeln!(
            out,
            "  {} files, {} each",
            group.len(),
            format_mb(group.size_bytes())
        )?;
        for record in &group.members {
            writeln!(
                out,
                "    {}  (modified {})",
                record.full_path.display(),
                format_timestamp(record.last_modified, offset)
            )?;
        }
        writeln!(out)?;
    }

    if printed == 0 {
        writeln!(out, "{}", NO_DUPLICATES_MESSAGE.green())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duplicates::tests::record;

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        colored::control::set_override(false);
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn summary_reports_counts_and_wasted_space() {
        let records = vec![
            record("a.jpg", "x", 2 * 1024 * 1024),
            record("b.jpg", "y", 10),
            record("c.jpg", "x", 2 * 1024 * 1024),
        ];
        let analysis = Analysis::new(&records);
        let text = render(|out| print_summary(out, &analysis.stats(), 0));

        assert!(text.contains("Total files processed: 3"));
        assert!(text.contains("Unique files:          1"));
        assert!(text.contains("Duplicate groups:      1"));
        assert!(text.contains("Duplicate files:       1"));
        assert!(text.contains("Wasted space:          2.00 MB"));
        assert!(!text.contains("Files skipped"));
    }

    #[test]
    fn summary_mentions_skipped_files() {
        let text = render(|out| print_summary(out, &DuplicateStats::default(), 2));
        assert!(text.contains("Files skipped:         2"));
    }

    #[test]
    fn listing_shows_every_file() {
        let records = vec![
            record("a.jpg", "x", 1),
            record("b.jpg", "y", 1),
            record("c.jpg", "x", 1),
        ];
        let analysis = Analysis::new(&records);
        let text = render(|out| print_listing(out, &analysis.listing(), UtcOffset::UTC));

        let lines: Vec<_> = text.lines().filter(|l| l.contains("/photos/")).collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("DUPLICATE") && lines[0].ends_with("a.jpg"));
        assert!(lines[1].starts_with("DUPLICATE") && lines[1].ends_with("c.jpg"));
        assert!(lines[2].starts_with("UNIQUE") && lines[2].ends_with("b.jpg"));
        assert!(lines[2].contains("1970-01-01 00:00:00"));
    }

    #[test]
    fn duplicate_groups_list_members() {
        let records = vec![
            record("a.jpg", "x", 1024 * 1024),
            record("b.jpg", "y", 1),
            record("c.jpg", "x", 1024 * 1024),
        ];
        let analysis = Analysis::new(&records);
        let text = render(|out| print_duplicate_groups(out, &analysis, UtcOffset::UTC));

        assert!(text.contains("Duplicate group 1: x"));
        assert!(text.contains("2 files, 1.00 MB each"));
        assert!(text.contains("/photos/a.jpg"));
        assert!(text.contains("/photos/c.jpg"));
        assert!(!text.contains("b.jpg"));
        assert!(!text.contains(NO_DUPLICATES_MESSAGE));
    }

    #[test]
    fn no_duplicates_message() {
        let records = vec![record("a.jpg", "x", 1), record("b.jpg", "y", 1)];
        let analysis = Analysis::new(&records);
        let text = render(|out| print_duplicate_groups(out, &analysis, UtcOffset::UTC));
        assert_eq!(text.trim(), NO_DUPLICATES_MESSAGE);
    }
}
