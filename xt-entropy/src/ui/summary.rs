//! Summary table printed after a scan.
//! License: MIT OR Apache-2.0

use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use std::io::{self, Write};
use xt_entropy_core::{FinalizeReport, FinalizeStatus};

/// Renders the per-volume outcome of a Finalize pass.
pub fn render_summary(report: &FinalizeReport) -> Table {
    let status = match report.status {
        FinalizeStatus::Processed => "processed",
        FinalizeStatus::Stopped => "stopped",
        FinalizeStatus::Skipped => "skipped",
    };

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![Cell::new("Volume"), Cell::new(&report.volume)]);

    let rows: Vec<(&str, String)> = vec![
        ("Status", status.to_string()),
        ("Items", report.total.to_string()),
        ("Annotated", report.annotated.to_string()),
        ("Zero-byte", report.zero_byte.to_string()),
        ("Unallocatable", report.allocation_failed.to_string()),
        ("Unreadable", report.unreadable.to_string()),
        ("Mean entropy", format!("{:.4}", report.stats.mean)),
        ("Std deviation", format!("{:.4}", report.stats.std_dev)),
        ("Range", format!("{:.4} .. {:.4}", report.stats.min, report.stats.max)),
    ];
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label), Cell::new(value)]);
    }
    table
}

pub fn print_summary<W: Write>(report: &FinalizeReport, writer: &mut W) -> io::Result<()> {
    writeln!(writer, "{}", render_summary(report))
}
