//! Statistics reporting.

use console::style;

use crate::download::RunSummary;

/// Print the counters of a finished run.
pub fn print_run_summary(summary: &RunSummary) {
    eprintln!();
    eprintln!("{}", style("═".repeat(50)).dim());
    eprintln!("{}", style("Summary:").bold());
    eprintln!("  Meetings selected:  {}", summary.meetings_selected);
    eprintln!("  Meetings fetched:   {}", summary.meetings_fetched);
    eprintln!("  Files fetched:      {}", summary.files_fetched);
    eprintln!("  Already downloaded: {}", summary.already_downloaded);
    eprintln!("  Without files:      {}", summary.without_files);
    if summary.lifecycle_changes > 0 {
        eprintln!("  Trashed/restored:   {}", summary.lifecycle_changes);
    }
    if summary.collisions > 0 {
        eprintln!("  Path collisions:    {}", style(summary.collisions).red());
    }
    if summary.failures > 0 {
        eprintln!("  Failed:             {}", style(summary.failures).red());
    }
    eprintln!("{}", style("═".repeat(50)).dim());
}
