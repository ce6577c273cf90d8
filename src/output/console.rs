//! Console output utilities.

use console::style;

/// Print an info message.
pub fn print_info(message: &str) {
    eprintln!("{} {}", style("INFO").cyan().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", style("WARN").yellow().bold(), message);
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("ERROR").red().bold(), message);
}

/// Print the effective settings of a run.
pub fn print_run_settings(command: &str, selection: Option<&str>, target: Option<&str>) {
    eprintln!();
    eprintln!("{}", style("Run:").bold());
    eprintln!("  Command: {}", command);
    eprintln!("  Selection: {}", selection.unwrap_or("all meetings"));
    if let Some(target) = target {
        eprintln!("  Directory: {}", target);
    }
    eprintln!();
}
