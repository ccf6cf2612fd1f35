use console::style;

pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// One-line progress notice for a resolved tag window.
///
/// Printed for every window regardless of verbosity.
pub fn display_progress(from: &str, to: &str) {
    println!("From {} to {}:", from, to);
}

/// End-of-run summary of packages whose tasks failed.
pub fn display_failed_packages(failed: &[String]) {
    display_error(&format!("{} package(s) failed:", failed.len()));
    for package in failed {
        eprintln!("  - {}", package);
    }
}
