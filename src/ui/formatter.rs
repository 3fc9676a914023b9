//! Formatting functions for UI output.
//!
//! Functions here only print; none of them read input or touch the repository.

use console::style;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").for_stderr().red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Print a blank line followed by a bold stage banner.
pub fn display_stage(icon: &str, message: &str) {
    println!("\n{} {}", icon, style(message).bold());
}

/// Print a labelled version (e.g., "Current version: 1.0.0").
pub fn display_version(label: &str, version: &str) {
    println!("{}: {}", label, style(version).cyan());
}

/// Usage text for a missing argument
pub fn usage_text(program: &str) -> String {
    format!(
        "Usage: {program} [version|major|minor|patch]\n\
         Examples:\n  \
           {program} patch     # 1.0.0 -> 1.0.1\n  \
           {program} minor     # 1.0.0 -> 1.1.0\n  \
           {program} major     # 1.0.0 -> 2.0.0\n  \
           {program} 1.2.3     # Set specific version"
    )
}

/// Print usage text to stderr.
pub fn display_usage(program: &str) {
    eprintln!("{}", usage_text(program));
}

/// Print the steps a real run would take.
///
/// # Arguments
/// * `steps` - Human-readable descriptions, in execution order
pub fn display_dry_run_plan(steps: &[String]) {
    println!("\n{}", style("Dry run - no changes made. Planned steps:").bold());
    for (i, step) in steps.iter().enumerate() {
        println!("  Step {}: {}", i + 1, step);
    }
}

/// Final confirmation after the tag reached the remote.
pub fn display_release_summary(tag: &str, remote: &str) {
    println!(
        "\n{} Successfully released {}!",
        style("✓").green().bold(),
        style(tag).green()
    );
    println!("   Tag pushed: {} -> {}", tag, remote);
}
