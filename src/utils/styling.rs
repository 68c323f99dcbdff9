//! Terminal styling utilities for the pipeline output

use console::{style, Emoji};
use std::path::Path;

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", ">> ");
pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");
pub static DICE: Emoji<'_, '_> = Emoji("🎲 ", "");
pub static SCALE: Emoji<'_, '_> = Emoji("⚖️  ", "");

/// Print the application banner
pub fn print_banner(version: &str) {
    println!();
    println!(
        "    {}",
        style("S H O T S C O P E").cyan().bold()
    );
    println!(
        "    {}",
        style("Shooting-incident EDA and fatal-outcome classification").dim()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Print configuration card
pub fn print_config(input: &Path, seed: u64, train_fraction: f64) {
    let box_width = 56;
    let line = "─".repeat(box_width - 2);

    println!("    ┌{}┐", line);
    println!(
        "    │ {}{}│",
        style("⚙️  Configuration").cyan().bold(),
        " ".repeat(box_width - 20)
    );
    println!("    ├{}┤", line);
    println!(
        "    │  {} Input: {:<40}│",
        FOLDER,
        truncate_path(input, 39)
    );
    println!(
        "    │  {} Seed:  {:<40}│",
        DICE,
        style(seed).yellow()
    );
    println!(
        "    │  {} Train fraction: {:<30}│",
        SCALE,
        style(format!("{:.0}% / {:.0}%", train_fraction * 100.0, (1.0 - train_fraction) * 100.0))
            .yellow()
    );
    println!("    └{}┘", line);
    println!();
}

/// Print a step header with styling
pub fn print_step_header(step_num: u8, title: &str) {
    println!();
    println!(
        "    {} {} {}",
        style(format!("STEP {}", step_num)).cyan().bold(),
        style("│").dim(),
        style(title).white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {} {}", INFO, message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!(
        "    {} {}",
        style("⚠").yellow().bold(),
        style(message).yellow()
    );
}

/// Print elapsed time for a step
pub fn print_step_time(elapsed: std::time::Duration) {
    println!(
        "      {}",
        style(format!("({:.2}s)", elapsed.as_secs_f64())).dim()
    );
}

/// Print the final completion message
pub fn print_completion() {
    println!();
    println!(
        "    {} {}",
        ROCKET,
        style("Shotscope run complete!").green().bold()
    );
    println!();
}

// Helper functions

fn truncate_path(path: &Path, max_len: usize) -> String {
    let path_str = path.display().to_string();
    if path_str.len() <= max_len {
        path_str
    } else {
        format!("...{}", &path_str[path_str.len() - max_len + 3..])
    }
}
