//! Terminal output helpers
//!
//! Styled status lines for the engine and step handlers, plus the spinner
//! shown while a handler runs. Subprocess output is captured elsewhere, so
//! these are the only lines the operator normally sees per step.

use std::time::Duration;

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

/// Print the run banner
pub fn banner(text: &str) {
    println!("{}", Style::new().bold().apply_to(text));
}

/// Print a step header, e.g. `[3/8] Configuring audio output`
pub fn step_header(position: usize, total: usize, title: &str) {
    println!(
        "{} {}",
        Style::new().bold().cyan().apply_to(format!("[{position}/{total}]")),
        Style::new().bold().apply_to(title)
    );
}

/// Print a success line
pub fn ok(message: &str) {
    println!("  {} {}", Style::new().green().apply_to("✓"), message);
}

/// Print a skipped-step line
pub fn skipped(message: &str) {
    println!("  {} {}", Style::new().dim().apply_to("-"), Style::new().dim().apply_to(message));
}

/// Print a warning line
pub fn warn(message: &str) {
    eprintln!(
        "{} {}",
        Style::new().yellow().bold().apply_to("warning:"),
        message
    );
}

/// Print an informational line
pub fn info(message: &str) {
    println!("  {message}");
}

/// Spinner shown while a handler call blocks
pub fn handler_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("  {spinner:.cyan} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}
