//! CLI output formatting utilities.

use crate::video::Provenance;
use console::style;

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    /// Print an info message.
    pub fn info(msg: &str) {
        println!("{} {}", style(">>").cyan().bold(), msg);
    }

    /// Print a success message.
    pub fn success(msg: &str) {
        println!("{} {}", style(">>").green().bold(), msg);
    }

    /// Print a warning message.
    pub fn warning(msg: &str) {
        eprintln!("{} {}", style(">>").yellow().bold(), msg);
    }

    /// Print an error message.
    pub fn error(msg: &str) {
        eprintln!("{} {}", style(">>").red().bold(), msg);
    }

    /// Print a header.
    pub fn header(msg: &str) {
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a key-value pair.
    pub fn kv(key: &str, value: &str) {
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(msg: &str) {
        println!("  {} {}", style("*").cyan(), msg);
    }

    /// Render the provenance badge. Always reflects the true tier reached.
    pub fn provenance_badge(provenance: Provenance) -> String {
        match provenance {
            Provenance::Official => style("OFFICIAL CAPTIONS").green().bold().to_string(),
            Provenance::MachineTranscribed => {
                style("AI TRANSCRIBED").yellow().bold().to_string()
            }
            Provenance::Fabricated => style("AI GENERATED").red().bold().to_string(),
        }
    }
}
