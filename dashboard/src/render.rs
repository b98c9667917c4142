//! Terminal rendering of stack statuses

use std::fmt::Write;

use colored::Colorize;
use stacks_api::StackStatus;

/// Render one stack as a card
pub fn render_card(status: &StackStatus) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", "Name:".bold(), status.name);
    if status.has_error() {
        let _ = writeln!(out, "{} {}", "Error:".bold().red(), status.error.red());
    }
    let _ = writeln!(out, "{} {}", "Revision:".bold(), status.revision);
    let _ = writeln!(out, "{} {}", "Repo URL:".bold(), status.repo_url.cyan().underline());
    if !status.template_path.is_empty() {
        let _ = writeln!(out, "{} {}", "Template:".bold(), status.template_path);
    }
    if !status.compose_path.is_empty() {
        let _ = writeln!(out, "{} {}", "Compose:".bold(), status.compose_path);
    }
    out
}

/// Render a list of cards, or a placeholder when there is nothing to show
pub fn render_cards(statuses: &[&StackStatus]) -> String {
    if statuses.is_empty() {
        return format!("{}\n", "No items".dimmed());
    }

    statuses
        .iter()
        .map(|status| render_card(status))
        .collect::<Vec<_>>()
        .join("\n")
}
