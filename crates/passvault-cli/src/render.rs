//! Terminal rendering for vault entries.

use console::style;
use passvault_vault::{OpenedField, VaultEntry};

const MASK: &str = "********";

/// The password as it should be printed: masked unless `reveal` is set.
///
/// A failed field always shows the failure marker so it cannot be mistaken
/// for a masked password.
pub fn password_display(field: &OpenedField, reveal: bool) -> &str {
    match field {
        OpenedField::Value(_) if !reveal => MASK,
        other => other.display_value(),
    }
}

fn optional_display(field: Option<&OpenedField>) -> &str {
    field.map(OpenedField::display_value).unwrap_or("-")
}

/// Render a list of entries as a table.
pub fn render_entry_table(entries: &[VaultEntry], reveal: bool) {
    if entries.is_empty() {
        println!("No entries found.");
        return;
    }

    println!(
        "{:<36}  {:<20}  {:<24}  {:<20}  {}",
        "ID", "TITLE", "USERNAME", "PASSWORD", "URL"
    );
    println!("{}", "-".repeat(120));
    for entry in entries {
        let r = &entry.record;
        println!(
            "{:<36}  {:<20}  {:<24}  {:<20}  {}",
            entry.id,
            r.title.display_value(),
            r.username.display_value(),
            password_display(&r.password, reveal),
            optional_display(r.url.as_ref()),
        );
    }
    println!("\n{} entr{} total.", entries.len(), if entries.len() == 1 { "y" } else { "ies" });
}

/// Render a single entry with all of its fields.
pub fn render_entry(entry: &VaultEntry, reveal: bool) {
    let r = &entry.record;
    println!("{}", style(r.title.display_value()).bold());
    println!("  {:<10} {}", style("id").dim(), entry.id);
    println!("  {:<10} {}", style("username").dim(), r.username.display_value());
    println!("  {:<10} {}", style("password").dim(), password_display(&r.password, reveal));
    println!("  {:<10} {}", style("url").dim(), optional_display(r.url.as_ref()));
    println!("  {:<10} {}", style("notes").dim(), optional_display(r.notes.as_ref()));
    println!(
        "  {:<10} {}",
        style("created").dim(),
        entry.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!(
        "  {:<10} {}",
        style("updated").dim(),
        entry.updated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    let failed = r.failed_fields();
    if !failed.is_empty() {
        eprintln!(
            "{} unreadable fields: {}",
            style("!").yellow().bold(),
            failed.join(", ")
        );
    }
}
