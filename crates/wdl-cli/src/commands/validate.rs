use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use wdl_validate::{Severity, Validator};

pub fn run(file: &Path) -> Result<(), String> {
    let world = super::load_world(file)?;
    let report = Validator::new().validate(&world);

    if report.issues.is_empty() {
        println!("  No issues found in '{}'.", world.meta.title);
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Severity", "Message", "Field"]);

    for issue in &report.issues {
        let severity = match issue.severity {
            Severity::Error => "error".red().to_string(),
            Severity::Warning => "warning".yellow().to_string(),
            Severity::Info => "info".blue().to_string(),
        };
        table.add_row(vec![
            severity,
            issue.message.clone(),
            issue.field_path.clone().unwrap_or_else(|| "—".to_string()),
        ]);
    }

    println!("{table}");
    println!();

    let errors = report.errors().len();
    let warnings = report.warnings().len();
    println!(
        "  {} issue{}: {} error{}, {} warning{}",
        report.issues.len(),
        if report.issues.len() == 1 { "" } else { "s" },
        errors,
        if errors == 1 { "" } else { "s" },
        warnings,
        if warnings == 1 { "" } else { "s" },
    );

    if report.is_valid {
        Ok(())
    } else {
        Err(format!("validation failed with {errors} error(s)"))
    }
}
