//! Shared output formatting for validation reports.

use cmistype_core::types::{TypeDefinition, ValidationError};
use serde::Serialize;

/// Validation report for JSON output.
#[derive(Debug, Serialize)]
pub struct ValidationReport<'a> {
    pub id: Option<&'a str>,
    pub valid: bool,
    pub errors: &'a [ValidationError],
}

impl<'a> ValidationReport<'a> {
    pub fn new(type_def: &'a TypeDefinition, errors: &'a [ValidationError]) -> Self {
        Self { id: type_def.id.as_deref(), valid: errors.is_empty(), errors }
    }
}

/// Print a human-readable report: a status line, then one line per error.
pub fn print_report(type_def: &TypeDefinition, errors: &[ValidationError]) {
    let id = display_id(type_def);
    if errors.is_empty() {
        println!("OK   {id}");
        return;
    }

    let noun = if errors.len() == 1 { "error" } else { "errors" };
    println!("FAIL {id} ({} {noun})", errors.len());
    for error in errors {
        println!("  {error}");
    }
}

pub fn print_report_json(type_def: &TypeDefinition, errors: &[ValidationError]) {
    let report = ValidationReport::new(type_def, errors);
    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error serializing report: {e}");
            super::exit(1);
        }
    }
}

fn display_id(type_def: &TypeDefinition) -> &str {
    match type_def.id.as_deref() {
        Some(id) if !id.is_empty() => id,
        _ => "<no id>",
    }
}
