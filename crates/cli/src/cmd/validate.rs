//! Validate command implementation.

use std::path::Path;

use cmistype_core::types::validate_type_definition;

use super::output::{print_report, print_report_json};
use crate::ValidateArgs;

pub fn run(config: Option<&Path>, args: &ValidateArgs) {
    let _rc = super::load_config(config, "validate");

    let format = super::input_format(&args.input, args.format);
    let type_def = match super::read_input(&args.input, format) {
        Ok(td) => td,
        Err(e) => {
            eprintln!("Error reading {}: {}", args.input.display(), e);
            super::exit(1);
        }
    };

    let errors = validate_type_definition(&type_def);
    tracing::info!(
        input = %args.input.display(),
        %format,
        errors = errors.len(),
        "validated type definition"
    );

    if args.json {
        print_report_json(&type_def, &errors);
    } else {
        print_report(&type_def, &errors);
    }

    if !errors.is_empty() {
        super::exit(1);
    }
}
