//! Convert command implementation.

use std::fs;
use std::io::Write;
use std::path::Path;

use cmistype_core::codec::{self, WireFormat};
use cmistype_core::config::types::ResolvedConfig;
use cmistype_core::types::{validate_type_definition, TypeDefError, TypeDefinition};

use crate::ConvertArgs;

pub fn run(config: Option<&Path>, args: &ConvertArgs) {
    let rc = super::load_config(config, "convert");

    let from = super::input_format(&args.input, args.from);
    let to = target_format(args, &rc, from);

    let type_def = match super::read_input(&args.input, from) {
        Ok(td) => td,
        Err(e) => {
            eprintln!("Error reading {}: {}", args.input.display(), e);
            super::exit(1);
        }
    };

    let errors = validate_type_definition(&type_def);
    if !errors.is_empty() {
        tracing::warn!(
            input = %args.input.display(),
            errors = errors.len(),
            "converting a type definition that does not validate"
        );
    }

    // Nothing reaches the destination unless encoding succeeded.
    let mut encoded = Vec::new();
    let result = write_output(&type_def, to, rc.output.pretty, &mut encoded)
        .and_then(|()| deliver(args.output.as_deref(), &encoded).map_err(TypeDefError::from));

    if let Err(e) = result {
        eprintln!("Error writing {to}: {e}");
        super::exit(1);
    }

    tracing::info!(input = %args.input.display(), %from, %to, "converted type definition");
}

/// Target format: flag, then output extension, then config, then the other format.
fn target_format(args: &ConvertArgs, rc: &ResolvedConfig, from: WireFormat) -> WireFormat {
    args.to
        .or_else(|| args.output.as_deref().and_then(WireFormat::from_path))
        .or(rc.output.format)
        .unwrap_or_else(|| from.opposite())
}

fn deliver(output: Option<&Path>, encoded: &[u8]) -> std::io::Result<()> {
    match output {
        Some(path) => fs::write(path, encoded),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(encoded)?;
            stdout.flush()
        }
    }
}

fn write_output<W: Write>(
    type_def: &TypeDefinition,
    format: WireFormat,
    pretty: bool,
    out: &mut W,
) -> Result<(), TypeDefError> {
    codec::write(format, type_def, out, pretty)?;
    // XML already ends with a newline
    if format == WireFormat::Json {
        writeln!(out)?;
        out.flush()?;
    }
    Ok(())
}
