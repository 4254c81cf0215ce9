pub mod convert;
pub mod doctor;
pub mod output;
pub mod validate;

use std::fs::File;
use std::path::Path;

use cmistype_core::codec::{self, WireFormat};
use cmistype_core::config::loader::{default_config_path, ConfigLoader};
use cmistype_core::config::types::ResolvedConfig;
use cmistype_core::types::{TypeDefError, TypeDefinition};

/// Load configuration and install logging, or exit with a FAIL banner.
pub fn load_config(config: Option<&Path>, command: &str) -> ResolvedConfig {
    let rc = match ConfigLoader::load(config) {
        Ok(rc) => rc,
        Err(e) => {
            println!("FAIL cmistype {command}");
            println!("{e}");
            if config.is_none() {
                println!("looked for: {}", default_config_path().display());
            }
            std::process::exit(1);
        }
    };
    crate::logging::init(&rc.logging);
    rc
}

/// Pick the input format from an explicit flag or the file extension.
pub fn input_format(input: &Path, explicit: Option<WireFormat>) -> WireFormat {
    match explicit.or_else(|| WireFormat::from_path(input)) {
        Some(format) => format,
        None => {
            eprintln!(
                "Error: cannot tell the format of {}; pass it explicitly (xml or json)",
                input.display()
            );
            exit(1);
        }
    }
}

/// Read a type definition from a file, or from stdin when the path is "-".
pub fn read_input(input: &Path, format: WireFormat) -> Result<TypeDefinition, TypeDefError> {
    if input == Path::new("-") {
        let stdin = std::io::stdin();
        codec::read(format, stdin.lock())
    } else {
        let file = File::open(input)?;
        codec::read(format, file)
    }
}

/// Exit after flushing the log file.
pub fn exit(code: i32) -> ! {
    crate::logging::flush();
    std::process::exit(code)
}
