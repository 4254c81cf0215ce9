use cmistype_core::config::loader::default_config_path;
use std::path::Path;

pub fn run(config: Option<&Path>) {
    let rc = super::load_config(config, "doctor");

    println!("OK   cmistype doctor");
    match &rc.source {
        Some(path) => println!("path: {}", path.display()),
        None => println!("path: (defaults; no file at {})", default_config_path().display()),
    }
    println!(
        "output.format: {}",
        rc.output.format.map_or("auto", |f| f.as_str())
    );
    println!("output.pretty: {}", rc.output.pretty);
    println!("logging.level: {}", rc.logging.level);
    if let Some(file) = &rc.logging.file {
        println!("logging.file: {}", file.display());
    }
    println!("core: v{}", cmistype_core::version());
}
