//! Replace the JSON payload of an export.
//!
//! The new payload is read from the given file, or from stdin when no file
//! is given. It is minified before it is written.

use std::error;
use std::io::{self, Read};

fn main() -> Result<(), Box<dyn error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 2 && args.len() != 3 {
        eprintln!("Usage: {} <file> [json-file]", args[0]);
        std::process::exit(1);
    }

    let content = match args.get(2) {
        Some(source) => std::fs::read_to_string(source)?,
        None => {
            let mut buf = String::new();
            io::stdin().lock().read_to_string(&mut buf)?;
            buf
        }
    };

    biexport::write_archive_entry(&args[1], &content)?;
    Ok(())
}
