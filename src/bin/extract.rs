//! Print the JSON payload of an export to stdout.
//!
//! Pass `--pretty` to re-indent the payload, which is stored minified.

use std::error;
use std::io::{self, Write};

fn main() -> Result<(), Box<dyn error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let pretty = match args.len() {
        2 => false,
        3 if args[2] == "--pretty" => true,
        _ => {
            eprintln!("Usage: {} <file> [--pretty]", args[0]);
            std::process::exit(1);
        }
    };

    let content = biexport::read_archive_entry(&args[1])?;
    let content = if pretty {
        biexport::pretty_print(&content)?
    } else {
        content
    };

    let mut stdout = io::stdout().lock();
    stdout.write_all(content.as_bytes())?;
    writeln!(stdout)?;
    Ok(())
}
