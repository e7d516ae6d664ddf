//! Render the summary page of an export and print the HTML to stdout.

use biexport::{RenderOptions, RenderedView};
use std::error;
use std::io::{self, Write};
use tracing::warn;

fn main() -> Result<(), Box<dyn error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <file>", args[0]);
        std::process::exit(1);
    }

    let content = biexport::read_archive_entry(&args[1])?;
    let view = biexport::render_view(&content, &RenderOptions::new());
    if let RenderedView::Raw { error, .. } = &view {
        warn!(path = %args[1], error = %error, "showing raw content");
    }

    io::stdout().lock().write_all(view.html().as_bytes())?;
    Ok(())
}
