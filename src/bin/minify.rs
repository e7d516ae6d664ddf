//! Minify JSON from stdin to stdout.

use std::{
    error,
    io::{self, Read, Write},
};

fn main() -> Result<(), Box<dyn error::Error>> {
    let mut input = String::new();
    io::stdin().lock().read_to_string(&mut input)?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(biexport::minify(&input).as_bytes())?;
    Ok(())
}
