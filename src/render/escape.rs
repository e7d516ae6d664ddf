use std::fmt;

/// A temporary object which writes HTML escaped text when used as an
/// argument to `format!`.
///
/// Used to avoid a needless intermediate allocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Escaped<'a>(pub &'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.0;
        let mut last = 0;
        for (i, b) in data.bytes().enumerate() {
            let replacement = match b {
                b'&' => "&amp;",
                b'<' => "&lt;",
                b'>' => "&gt;",
                b'"' => "&quot;",
                b'\'' => "&#39;",
                _ => continue,
            };

            f.write_str(&data[last..i])?;
            f.write_str(replacement)?;
            last = i + 1;
        }

        f.write_str(&data[last..])
    }
}

/// Writes each item escaped with `sep` in between
pub(crate) fn write_joined<'a>(
    f: &mut fmt::Formatter<'_>,
    items: impl IntoIterator<Item = &'a str>,
    sep: &str,
) -> fmt::Result {
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{}", Escaped(item))?;
    }
    Ok(())
}
