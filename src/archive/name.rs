use crate::archive::errors::{ArchiveError, ArchiveErrorKind};
use std::path::Path;

/// Derives the name of the inner entry from the archive's path.
///
/// Exports store their payload under the archive's own base name: the file
/// name without its final extension, percent-decoded, with `+` standing in
/// for a space.
///
/// ```
/// use biexport::archive::inner_entry_name;
/// use std::path::Path;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let name = inner_entry_name(Path::new("exports/Q1%20Sales+Report.biarchive"))?;
/// assert_eq!(name, "Q1 Sales Report");
/// # Ok(())
/// # }
/// ```
pub fn inner_entry_name(path: &Path) -> Result<String, ArchiveError> {
    let stem = path
        .file_stem()
        .and_then(|x| x.to_str())
        .ok_or_else(|| ArchiveErrorKind::InvalidPath(path.to_path_buf()))?;

    // A stem that percent-decodes to invalid UTF-8 is taken literally
    let decoded = urlencoding::decode(stem).unwrap_or(std::borrow::Cow::Borrowed(stem));
    Ok(decoded.replace('+', " "))
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case("report123.biarchive", "report123")]
    #[case("/tmp/exports/report123.biarchive", "report123")]
    #[case("Q1%20Sales.biarchive", "Q1 Sales")]
    #[case("Q1+Sales+Dashboard.biarchive", "Q1 Sales Dashboard")]
    #[case("a%2Bb.biarchive", "a b")]
    #[case("model.v2.biarchive", "model.v2")]
    #[case("noextension", "noextension")]
    #[case(".hidden", ".hidden")]
    #[case("bad%ZZescape.bi", "bad%ZZescape")]
    #[case("caf%C3%A9.bi", "café")]
    fn test_inner_entry_name(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(inner_entry_name(Path::new(input)).unwrap(), expected);
    }

    #[test]
    fn test_invalid_utf8_decoding_falls_back() {
        assert_eq!(inner_entry_name(Path::new("x%FF.bi")).unwrap(), "x%FF");
    }

    #[test]
    fn test_no_file_name() {
        let err = inner_entry_name(Path::new("/")).unwrap_err();
        assert!(matches!(err.kind(), ArchiveErrorKind::InvalidPath(_)));
    }
}
