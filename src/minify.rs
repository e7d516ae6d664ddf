//! Compaction of JSON text before it is written back to an export.

/// Removes insignificant whitespace and comments from JSON text.
///
/// Spaces, tabs, and line breaks outside of string literals are dropped, as
/// are `//` line comments and `/* */` block comments. String literals are
/// copied verbatim, escapes included. The input does not need to be valid
/// JSON and the transform never fails.
///
/// ```
/// use biexport::minify;
///
/// let actual = minify("{\n  \"a\": 1, // first\n  \"b\": \"x y\"\n}");
/// assert_eq!(actual, r#"{"a":1,"b":"x y"}"#);
/// ```
pub fn minify(input: &str) -> String {
    let data = input.as_bytes();
    let mut out = String::with_capacity(input.len());

    // Pending bytes are flushed in runs. Every cut lands on an ASCII byte so
    // each run is a valid str slice.
    let mut run_start = 0;
    let mut i = 0;
    while i < data.len() {
        match data[i] {
            b'"' => i = string_end(data, i + 1),
            b' ' | b'\t' | b'\n' | b'\r' => {
                out.push_str(&input[run_start..i]);
                i += 1;
                run_start = i;
            }
            b'/' if data.get(i + 1) == Some(&b'/') => {
                out.push_str(&input[run_start..i]);
                i = memchr_from(data, i + 2, b'\n');
                run_start = i;
            }
            b'/' if data.get(i + 1) == Some(&b'*') => {
                out.push_str(&input[run_start..i]);
                i = block_comment_end(data, i + 2);
                run_start = i;
            }
            _ => i += 1,
        }
    }

    out.push_str(&input[run_start..]);
    out
}

/// Returns the index just past the closing quote of a string whose content
/// starts at `start`, or the end of the data for an unterminated string.
#[inline]
fn string_end(data: &[u8], start: usize) -> usize {
    let mut j = start;
    while j < data.len() {
        match data[j] {
            b'\\' => j += 2,
            b'"' => return j + 1,
            _ => j += 1,
        }
    }

    data.len()
}

#[inline]
fn memchr_from(data: &[u8], start: usize, needle: u8) -> usize {
    data.get(start..)
        .and_then(|rest| rest.iter().position(|&x| x == needle))
        .map_or(data.len(), |pos| start + pos)
}

#[inline]
fn block_comment_end(data: &[u8], start: usize) -> usize {
    data.get(start..)
        .and_then(|rest| rest.windows(2).position(|x| x == b"*/"))
        .map_or(data.len(), |pos| start + pos + 2)
}

#[cfg(test)]
mod test {
    use super::*;
    use quickcheck_macros::quickcheck;
    use rstest::*;

    #[rstest]
    #[case("", "")]
    #[case("{}", "{}")]
    #[case(r#"{"a": 1,  "b":   2}"#, r#"{"a":1,"b":2}"#)]
    #[case("{\r\n\t\"a\" : [ 1 , 2 ]\r\n}", r#"{"a":[1,2]}"#)]
    #[case(r#"{"name": "Q1 Sales  Report"}"#, r#"{"name":"Q1 Sales  Report"}"#)]
    #[case(r#"{"q": "say \"hi\"  there"}"#, r#"{"q":"say \"hi\"  there"}"#)]
    #[case(r#"{"p": "C:\\dir\\ name"}"#, r#"{"p":"C:\\dir\\ name"}"#)]
    #[case(r#"{"url": "http://a/b // c"}"#, r#"{"url":"http://a/b // c"}"#)]
    #[case("{\"a\": 1 // trailing\n}", r#"{"a":1}"#)]
    #[case("{/* lead */ \"a\" /* mid */: 1}", r#"{"a":1}"#)]
    #[case("[1, 2 // unterminated", "[1,2")]
    #[case("[1 /* unterminated", "[1")]
    #[case("{\"open\": \"abc  ", "{\"open\":\"abc  ")]
    #[case("{ \"é\" : \"ü ü\" }", "{\"é\":\"ü ü\"}")]
    #[case("not json at all", "notjsonatall")]
    fn test_minify(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(minify(input), expected);
    }

    #[test]
    fn test_minify_pretty_printed_json() {
        let value = serde_json::json!({
            "ReportDefinition": {
                "Name": "Q1 Sales",
                "Accesses": [{"AccessRight": "Read", "AccessorNames": ["a b", "c"]}]
            },
            "Version": 12
        });
        let pretty = serde_json::to_string_pretty(&value).unwrap();
        let minified = minify(&pretty);
        assert_eq!(minified, serde_json::to_string(&value).unwrap());
    }

    #[quickcheck]
    fn minify_is_idempotent_on_json(values: Vec<String>) -> bool {
        let pretty = serde_json::to_string_pretty(&values).unwrap();
        let once = minify(&pretty);
        minify(&once) == once
    }

    #[quickcheck]
    fn minify_never_grows(input: String) -> bool {
        minify(&input).len() <= input.len()
    }

    #[quickcheck]
    fn minify_preserves_json_values(keys: Vec<String>, values: Vec<String>) -> bool {
        let object: serde_json::Map<String, serde_json::Value> = keys
            .into_iter()
            .zip(values)
            .map(|(k, v)| (k, serde_json::Value::String(v)))
            .collect();
        let value = serde_json::Value::Object(object);
        let pretty = serde_json::to_string_pretty(&value).unwrap();
        let reparsed: serde_json::Value = serde_json::from_str(&minify(&pretty)).unwrap();
        reparsed == value
    }
}
