#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };

    let out = biexport::minify(input);
    assert!(out.len() <= input.len());

    // Minifying valid JSON keeps its value
    if let Ok(expected) = serde_json::from_str::<serde_json::Value>(input) {
        let actual: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(actual, expected);
        assert_eq!(biexport::minify(&out), out);
    }
});
