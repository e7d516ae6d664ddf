#![no_main]
use biexport::RenderOptions;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };

    let view = biexport::render_view(input, &RenderOptions::new().with_nonce("fuzz"));
    assert_eq!(view.error().is_some(), biexport::classify_and_render(input).is_err());
});
