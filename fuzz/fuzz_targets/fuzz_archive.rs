#![no_main]
use biexport::archive::ExportArchive;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(mut archive) = ExportArchive::from_slice(data) else {
        return;
    };

    let Ok(names) = archive.entry_names() else {
        return;
    };

    for name in &names {
        if let Ok(mut entry) = archive.read_entry(name) {
            let _ = std::io::copy(&mut entry, &mut std::io::sink());
        }
    }

    // Rewriting may fail on a corrupt entry but must not panic
    if let Some(name) = names.first() {
        let out = std::io::Cursor::new(Vec::new());
        let _ = archive.rewrite_entry(out, name, b"{}");
    }
});
