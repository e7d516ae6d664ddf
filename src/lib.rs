/*!

View and edit BI exports: ZIP archives that wrap a single JSON document
describing a dashboard, a report, or a data model.

## Features

- ✔ Read the JSON payload out of an export without unpacking it to disk
- ✔ Write an edited payload back, minified, leaving any other entries intact
- ✔ Classify the payload and render an HTML summary of it
- ✔ Lenient: a payload of an unexpected shape still renders

## Quick Start

An export named `Q1+Sales.biarchive` stores its payload in an entry named
`Q1 Sales`. Reading and writing resolve the entry name from the path.

```no_run
use biexport::{read_archive_entry, write_archive_entry};

let content = read_archive_entry("Q1+Sales.biarchive")?;
let updated = content.replace("Q1 Sales", "Q2 Sales");
write_archive_entry("Q1+Sales.biarchive", &updated)?;
# Ok::<(), biexport::archive::ArchiveError>(())
```

## Rendering

```rust
use biexport::{render_view, ExportKind, RenderOptions};

let content = r#"{
    "DashboardDefinition": { "Name": "Ops", "Id": "d1" },
    "Version": 2
}"#;

let view = render_view(content, &RenderOptions::new());
assert_eq!(view.kind(), Some(ExportKind::Dashboard));
assert!(view.html().contains("<h1>Ops</h1>"));
```

A payload that is not a recognized export renders `Unknown Type of Exported
File` in place of the table, while content that is not JSON at all renders
a page with the raw text. Neither is an error.

## Documents

[`ExportDocument`] ties the two together for editors: open an export, edit
the text, render it, and save it back or to a new path.

*/

pub mod archive;
mod document;
pub mod export;
mod minify;
pub mod render;

pub use self::archive::{
    copy_archive_as, create_archive, read_archive_entry, write_archive_entry, ArchiveError,
};
pub use self::document::*;
pub use self::export::{export_title, ExportKind, ExportPayload};
pub use self::minify::minify;
pub use self::render::{classify_and_render, pretty_print, render_view, RenderOptions, RenderedView};
