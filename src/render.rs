//! Renders an export payload as an HTML summary page.
//!
//! ```
//! use biexport::render::{render_view, RenderOptions};
//! use biexport::export::ExportKind;
//!
//! let content = r#"{"ReportDefinition":{"Name":"Q1 Sales","Created":"2024-01-01","Id":"r1"}}"#;
//! let view = render_view(content, &RenderOptions::new());
//! assert_eq!(view.kind(), Some(ExportKind::Report));
//! assert!(view.html().contains("<td>r1</td>"));
//! ```
//!
//! Content that isn't JSON still renders: the page explains that no summary
//! is available and shows the raw text instead.
//!
//! ```
//! use biexport::render::{render_view, RenderOptions};
//!
//! let view = render_view("{not json", &RenderOptions::new());
//! assert!(view.error().is_some());
//! assert!(view.html().contains("{not json"));
//! ```

mod errors;
mod escape;
mod summary;

pub use errors::*;
pub use escape::Escaped;
pub use summary::*;

use crate::export::{export_title, ExportKind, ExportPayload};
use rand::{distributions::Alphanumeric, Rng};
use serde_json::Value;
use std::fmt::{self, Display, Formatter};
use tracing::warn;

/// Customizes the rendered page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Stylesheet linked from the page
    stylesheet: Option<String>,

    /// Script loaded at the end of the page
    script: Option<String>,

    /// Source allowed by the content security policy for images and styles
    csp_source: String,

    /// Nonce that allow lists the page's script
    nonce: String,
}

impl RenderOptions {
    /// Creates the structure with default options
    pub fn new() -> Self {
        RenderOptions::default()
    }

    /// Sets the href of the stylesheet to link
    pub fn with_stylesheet(mut self, href: impl Into<String>) -> RenderOptions {
        self.stylesheet = Some(href.into());
        self
    }

    /// Sets the src of the script to load
    pub fn with_script(mut self, src: impl Into<String>) -> RenderOptions {
        self.script = Some(src.into());
        self
    }

    /// Sets the source the content security policy allows styles and images from
    pub fn with_csp_source(mut self, source: impl Into<String>) -> RenderOptions {
        self.csp_source = source.into();
        self
    }

    /// Sets the script nonce instead of a randomly generated one
    pub fn with_nonce(mut self, nonce: impl Into<String>) -> RenderOptions {
        self.nonce = nonce.into();
        self
    }

    /// Returns the script nonce
    pub fn nonce(&self) -> &str {
        &self.nonce
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            stylesheet: None,
            script: None,
            csp_source: String::from("'self'"),
            nonce: generate_nonce(),
        }
    }
}

/// Returns 32 random alphanumeric characters
pub fn generate_nonce() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

/// The outcome of rendering export content
#[derive(Debug)]
pub enum RenderedView {
    /// The content parsed and a summary page was rendered
    Summary {
        kind: ExportKind,
        title: Option<String>,
        html: String,
    },

    /// The content could not be parsed. The page shows the raw text
    Raw { error: RenderError, html: String },
}

impl RenderedView {
    /// Returns the rendered page
    pub fn html(&self) -> &str {
        match self {
            RenderedView::Summary { html, .. } => html,
            RenderedView::Raw { html, .. } => html,
        }
    }

    /// Consumes the view and returns the rendered page
    pub fn into_html(self) -> String {
        match self {
            RenderedView::Summary { html, .. } => html,
            RenderedView::Raw { html, .. } => html,
        }
    }

    /// Returns the kind of export when a summary was rendered
    pub fn kind(&self) -> Option<ExportKind> {
        match self {
            RenderedView::Summary { kind, .. } => Some(*kind),
            RenderedView::Raw { .. } => None,
        }
    }

    /// Returns the reason no summary could be rendered
    pub fn error(&self) -> Option<&RenderError> {
        match self {
            RenderedView::Summary { .. } => None,
            RenderedView::Raw { error, .. } => Some(error),
        }
    }
}

/// Parses the content, classifies it, and renders the summary table rows
pub fn classify_and_render(content: &str) -> Result<(ExportKind, String), RenderError> {
    let value: Value = serde_json::from_str(content)?;
    let payload = ExportPayload::from_value(value);
    Ok((payload.kind(), render_summary(&payload)))
}

/// Re-indents JSON content with two spaces, preserving key order
pub fn pretty_print(content: &str) -> Result<String, RenderError> {
    let value: Value = serde_json::from_str(content)?;
    Ok(serde_json::to_string_pretty(&value)?)
}

/// Renders the full page for the given content
pub fn render_view(content: &str, options: &RenderOptions) -> RenderedView {
    let parsed = serde_json::from_str::<Value>(content)
        .and_then(|value| serde_json::to_string_pretty(&value).map(|pretty| (value, pretty)));

    match parsed {
        Ok((value, pretty)) => {
            let title = export_title(&value);
            let payload = ExportPayload::from_value(value);
            let kind = payload.kind();
            if kind == ExportKind::Unknown {
                warn!("export payload not recognized");
            }

            let page = Page {
                options,
                title: title.as_deref().unwrap_or(""),
                body: SummaryBody {
                    payload: &payload,
                    pretty: &pretty,
                },
            };

            let html = page.to_string();
            RenderedView::Summary { kind, title, html }
        }
        Err(e) => {
            let error = RenderError::from(e);
            warn!(error = %error, "unable to render export summary");
            let page = Page {
                options,
                title: "",
                body: RawBody {
                    error: &error,
                    content,
                },
            };
            let html = page.to_string();
            RenderedView::Raw { error, html }
        }
    }
}

struct Page<'a, B> {
    options: &'a RenderOptions,
    title: &'a str,
    body: B,
}

impl<B: Display> Display for Page<'_, B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let options = self.options;
        let csp = Escaped(&options.csp_source);
        let nonce = Escaped(&options.nonce);
        writeln!(f, "<!DOCTYPE html>")?;
        writeln!(f, "<html lang=\"en\">")?;
        writeln!(f, "<head>")?;
        writeln!(f, "<title>Viewing BI Export {}</title>", Escaped(self.title))?;
        writeln!(f, "<meta charset=\"UTF-8\">")?;
        writeln!(
            f,
            "<meta http-equiv=\"Content-Security-Policy\" content=\"default-src 'none'; img-src {csp} blob:; style-src {csp}; script-src 'nonce-{nonce}';\">"
        )?;
        writeln!(
            f,
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">"
        )?;
        if let Some(href) = &options.stylesheet {
            writeln!(f, "<link href=\"{}\" rel=\"stylesheet\" />", Escaped(href))?;
        }
        writeln!(f, "</head>")?;
        writeln!(f, "<body>")?;
        writeln!(f, "<h1>{}</h1>", Escaped(self.title))?;
        write!(f, "{}", self.body)?;
        if let Some(src) = &options.script {
            writeln!(f, "<script nonce=\"{nonce}\" src=\"{}\"></script>", Escaped(src))?;
        }
        writeln!(f, "</body>")?;
        writeln!(f, "</html>")
    }
}

const SPACER_ROW: &str = "<tr><th scope=\"row\"></th><th scope=\"row\"></th><th scope=\"row\"></th><th scope=\"row\"></th></tr>";

struct SummaryBody<'a> {
    payload: &'a ExportPayload,
    pretty: &'a str,
}

impl Display for SummaryBody<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let summary = SummaryTable::new(self.payload);
        if self.payload.kind() == ExportKind::Unknown {
            writeln!(f, "<p>{}</p>", summary)?;
        } else {
            writeln!(
                f,
                "<table border=\"0\" cellspacing=\"0\" cellpadding=\"0\" width=\"100%\">"
            )?;
            writeln!(f, "{}", SPACER_ROW)?;
            write!(f, "{}", summary)?;
            writeln!(f, "{}", SPACER_ROW)?;
            writeln!(f, "</table>")?;
        }

        writeln!(f, "<br>")?;
        writeln!(
            f,
            "<button type=\"button\" class=\"collapsible\">Full JSON Content</button>"
        )?;
        writeln!(f, "<div class=\"content\">")?;
        writeln!(f, "<pre id=\"json\">{}</pre>", Escaped(self.pretty))?;
        writeln!(f, "</div>")
    }
}

struct RawBody<'a> {
    error: &'a RenderError,
    content: &'a str,
}

impl Display for RawBody<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "<p>Unable to render summary: {}</p>", Escaped(&self.error.to_string()))?;
        writeln!(f, "<div class=\"content\">")?;
        writeln!(f, "<pre id=\"json\">{}</pre>", Escaped(self.content))?;
        writeln!(f, "</div>")
    }
}
