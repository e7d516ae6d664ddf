use std::fmt;

/// An error that prevents a summary from being rendered
#[derive(Debug)]
pub struct RenderError(Box<RenderErrorKind>);

impl RenderError {
    pub(crate) fn new(kind: RenderErrorKind) -> RenderError {
        RenderError(Box::new(kind))
    }

    /// Return the specific type of error
    pub fn kind(&self) -> &RenderErrorKind {
        &self.0
    }

    /// Returns the one-based line and column of the error (if available)
    pub fn position(&self) -> Option<(usize, usize)> {
        match *self.0 {
            RenderErrorKind::Json(ref err) if err.line() > 0 => Some((err.line(), err.column())),
            _ => None,
        }
    }
}

/// Specific type of error
#[derive(Debug)]
pub enum RenderErrorKind {
    /// The content is not valid JSON
    Json(serde_json::Error),
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self.0 {
            RenderErrorKind::Json(ref err) => Some(err),
        }
    }
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self.0 {
            RenderErrorKind::Json(ref err) => write!(f, "content is not valid JSON: {}", err),
        }
    }
}

impl From<serde_json::Error> for RenderError {
    fn from(error: serde_json::Error) -> Self {
        RenderError::new(RenderErrorKind::Json(error))
    }
}
