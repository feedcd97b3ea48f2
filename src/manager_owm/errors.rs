use std::fmt;

/// Errors talking to OpenWeatherMap
///
/// `Transport` covers connection and timeout failures, `Status` a response the provider
/// answered with a non-success code, `Document` a body that didn't match the expected shape
#[derive(Debug)]
pub enum OwmError {
    Transport(String),
    Status(u16, String),
    Document(String),
}

impl fmt::Display for OwmError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OwmError::Transport(e) => write!(f, "OwmError::Transport: {}", e),
            OwmError::Status(code, path) => write!(f, "OwmError::Status: {} answered {}", path, code),
            OwmError::Document(e) => write!(f, "OwmError::Document: {}", e),
        }
    }
}
impl From<reqwest::Error> for OwmError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => OwmError::Status(status.as_u16(), e.url().map(|u| u.path().to_string()).unwrap_or_default()),
            None => OwmError::Transport(e.to_string()),
        }
    }
}
impl From<serde_json::Error> for OwmError {
    fn from(e: serde_json::Error) -> Self {
        OwmError::Document(e.to_string())
    }
}
