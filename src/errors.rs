use std::fmt;

#[derive(Debug)]
pub enum AppError {
    /// WebDriver command failed (session, navigation, element interaction)
    WebDriverError(String),
    /// Page did not reach a usable state within the timeout
    NavigationError(String),
    /// Invalid URL format
    UrlError(String),
    /// CSV serialization failed
    CsvError(String),
    /// JSON serialization failed
    JsonError(String),
    /// Invalid input format
    InvalidInput(String),
    /// IO operation failed
    IoError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::WebDriverError(msg) => write!(f, "WebDriver error: {msg}"),
            AppError::NavigationError(msg) => write!(f, "Navigation error: {msg}"),
            AppError::UrlError(msg) => write!(f, "Invalid URL: {msg}"),
            AppError::CsvError(msg) => write!(f, "CSV error: {msg}"),
            AppError::JsonError(msg) => write!(f, "JSON error: {msg}"),
            AppError::InvalidInput(msg) => write!(f, "Invalid input: {msg}"),
            AppError::IoError(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

// Conversion implementations for common errors
impl From<thirtyfour::error::WebDriverError> for AppError {
    fn from(err: thirtyfour::error::WebDriverError) -> Self {
        AppError::WebDriverError(err.to_string())
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        AppError::UrlError(err.to_string())
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::CsvError(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::JsonError(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

impl From<dialoguer::Error> for AppError {
    fn from(err: dialoguer::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

// Custom type alias for Results in this application
pub type AppResult<T> = Result<T, AppError>;
