use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiaryError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Invalid stored data: {0}")]
    ParseError(String),

    #[error("Unsupported locale: {0}")]
    UnsupportedLocale(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid month: {year}-{month}")]
    InvalidMonth { year: i32, month: u32 },

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Export error: {0}")]
    ExportError(String),

    #[error("Invalid trade: {0}")]
    InvalidTrade(String),
}

impl From<rusqlite::Error> for DiaryError {
    fn from(err: rusqlite::Error) -> Self {
        DiaryError::DatabaseError(err.to_string())
    }
}

impl From<serde_json::Error> for DiaryError {
    fn from(err: serde_json::Error) -> Self {
        DiaryError::ParseError(err.to_string())
    }
}

impl From<std::io::Error> for DiaryError {
    fn from(err: std::io::Error) -> Self {
        DiaryError::IoError(err.to_string())
    }
}

impl From<csv::Error> for DiaryError {
    fn from(err: csv::Error) -> Self {
        DiaryError::ExportError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DiaryError>;
