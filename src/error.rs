#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    #[error("malformed record on line {line}: {content:?}")]
    MalformedRecord { line: usize, content: String },

    #[error("report body is empty")]
    EmptyReport,

    #[error("could not parse report date from {0:?}")]
    ReportDate(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, PoolError>;
