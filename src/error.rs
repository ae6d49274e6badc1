use thiserror::Error;

pub type SplitResult<T> = Result<T, SplitError>;

#[derive(Error, Debug)]
pub enum SplitError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Workbook error: {0}")]
    Workbook(String),

    #[error("Required sheet not found in source workbook: {0}")]
    TableMissing(String),

    #[error("Anchor marker {marker:?} not found in sheet {sheet:?}")]
    AnchorNotFound { sheet: String, marker: String },

    #[error("Report error: {0}")]
    Report(String),
}
