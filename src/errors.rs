use thiserror::Error;

pub type CsvlatexResult<T> = std::result::Result<T, CsvlatexError>;

/// Errors csvlatex can have
#[derive(Debug, Error)]
pub enum CsvlatexError {
    #[error(
        "{0} is not a valid file name. The file name should be specified with the '-f' option, or be the last argument."
    )]
    InvalidFile(String),

    #[error("Delimiter should not be empty")]
    DelimiterEmpty,

    #[error(transparent)]
    Regex(#[from] regex::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
