use thiserror::Error;

pub type Result<T> = std::result::Result<T, SqlMirrorError>;

#[derive(Debug, Error)]
pub enum SqlMirrorError {
    #[error("sql parse error: {0}")]
    Parse(#[from] sqlparser::parser::ParserError),
    #[error("unsupported statement: {0}")]
    Unsupported(String),
    #[error("sql synthesis error: {0}")]
    Synthesis(String),
}
