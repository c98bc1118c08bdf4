use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("duplicate code: {0} already belongs to another product")]
    DuplicateCode(String),
    #[error("not found: no product with id {0}")]
    NotFound(u64),
    #[error("no products exist")]
    NoData,
    #[error("parse error: {0}")]
    Parse(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ServiceError {
    pub fn missing_field(field: &str) -> Self { Self::Validation(format!("{} is required", field)) }
}

impl From<serde_json::Error> for ServiceError {
    fn from(e: serde_json::Error) -> Self { Self::Parse(e.to_string()) }
}
