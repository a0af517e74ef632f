use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("coercion error: {0}")]
    Coerce(String),
    #[error("invalid payload: {0}")]
    Payload(String),
}
