use thiserror::Error;

pub mod types;
pub mod utils;
pub mod env;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("environment error: {0}")]
    Env(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_text_is_ok() {
        assert_eq!(types::HEALTH_TEXT, "Ok");
    }

    #[test]
    fn core_error_display() {
        let e = CoreError::Env("missing".into());
        assert_eq!(e.to_string(), "environment error: missing");
    }
}
