use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatchError {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Unsupported schema version: found {found}, expected {expected}")]
    UnsupportedSchema { found: u8, expected: u8 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl MatchError {
    /// Errors caused by the caller's input rather than the environment
    pub fn is_input_error(&self) -> bool {
        match self {
            MatchError::InvalidConfig(_)
            | MatchError::InvalidRequest(_)
            | MatchError::UnsupportedSchema { .. } => true,
            MatchError::Json(err) => err.is_data() || err.is_syntax(),
            MatchError::Yaml(_) => true,
            MatchError::Io(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, MatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = MatchError::UnsupportedSchema { found: 3, expected: 1 };
        assert_eq!(err.to_string(), "Unsupported schema version: found 3, expected 1");

        let err = MatchError::InvalidConfig("field.width must be positive".into());
        assert!(err.to_string().contains("field.width"));
    }

    #[test]
    fn test_input_error_classification() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        assert!(MatchError::from(json_err).is_input_error());

        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        assert!(!MatchError::from(io_err).is_input_error());
    }
}
