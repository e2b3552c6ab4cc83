use std::fmt;

use crate::api::ApiError;
use crate::config::ConfigError;
use crate::session::TokenError;

/// Unified error type for the client entry points.
#[derive(Debug)]
pub enum AppError {
    Api(ApiError),
    Config(ConfigError),
    Token(TokenError),
    Io(std::io::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Api(e) => write!(f, "API error: {}", e),
            AppError::Config(e) => write!(f, "Config error: {}", e),
            AppError::Token(e) => write!(f, "Token error: {}", e),
            AppError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for AppError {}

impl From<ApiError> for AppError {
    fn from(e: ApiError) -> Self {
        AppError::Api(e)
    }
}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        AppError::Config(e)
    }
}

impl From<TokenError> for AppError {
    fn from(e: TokenError) -> Self {
        AppError::Token(e)
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_wraps_source() {
        let err: AppError = ConfigError::InvalidValue {
            key: "MOKTASHIF_SEARCH_DEBOUNCE_MS",
            value: "x".to_string(),
        }
        .into();
        assert!(err.to_string().starts_with("Config error: invalid value"));
    }
}
