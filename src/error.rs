use thiserror::Error;

/// Errors raised while constructing or connecting a provider.
///
/// Evaluation failures never surface through this type; they are reported
/// per call as [`open_feature::EvaluationError`] so the SDK can substitute
/// the caller's default value.
#[derive(Error, Debug)]
pub enum FlagdError {
    #[error("Provider error: {0}")]
    Provider(String),
    #[error("Connection error: {0}")]
    Connection(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<Box<dyn std::error::Error>> for FlagdError {
    fn from(error: Box<dyn std::error::Error>) -> Self {
        FlagdError::Provider(error.to_string())
    }
}

impl From<Box<dyn std::error::Error + Send + Sync>> for FlagdError {
    fn from(error: Box<dyn std::error::Error + Send + Sync>) -> Self {
        FlagdError::Provider(error.to_string())
    }
}

impl From<tonic::transport::Error> for FlagdError {
    fn from(error: tonic::transport::Error) -> Self {
        FlagdError::Connection(error.to_string())
    }
}
