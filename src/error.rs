use thiserror::Error;

/// Failure raised by a [Transport](crate::Transport) call
pub type Error = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced while configuring a reporter
///
/// These are the only errors that reach the caller, flush failures are reported as `false`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}
