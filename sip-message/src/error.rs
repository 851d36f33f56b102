use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building message parts from text.
///
/// Request derivation and address resolution never fail; these only come
/// from the string and number conversions used to build URIs and status
/// lines.
#[derive(Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error("Invalid port '{0}'")]
    InvalidPort(String),

    #[error("Invalid host '{0}'")]
    InvalidHost(String),

    #[error("Invalid uri '{0}'")]
    InvalidUri(String),

    #[error("Invalid status code {0}")]
    InvalidStatusCode(u16),
}
