use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Configuration-time failures surfaced synchronously, never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("service `{0}` is already registered")]
    ServiceAlreadyRegistered(String),
    #[error("service `{0}` is not registered")]
    ServiceNotRegistered(String),
    #[error("service `{service}` requires authenticator `{authenticator}`, which was not supplied")]
    MissingAuthenticator {
        service: String,
        authenticator: String,
    },
    #[error("authenticator `{0}` is not attached to this service")]
    AuthenticatorNotFound(String),
    #[error("unknown permission tier `{0}`")]
    UnknownTier(String),
    #[error("credentials unavailable: {0}")]
    Credentials(String),
}
