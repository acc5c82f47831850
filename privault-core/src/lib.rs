//! Transport-free domain primitives shared by the Privault client crates.

pub mod auth;
pub mod catalog;
pub mod compose;
pub mod errors;
pub mod permissions;

pub use auth::{ApiTokenAuthenticator, Authenticator, AuthenticatorSet, DynAuthenticator};
pub use catalog::{ServiceCatalog, ServiceDescriptor};
pub use compose::ServiceCore;
pub use errors::{Error, Result};
pub use permissions::{PermissionTier, SafePermissions, canonical_table, classify, reverse_lookup};
