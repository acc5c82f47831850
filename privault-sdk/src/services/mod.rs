//! Composed per-resource services.
//!
//! Each service declares its authenticator requirements as a
//! [`ServiceDescriptor`](privault_core::ServiceDescriptor), composes a
//! `ServiceCore` against the caller's set, and drives the REST collaborator.

pub mod accounts;
pub mod certificates;
pub mod db_targets;
pub mod platforms;
pub mod safes;

pub use accounts::AccountsService;
pub use certificates::CertificatesService;
pub use db_targets::DbTargetsService;
pub use platforms::PlatformsService;
pub use safes::SafesService;

/// Primary platform API authenticator every service requires.
pub const PLATFORM_AUTH: &str = "platform";

/// Gateway authenticator used by the database subsystem's side channel.
pub const GATEWAY_AUTH: &str = "gateway";
