//! Wire request/response models for the platform resource families.
//!
//! Field names follow the platform's camelCase wire convention; optional
//! fields are skipped on serialization when unset.

pub mod accounts;
pub mod certificates;
pub mod db;
pub mod platforms;
pub mod safes;

pub use accounts::{
    AccountDetails, AccountsFilter, AccountsStats, AddAccountRequest, SecretManagement,
    SecretType, UpdateAccountRequest,
};
pub use certificates::{Certificate, CreateCertificateRequest};
pub use db::{AddDbSecretRequest, AddDbTargetRequest, DbSecret, DbSecretType, DbTarget};
pub use platforms::Platform;
pub use safes::{
    AddSafeMemberRequest, AddSafeRequest, MemberType, SafeDetails, SafeMember, SafeStats,
    UpdateSafeMemberRequest, UpdateSafeRequest,
};
