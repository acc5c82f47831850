//! Client SDK for the Privault privilege management platform.
//!
//! Callers build a [`ClientConfig`], collect their credential handles into
//! an [`AuthenticatorSet`](privault_core::AuthenticatorSet), and obtain
//! composed services from a [`PrivaultClient`]. Listings stream page by
//! page through [`Pager`]; statistics operations fan out one worker per
//! top-level entity and merge into a single map.

pub mod aggregate;
pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod http;
pub mod models;
pub mod pager;
pub mod services;

pub use aggregate::aggregate;
pub use client::{PrivaultClient, default_catalog};
pub use config::ClientConfig;
pub use envelope::Cursor;
pub use error::{Result, SdkError};
pub use http::RestClient;
pub use pager::{Page, Pager};
pub use services::{
    AccountsService, CertificatesService, DbTargetsService, GATEWAY_AUTH, PLATFORM_AUTH,
    PlatformsService, SafesService,
};
