use crate::config::ClientConfig;
use crate::error::Result;
use crate::services::{
    AccountsService, CertificatesService, DbTargetsService, PlatformsService, SafesService,
};
use privault_core::{AuthenticatorSet, ServiceCatalog};

/// Catalog carrying every service this SDK ships, with safes and accounts
/// on the top-level index.
pub fn default_catalog() -> ServiceCatalog {
    let mut catalog = ServiceCatalog::new();
    // A name collision here is a packaging bug in this crate, not a
    // runtime condition; ignore the duplicate-registration errors.
    let _ = catalog.register(SafesService::descriptor(), true);
    let _ = catalog.register(AccountsService::descriptor(), true);
    let _ = catalog.register(PlatformsService::descriptor(), false);
    let _ = catalog.register(CertificatesService::descriptor(), false);
    let _ = catalog.register(DbTargetsService::descriptor(), false);
    catalog
}

/// Entry point binding a tenant configuration and the caller's
/// authenticators to the composed per-resource services.
///
/// Services are composed on demand; a missing required authenticator
/// surfaces when (and only when) the corresponding service is requested.
pub struct PrivaultClient {
    config: ClientConfig,
    authenticators: AuthenticatorSet,
    catalog: ServiceCatalog,
}

impl PrivaultClient {
    pub fn new(config: ClientConfig, authenticators: AuthenticatorSet) -> Self {
        Self {
            config,
            authenticators,
            catalog: default_catalog(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn authenticators(&self) -> &AuthenticatorSet {
        &self.authenticators
    }

    pub fn catalog(&self) -> &ServiceCatalog {
        &self.catalog
    }

    pub fn safes(&self) -> Result<SafesService> {
        SafesService::new(&self.config, &self.authenticators)
    }

    pub fn accounts(&self) -> Result<AccountsService> {
        AccountsService::new(&self.config, &self.authenticators)
    }

    pub fn platforms(&self) -> Result<PlatformsService> {
        PlatformsService::new(&self.config, &self.authenticators)
    }

    pub fn certificates(&self) -> Result<CertificatesService> {
        CertificatesService::new(&self.config, &self.authenticators)
    }

    pub fn db_targets(&self) -> Result<DbTargetsService> {
        DbTargetsService::new(&self.config, &self.authenticators)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use privault_core::{ApiTokenAuthenticator, DynAuthenticator};
    use std::sync::Arc;

    fn authenticators(names: &[&str]) -> AuthenticatorSet {
        names
            .iter()
            .map(|name| Arc::new(ApiTokenAuthenticator::new(*name, "tok")) as DynAuthenticator)
            .collect()
    }

    #[test]
    fn default_catalog_lists_top_level_services_in_order() {
        let catalog = default_catalog();
        let top: Vec<&str> = catalog.top_level().map(|d| d.name()).collect();
        assert_eq!(top, vec!["safes", "accounts"]);
        assert_eq!(catalog.len(), 5);
    }

    #[test]
    fn services_compose_only_with_their_requirements() {
        let client = PrivaultClient::new(
            ClientConfig::new("https://tenant.privault.example"),
            authenticators(&["platform"]),
        );

        assert!(client.safes().is_ok());
        assert!(client.accounts().is_ok());
        // db targets also need the gateway authenticator
        assert!(client.db_targets().is_err());

        let client = PrivaultClient::new(
            ClientConfig::new("https://tenant.privault.example"),
            authenticators(&["platform", "gateway"]),
        );
        assert!(client.db_targets().is_ok());
    }
}
