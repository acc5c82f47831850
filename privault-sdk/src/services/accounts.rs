use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::RestClient;
use crate::models::accounts::{
    AccountDetails, AccountsFilter, AccountsStats, AddAccountRequest, UpdateAccountRequest,
};
use crate::pager::{self, Pager};
use crate::services::PLATFORM_AUTH;
use privault_core::{AuthenticatorSet, ServiceCore, ServiceDescriptor};

/// Account management: CRUD, filtered listing, and listing-derived totals.
#[derive(Clone)]
pub struct AccountsService {
    core: ServiceCore,
    client: RestClient,
}

impl AccountsService {
    pub const NAME: &'static str = "accounts";

    pub fn descriptor() -> ServiceDescriptor {
        ServiceDescriptor::new(Self::NAME, [PLATFORM_AUTH], Vec::<String>::new())
    }

    pub fn new(config: &ClientConfig, authenticators: &AuthenticatorSet) -> Result<Self> {
        let core = ServiceCore::compose(Self::descriptor(), authenticators)?;
        let client = RestClient::new(config, core.authenticator(PLATFORM_AUTH)?)?;
        Ok(Self { core, client })
    }

    pub fn core(&self) -> &ServiceCore {
        &self.core
    }

    pub async fn add_account(&self, request: &AddAccountRequest) -> Result<AccountDetails> {
        let response = self.client.post(ACCOUNTS_PATH, request).await?;
        Ok(response.json().await?)
    }

    pub async fn account(&self, account_id: &str) -> Result<AccountDetails> {
        let response = self.client.get(&account_path(account_id), &[]).await?;
        Ok(response.json().await?)
    }

    pub async fn update_account(
        &self,
        account_id: &str,
        request: &UpdateAccountRequest,
    ) -> Result<AccountDetails> {
        let response = self.client.patch(&account_path(account_id), request).await?;
        Ok(response.json().await?)
    }

    pub async fn delete_account(&self, account_id: &str) -> Result<()> {
        self.client.delete(&account_path(account_id)).await?;
        Ok(())
    }

    /// Stream accounts matching the filter.
    pub fn list_accounts(&self, filter: &AccountsFilter) -> Pager<AccountDetails> {
        pager::stream(
            self.client.clone(),
            ACCOUNTS_PATH.to_string(),
            filter.to_query(),
            |value| Ok(serde_json::from_value(value)?),
        )
    }

    /// Fold the full listing into per-platform and per-type totals.
    pub async fn accounts_stats(&self) -> Result<AccountsStats> {
        let accounts = self
            .list_accounts(&AccountsFilter::default())
            .try_collect()
            .await?;

        let mut stats = AccountsStats {
            total_accounts: accounts.len() as u64,
            ..AccountsStats::default()
        };
        for account in accounts {
            *stats
                .by_platform
                .entry(account.platform_id.clone())
                .or_insert(0) += 1;
            *stats
                .by_secret_type
                .entry(account.secret_type.as_str().to_string())
                .or_insert(0) += 1;
            if account
                .secret_management
                .as_ref()
                .is_some_and(|management| management.automatic_management_enabled)
            {
                stats.auto_managed += 1;
            }
        }
        Ok(stats)
    }
}

const ACCOUNTS_PATH: &str = "/api/accounts";

fn account_path(account_id: &str) -> String {
    format!("{ACCOUNTS_PATH}/{account_id}")
}
