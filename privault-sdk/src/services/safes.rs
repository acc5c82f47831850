use crate::aggregate::aggregate;
use crate::config::ClientConfig;
use crate::error::{Result, SdkError};
use crate::http::RestClient;
use crate::models::safes::{
    AddSafeMemberRequest, AddSafeRequest, SafeDetails, SafeMember, SafeStats, UpdateSafeMemberRequest,
    UpdateSafeRequest,
};
use crate::pager::{self, Pager};
use crate::services::{GATEWAY_AUTH, PLATFORM_AUTH};
use privault_core::{AuthenticatorSet, ServiceCore, ServiceDescriptor, reverse_lookup};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Default worker bound for [`SafesService::safes_stats`]; each worker
/// drives its own paginated listings, so the fan-out is kept modest.
const DEFAULT_STATS_WORKERS: usize = 8;

/// Safe management: CRUD, membership grants, and fan-out statistics.
#[derive(Clone)]
pub struct SafesService {
    core: ServiceCore,
    client: RestClient,
}

impl SafesService {
    pub const NAME: &'static str = "safes";

    /// Declared authenticator requirements for this service.
    pub fn descriptor() -> ServiceDescriptor {
        ServiceDescriptor::new(Self::NAME, [PLATFORM_AUTH], [GATEWAY_AUTH])
    }

    /// Compose the service against the caller's authenticators.
    pub fn new(config: &ClientConfig, authenticators: &AuthenticatorSet) -> Result<Self> {
        let core = ServiceCore::compose(Self::descriptor(), authenticators)?;
        let client = RestClient::new(config, core.authenticator(PLATFORM_AUTH)?)?;
        Ok(Self { core, client })
    }

    pub fn core(&self) -> &ServiceCore {
        &self.core
    }

    pub async fn add_safe(&self, request: &AddSafeRequest) -> Result<SafeDetails> {
        let response = self.client.post(SAFES_PATH, request).await?;
        Ok(response.json().await?)
    }

    pub async fn safe(&self, safe_id: &str) -> Result<SafeDetails> {
        let response = self.client.get(&safe_path(safe_id), &[]).await?;
        Ok(response.json().await?)
    }

    pub async fn update_safe(
        &self,
        safe_id: &str,
        request: &UpdateSafeRequest,
    ) -> Result<SafeDetails> {
        let response = self.client.patch(&safe_path(safe_id), request).await?;
        Ok(response.json().await?)
    }

    pub async fn delete_safe(&self, safe_id: &str) -> Result<()> {
        self.client.delete(&safe_path(safe_id)).await?;
        Ok(())
    }

    /// Stream every safe, one page per remote round trip.
    pub fn list_safes(&self) -> Pager<SafeDetails> {
        self.list_safes_with_query(Vec::new())
    }

    /// Stream safes with explicit initial query parameters (page size,
    /// search). A continuation cursor replaces these on follow-up requests.
    pub fn list_safes_with_query(&self, query: Vec<(String, String)>) -> Pager<SafeDetails> {
        pager::stream(self.client.clone(), SAFES_PATH.to_string(), query, |value| {
            Ok(serde_json::from_value(value)?)
        })
    }

    /// Stream the membership grants of one safe.
    pub fn list_members(&self, safe_id: &str) -> Pager<SafeMember> {
        pager::stream(
            self.client.clone(),
            members_path(safe_id),
            Vec::new(),
            |value| Ok(serde_json::from_value(value)?),
        )
    }

    /// Grant a membership. The request must carry either a canonical tier
    /// name or an explicit permission set; a tier name is resolved (and
    /// validated) client-side before the grant is sent.
    pub async fn add_member(
        &self,
        safe_id: &str,
        request: &AddSafeMemberRequest,
    ) -> Result<SafeMember> {
        let request = resolve_grant(request)?;
        let response = self.client.post(&members_path(safe_id), &request).await?;
        Ok(response.json().await?)
    }

    pub async fn member(&self, safe_id: &str, member_name: &str) -> Result<SafeMember> {
        let response = self
            .client
            .get(&member_path(safe_id, member_name), &[])
            .await?;
        Ok(response.json().await?)
    }

    pub async fn update_member(
        &self,
        safe_id: &str,
        member_name: &str,
        request: &UpdateSafeMemberRequest,
    ) -> Result<SafeMember> {
        let response = self
            .client
            .put(&member_path(safe_id, member_name), request)
            .await?;
        Ok(response.json().await?)
    }

    pub async fn delete_member(&self, safe_id: &str, member_name: &str) -> Result<()> {
        self.client
            .delete(&member_path(safe_id, member_name))
            .await?;
        Ok(())
    }

    /// Compute per-safe statistics, fanning out one worker per safe.
    ///
    /// The map is keyed by safe name. `workers` bounds the fan-out
    /// (default 8); every worker drives its own member and account
    /// listings, so the first failing safe aborts the aggregate with that
    /// safe's error once all workers have finished.
    pub async fn safes_stats(
        &self,
        workers: Option<usize>,
    ) -> Result<BTreeMap<String, SafeStats>> {
        let safes = self.list_safes().try_collect().await?;

        let mut ids = BTreeMap::new();
        for safe in safes {
            ids.insert(safe.safe_name, safe.safe_id);
        }
        let keys: Vec<String> = ids.keys().cloned().collect();
        let ids = Arc::new(ids);

        let service = self.clone();
        aggregate(
            keys,
            Some(workers.unwrap_or(DEFAULT_STATS_WORKERS)),
            move |safe_name| {
                let service = service.clone();
                let ids = Arc::clone(&ids);
                async move {
                    let safe_id = ids.get(&safe_name).cloned().ok_or_else(|| {
                        SdkError::InvalidResponse(format!("safe `{safe_name}` vanished mid-listing"))
                    })?;
                    service.stats_for(&safe_id, &safe_name).await
                }
            },
        )
        .await
    }

    async fn stats_for(&self, safe_id: &str, safe_name: &str) -> Result<SafeStats> {
        let members = self.list_members(safe_id).try_collect().await?;

        // Count accounts through the generic listing; item shape is
        // irrelevant here.
        let query = vec![("safeName".to_string(), safe_name.to_string())];
        let accounts = pager::stream::<serde_json::Value, _>(
            self.client.clone(),
            ACCOUNTS_PATH.to_string(),
            query,
            Ok,
        )
        .try_collect()
        .await?;

        Ok(SafeStats {
            members_count: members.len() as u64,
            accounts_count: accounts.len() as u64,
        })
    }
}

fn resolve_grant(request: &AddSafeMemberRequest) -> Result<AddSafeMemberRequest> {
    let mut request = request.clone();
    if request.permissions.is_none() {
        let tier = request.permission_set.as_deref().ok_or_else(|| {
            SdkError::Config(
                "a member grant needs a permission tier name or an explicit permission set".into(),
            )
        })?;
        request.permissions = Some(reverse_lookup(tier)?);
    }
    Ok(request)
}

const SAFES_PATH: &str = "/api/safes";
const ACCOUNTS_PATH: &str = "/api/accounts";

fn safe_path(safe_id: &str) -> String {
    format!("{SAFES_PATH}/{safe_id}")
}

fn members_path(safe_id: &str) -> String {
    format!("{SAFES_PATH}/{safe_id}/members")
}

fn member_path(safe_id: &str, member_name: &str) -> String {
    format!("{SAFES_PATH}/{safe_id}/members/{member_name}")
}
