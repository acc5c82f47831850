use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::RestClient;
use crate::models::db::{AddDbSecretRequest, AddDbTargetRequest, DbSecret, DbTarget};
use crate::pager::{self, Pager};
use crate::services::{GATEWAY_AUTH, PLATFORM_AUTH};
use privault_core::{AuthenticatorSet, ServiceCore, ServiceDescriptor};

/// Database targets and their stored secrets.
///
/// Target CRUD goes through the platform API; secret attachment and
/// rotation go through the database gateway's side channel, which carries
/// its own authenticator.
#[derive(Clone)]
pub struct DbTargetsService {
    core: ServiceCore,
    client: RestClient,
    gateway: RestClient,
}

impl DbTargetsService {
    pub const NAME: &'static str = "db_targets";

    pub fn descriptor() -> ServiceDescriptor {
        ServiceDescriptor::new(
            Self::NAME,
            [PLATFORM_AUTH, GATEWAY_AUTH],
            Vec::<String>::new(),
        )
    }

    pub fn new(config: &ClientConfig, authenticators: &AuthenticatorSet) -> Result<Self> {
        let core = ServiceCore::compose(Self::descriptor(), authenticators)?;
        let client = RestClient::new(config, core.authenticator(PLATFORM_AUTH)?)?;
        let gateway = RestClient::new(config, core.authenticator(GATEWAY_AUTH)?)?;
        Ok(Self {
            core,
            client,
            gateway,
        })
    }

    pub fn core(&self) -> &ServiceCore {
        &self.core
    }

    pub async fn target(&self, target_id: &str) -> Result<DbTarget> {
        let response = self.client.get(&target_path(target_id), &[]).await?;
        Ok(response.json().await?)
    }

    pub fn list_targets(&self) -> Pager<DbTarget> {
        pager::stream(
            self.client.clone(),
            TARGETS_PATH.to_string(),
            Vec::new(),
            |value| Ok(serde_json::from_value(value)?),
        )
    }

    pub async fn add_target(&self, request: &AddDbTargetRequest) -> Result<DbTarget> {
        let response = self.client.post(TARGETS_PATH, request).await?;
        Ok(response.json().await?)
    }

    pub async fn delete_target(&self, target_id: &str) -> Result<()> {
        self.client.delete(&target_path(target_id)).await?;
        Ok(())
    }

    pub fn list_secrets(&self) -> Pager<DbSecret> {
        pager::stream(
            self.gateway.clone(),
            SECRETS_PATH.to_string(),
            Vec::new(),
            |value| Ok(serde_json::from_value(value)?),
        )
    }

    /// Attach a stored secret to a target through the gateway.
    pub async fn attach_secret(
        &self,
        target_id: &str,
        request: &AddDbSecretRequest,
    ) -> Result<DbSecret> {
        let response = self
            .gateway
            .post(&format!("{}/secret", target_path(target_id)), request)
            .await?;
        Ok(response.json().await?)
    }

    /// Rotate the secret attached to a target.
    pub async fn rotate_secret(&self, target_id: &str) -> Result<DbSecret> {
        let response = self
            .gateway
            .post(&format!("{}/secret/rotate", target_path(target_id)), &())
            .await?;
        Ok(response.json().await?)
    }
}

const TARGETS_PATH: &str = "/api/db/targets";
const SECRETS_PATH: &str = "/api/db/secrets";

fn target_path(target_id: &str) -> String {
    format!("{TARGETS_PATH}/{target_id}")
}
