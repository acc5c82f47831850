use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::RestClient;
use crate::models::platforms::Platform;
use crate::pager::{self, Pager};
use crate::services::PLATFORM_AUTH;
use privault_core::{AuthenticatorSet, ServiceCore, ServiceDescriptor};
use serde_json::Value;

/// Connection platform catalog: listing, activation state, deletion.
#[derive(Clone)]
pub struct PlatformsService {
    core: ServiceCore,
    client: RestClient,
}

impl PlatformsService {
    pub const NAME: &'static str = "platforms";

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

    pub async fn platform(&self, platform_id: &str) -> Result<Platform> {
        let value: Value = self
            .client
            .get_json(&platform_path(platform_id), &[])
            .await?;
        decode_platform(value)
    }

    /// Stream every platform definition.
    pub fn list_platforms(&self) -> Pager<Platform> {
        pager::stream(
            self.client.clone(),
            PLATFORMS_PATH.to_string(),
            Vec::new(),
            decode_platform,
        )
    }

    pub async fn activate(&self, platform_id: &str) -> Result<()> {
        self.client
            .post(&format!("{}/activate", platform_path(platform_id)), &())
            .await?;
        Ok(())
    }

    pub async fn deactivate(&self, platform_id: &str) -> Result<()> {
        self.client
            .post(&format!("{}/deactivate", platform_path(platform_id)), &())
            .await?;
        Ok(())
    }

    pub async fn delete_platform(&self, platform_id: &str) -> Result<()> {
        self.client.delete(&platform_path(platform_id)).await?;
        Ok(())
    }
}

/// Promote the nested `general` block to the top level before decoding.
/// Platform items arrive as `{"general": {"id": ..}, "properties": {..}}`;
/// the typed model wants the identity fields at the root.
fn decode_platform(value: Value) -> Result<Platform> {
    let value = match value {
        Value::Object(mut map) => {
            if let Some(Value::Object(general)) = map.remove("general") {
                for (key, inner) in general {
                    map.entry(key).or_insert(inner);
                }
            }
            Value::Object(map)
        }
        other => other,
    };
    Ok(serde_json::from_value(value)?)
}

const PLATFORMS_PATH: &str = "/api/platforms";

fn platform_path(platform_id: &str) -> String {
    format!("{PLATFORMS_PATH}/{platform_id}")
}
