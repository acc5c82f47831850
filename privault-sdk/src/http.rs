use crate::config::ClientConfig;
use crate::error::{Result, SdkError};
use privault_core::DynAuthenticator;
use reqwest::{Method, RequestBuilder, Response, Url};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

/// Authenticated REST collaborator for the platform APIs.
///
/// Screens every response status: non-2xx becomes [`SdkError::Status`]
/// carrying the platform's error message. No retries.
#[derive(Clone)]
pub struct RestClient {
    base_url: Url,
    client: reqwest::Client,
    authenticator: DynAuthenticator,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: String,
}

impl RestClient {
    /// Build a client bound to one authenticator.
    pub fn new(config: &ClientConfig, authenticator: DynAuthenticator) -> Result<Self> {
        let base_url = Url::parse(config.base_url())
            .map_err(|err| SdkError::Config(format!("invalid base url: {err}")))?;
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent())
            .build()?;
        Ok(Self {
            base_url,
            client,
            authenticator,
            timeout: config.timeout(),
        })
    }

    pub async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Response> {
        let mut url = self.join(path)?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        self.send(self.client.get(url)).await
    }

    /// GET returning the decoded JSON body.
    pub async fn get_json(&self, path: &str, query: &[(String, String)]) -> Result<Value> {
        let response = self.get(path, query).await?;
        Ok(response.json().await?)
    }

    pub async fn post(
        &self,
        path: &str,
        body: &impl serde::Serialize,
    ) -> Result<Response> {
        let url = self.join(path)?;
        self.send(self.client.post(url).json(body)).await
    }

    pub async fn put(&self, path: &str, body: &impl serde::Serialize) -> Result<Response> {
        let url = self.join(path)?;
        self.send(self.client.put(url).json(body)).await
    }

    pub async fn patch(
        &self,
        path: &str,
        body: &impl serde::Serialize,
    ) -> Result<Response> {
        let url = self.join(path)?;
        self.send(self.client.patch(url).json(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<Response> {
        let url = self.join(path)?;
        self.send(self.client.request(Method::DELETE, url)).await
    }

    fn join(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|err| SdkError::InvalidResponse(err.to_string()))
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let token = self.authenticator.token()?;
        let response = builder
            .timeout(self.timeout)
            .bearer_auth(token)
            .send()
            .await?;
        ensure_success(response).await
    }
}

async fn ensure_success(response: Response) -> Result<Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status().as_u16();
    let bytes = response.bytes().await.unwrap_or_default();
    let message = match serde_json::from_slice::<ApiErrorBody>(&bytes) {
        Ok(body) if !body.message.is_empty() => body.message,
        _ => String::from_utf8_lossy(&bytes).to_string(),
    };
    Err(SdkError::Status { status, message })
}
