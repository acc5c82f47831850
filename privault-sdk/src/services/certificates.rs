use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::RestClient;
use crate::models::certificates::{Certificate, CreateCertificateRequest};
use crate::pager::{self, Pager};
use crate::services::PLATFORM_AUTH;
use privault_core::{AuthenticatorSet, ServiceCore, ServiceDescriptor};

/// Certificate inventory: listing, retrieval, issuance, deletion.
#[derive(Clone)]
pub struct CertificatesService {
    core: ServiceCore,
    client: RestClient,
}

impl CertificatesService {
    pub const NAME: &'static str = "certificates";

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

    pub async fn certificate(&self, certificate_id: &str) -> Result<Certificate> {
        let response = self
            .client
            .get(&certificate_path(certificate_id), &[])
            .await?;
        Ok(response.json().await?)
    }

    /// Stream the certificate inventory. This endpoint wraps its pages in
    /// a nested `{"certificates": {"items": [...]}}` envelope.
    pub fn list_certificates(&self) -> Pager<Certificate> {
        pager::stream(
            self.client.clone(),
            CERTIFICATES_PATH.to_string(),
            Vec::new(),
            |value| Ok(serde_json::from_value(value)?),
        )
    }

    pub async fn create_certificate(
        &self,
        request: &CreateCertificateRequest,
    ) -> Result<Certificate> {
        let response = self.client.post(CERTIFICATES_PATH, request).await?;
        Ok(response.json().await?)
    }

    pub async fn delete_certificate(&self, certificate_id: &str) -> Result<()> {
        self.client.delete(&certificate_path(certificate_id)).await?;
        Ok(())
    }
}

const CERTIFICATES_PATH: &str = "/api/certificates";

fn certificate_path(certificate_id: &str) -> String {
    format!("{CERTIFICATES_PATH}/{certificate_id}")
}
