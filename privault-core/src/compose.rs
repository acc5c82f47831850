use crate::auth::{AuthenticatorSet, DynAuthenticator};
use crate::catalog::ServiceDescriptor;
use crate::errors::{Error, Result};

/// Validated binding between a service descriptor and the caller's
/// authenticators.
///
/// Composition is all-or-nothing: every required authenticator name must be
/// present in the supplied set, or no service instance exists at all. The
/// core keeps the full supplied set, so optional and extraneous handles
/// remain resolvable by name.
#[derive(Debug, Clone)]
pub struct ServiceCore {
    descriptor: ServiceDescriptor,
    authenticators: AuthenticatorSet,
}

impl ServiceCore {
    /// Validate `authenticators` against `descriptor` and bind them.
    ///
    /// Fails on the first missing required name, identifying both the
    /// service and the requirement.
    pub fn compose(
        descriptor: ServiceDescriptor,
        authenticators: &AuthenticatorSet,
    ) -> Result<Self> {
        for required in descriptor.required() {
            if !authenticators.contains(required) {
                return Err(Error::MissingAuthenticator {
                    service: descriptor.name().to_string(),
                    authenticator: required.clone(),
                });
            }
        }
        Ok(Self {
            descriptor,
            authenticators: authenticators.clone(),
        })
    }

    pub fn descriptor(&self) -> &ServiceDescriptor {
        &self.descriptor
    }

    pub fn authenticators(&self) -> &AuthenticatorSet {
        &self.authenticators
    }

    /// Resolve a bound authenticator by name.
    pub fn authenticator(&self, name: &str) -> Result<DynAuthenticator> {
        self.authenticators
            .get(name)
            .ok_or_else(|| Error::AuthenticatorNotFound(name.to_string()))
    }

    pub fn has_authenticator(&self, name: &str) -> bool {
        self.authenticators.contains(name)
    }
}
