use crate::errors::{Error, Result};
use std::fmt;
use std::sync::Arc;

/// Named credential handle a service depends on to make authorized calls.
///
/// Implementations own their credential material; the SDK only ever holds
/// shared references and matches handles against service requirements by
/// `name()`.
pub trait Authenticator: Send + Sync + fmt::Debug {
    /// Stable name used for matching against service descriptors.
    fn name(&self) -> &str;

    /// Produce a bearer token for the next request.
    fn token(&self) -> Result<String>;
}

pub type DynAuthenticator = Arc<dyn Authenticator>;

/// Static API-token authenticator.
#[derive(Clone)]
pub struct ApiTokenAuthenticator {
    name: String,
    token: String,
}

impl ApiTokenAuthenticator {
    /// Construct an authenticator with an explicit name and token.
    pub fn new(name: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            token: token.into(),
        }
    }

    /// Read the token for `name` from `PRIVAULT_<NAME>_TOKEN`.
    pub fn from_env(name: &str) -> Result<Self> {
        let var = format!("PRIVAULT_{}_TOKEN", name.to_ascii_uppercase());
        let token = std::env::var(&var)
            .map_err(|_| Error::Credentials(format!("environment variable {var} is not set")))?;
        if token.trim().is_empty() {
            return Err(Error::Credentials(format!("{var} is empty")));
        }
        Ok(Self::new(name, token))
    }
}

impl Authenticator for ApiTokenAuthenticator {
    fn name(&self) -> &str {
        &self.name
    }

    fn token(&self) -> Result<String> {
        Ok(self.token.clone())
    }
}

impl fmt::Debug for ApiTokenAuthenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiTokenAuthenticator")
            .field("name", &self.name)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Ordered collection of authenticator handles supplied by the caller.
///
/// Lookup is first-match-wins when duplicate names are present.
#[derive(Clone, Default)]
pub struct AuthenticatorSet {
    handles: Vec<DynAuthenticator>,
}

impl AuthenticatorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a handle, keeping insertion order.
    pub fn push(&mut self, handle: DynAuthenticator) {
        self.handles.push(handle);
    }

    /// Builder-style variant of [`push`](Self::push).
    pub fn with(mut self, handle: DynAuthenticator) -> Self {
        self.push(handle);
        self
    }

    /// First handle whose name matches, if any.
    pub fn get(&self, name: &str) -> Option<DynAuthenticator> {
        self.handles
            .iter()
            .find(|handle| handle.name() == name)
            .cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handles.iter().any(|handle| handle.name() == name)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Iterate handles in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &DynAuthenticator> {
        self.handles.iter()
    }

    /// Distinct names in insertion order, first occurrence wins.
    pub fn names(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for handle in &self.handles {
            let name = handle.name();
            if !seen.contains(&name) {
                seen.push(name);
            }
        }
        seen
    }
}

// Debug must not leak credential material; print names only.
impl fmt::Debug for AuthenticatorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthenticatorSet")
            .field("names", &self.names())
            .finish()
    }
}

impl From<Vec<DynAuthenticator>> for AuthenticatorSet {
    fn from(handles: Vec<DynAuthenticator>) -> Self {
        Self { handles }
    }
}

impl FromIterator<DynAuthenticator> for AuthenticatorSet {
    fn from_iter<I: IntoIterator<Item = DynAuthenticator>>(iter: I) -> Self {
        Self {
            handles: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle(name: &str, token: &str) -> DynAuthenticator {
        Arc::new(ApiTokenAuthenticator::new(name, token))
    }

    #[test]
    fn lookup_is_first_match_wins() {
        let set = AuthenticatorSet::new()
            .with(handle("platform", "first"))
            .with(handle("platform", "second"))
            .with(handle("gateway", "gw"));

        let found = set.get("platform").unwrap();
        assert_eq!(found.token().unwrap(), "first");
        assert_eq!(set.names(), vec!["platform", "gateway"]);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn missing_name_is_none() {
        let set = AuthenticatorSet::new().with(handle("platform", "tok"));
        assert!(set.get("identity").is_none());
        assert!(!set.contains("identity"));
        assert!(set.contains("platform"));
    }

    #[test]
    fn debug_redacts_tokens() {
        let set = AuthenticatorSet::new().with(handle("platform", "super-secret"));
        let rendered = format!("{set:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("platform"));
    }
}
