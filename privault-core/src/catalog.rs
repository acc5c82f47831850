use crate::errors::{Error, Result};
use std::collections::BTreeMap;

/// Static metadata declaring a service's name and authenticator requirements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDescriptor {
    name: String,
    required: Vec<String>,
    optional: Vec<String>,
}

impl ServiceDescriptor {
    /// Construct a descriptor from requirement name lists.
    pub fn new<N, R, O>(name: N, required: R, optional: O) -> Self
    where
        N: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
        O: IntoIterator,
        O::Item: Into<String>,
    {
        Self {
            name: name.into(),
            required: required.into_iter().map(Into::into).collect(),
            optional: optional.into_iter().map(Into::into).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Authenticator names the service cannot operate without.
    pub fn required(&self) -> &[String] {
        &self.required
    }

    /// Authenticator names the service uses when present.
    pub fn optional(&self) -> &[String] {
        &self.optional
    }
}

/// Write-once catalog mapping service names to their declared requirements.
///
/// Built explicitly at client initialization and passed to composers;
/// registration takes `&mut self`, so post-init mutation from concurrent
/// readers is rejected by the borrow checker rather than left to convention.
#[derive(Debug, Default, Clone)]
pub struct ServiceCatalog {
    by_name: BTreeMap<String, ServiceDescriptor>,
    top_level: Vec<String>,
}

impl ServiceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor, optionally appending it to the ordered
    /// top-level index. The first registration of a name wins; a duplicate
    /// is rejected and leaves the original intact.
    pub fn register(&mut self, descriptor: ServiceDescriptor, top_level: bool) -> Result<()> {
        if self.by_name.contains_key(descriptor.name()) {
            return Err(Error::ServiceAlreadyRegistered(descriptor.name().to_string()));
        }
        if top_level {
            self.top_level.push(descriptor.name().to_string());
        }
        self.by_name
            .insert(descriptor.name().to_string(), descriptor);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<&ServiceDescriptor> {
        self.by_name
            .get(name)
            .ok_or_else(|| Error::ServiceNotRegistered(name.to_string()))
    }

    /// All registered descriptors, ordered by name.
    pub fn descriptors(&self) -> impl Iterator<Item = &ServiceDescriptor> {
        self.by_name.values()
    }

    /// Top-level descriptors in registration order.
    pub fn top_level(&self) -> impl Iterator<Item = &ServiceDescriptor> {
        self.top_level
            .iter()
            .filter_map(|name| self.by_name.get(name))
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
