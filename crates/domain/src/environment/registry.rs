//! Environment registry
//!
//! Holds the named environments of a session and the active pointer. The
//! active id always names an environment in the registry.

use std::sync::Arc;

use indexmap::IndexMap;

use super::variable::{Environment, VariableMap};
use crate::error::{DomainError, DomainResult};

/// Named environments plus the currently active one.
///
/// Environments are shared behind `Arc`, so cloning the registry is cheap
/// and edits through [`EnvironmentRegistry::set_variable`] copy only the
/// environment being changed. Earlier clones keep seeing the old values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentRegistry {
    environments: IndexMap<String, Arc<Environment>>,
    active: String,
}

impl EnvironmentRegistry {
    /// Creates a registry from `(id, environment)` pairs.
    ///
    /// # Errors
    /// Returns `DomainError::EmptyRegistry` when no environments are given and
    /// `DomainError::UnknownEnvironment` when `active` is not one of them.
    pub fn new(
        environments: impl IntoIterator<Item = (String, Environment)>,
        active: impl Into<String>,
    ) -> DomainResult<Self> {
        let environments: IndexMap<_, _> = environments
            .into_iter()
            .map(|(id, env)| (id, Arc::new(env)))
            .collect();
        if environments.is_empty() {
            return Err(DomainError::EmptyRegistry);
        }

        let active = active.into();
        if !environments.contains_key(&active) {
            return Err(DomainError::UnknownEnvironment(active));
        }

        Ok(Self {
            environments,
            active,
        })
    }

    /// Id of the active environment.
    #[must_use]
    pub fn active_id(&self) -> &str {
        &self.active
    }

    /// The active environment.
    #[must_use]
    pub fn active(&self) -> &Environment {
        // The constructor and `set_active` keep `active` pointing at a key.
        &self.environments[self.active.as_str()]
    }

    /// Variables of the active environment, used for template resolution.
    #[must_use]
    pub fn active_variables(&self) -> &VariableMap {
        &self.active().variables
    }

    /// Looks up an environment by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Environment> {
        self.environments.get(id).map(Arc::as_ref)
    }

    /// Returns true if the id is registered.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.environments.contains_key(id)
    }

    /// Iterates over `(id, environment)` in display order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Environment)> {
        self.environments
            .iter()
            .map(|(id, env)| (id.as_str(), env.as_ref()))
    }

    /// Number of environments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.environments.len()
    }

    /// Always false; a registry holds at least one environment.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.environments.is_empty()
    }

    /// Switches the active environment.
    ///
    /// # Errors
    /// Returns `DomainError::UnknownEnvironment` and leaves the active
    /// pointer unchanged when `id` is not registered.
    pub fn set_active(&mut self, id: &str) -> DomainResult<()> {
        if !self.environments.contains_key(id) {
            return Err(DomainError::UnknownEnvironment(id.to_string()));
        }
        id.clone_into(&mut self.active);
        Ok(())
    }

    /// Updates the value of an existing variable.
    ///
    /// Variable keys are fixed per environment; only values can change.
    ///
    /// # Errors
    /// Returns `DomainError::UnknownEnvironment` or
    /// `DomainError::UnknownVariable` without modifying anything.
    pub fn set_variable(
        &mut self,
        environment: &str,
        key: &str,
        value: impl Into<String>,
    ) -> DomainResult<()> {
        let slot = self
            .environments
            .get_mut(environment)
            .ok_or_else(|| DomainError::UnknownEnvironment(environment.to_string()))?;
        if !slot.variables.contains_key(key) {
            return Err(DomainError::UnknownVariable {
                environment: environment.to_string(),
                key: key.to_string(),
            });
        }

        if let Some(current) = Arc::make_mut(slot).variables.get_mut(key) {
            *current = value.into();
        }
        Ok(())
    }
}

impl Default for EnvironmentRegistry {
    /// Development, Staging and Production with `baseUrl`, `apiKey` and an
    /// empty `token`; Development is active.
    fn default() -> Self {
        let preset = |name: &str, base_url: &str, api_key: &str| {
            Environment::new(name)
                .with_variable("baseUrl", base_url)
                .with_variable("apiKey", api_key)
                .with_variable("token", "")
        };

        let environments = [
            ("dev", preset("Development", "https://dev.api.example.com", "dev_123456")),
            ("staging", preset("Staging", "https://staging.api.example.com", "staging_123456")),
            ("prod", preset("Production", "https://api.example.com", "prod_123456")),
        ];

        Self {
            environments: environments
                .into_iter()
                .map(|(id, env)| (id.to_string(), Arc::new(env)))
                .collect(),
            active: "dev".to_string(),
        }
    }
}
