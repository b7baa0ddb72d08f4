//! Seed file format.
//!
//! A seed file is a JSON document listing, per model kind, an optional model
//! name override and the records to seed, plus a global `overwrite` flag:
//!
//! ```json
//! {
//!   "overwrite": false,
//!   "Role": { "data": [{ "name": "admin", "description": "Administrators" }] },
//!   "User": { "model": "User", "data": [{ "name": "alice" }] },
//!   "RoleMapping": { "data": [{ "user": "alice", "role": "admin" }] }
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::registry::ModelKind;

/// Errors that can occur while loading a seed file.
#[derive(Debug, Error)]
pub enum SeedConfigError {
    #[error("failed to read seed file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed seed configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{kind} seed entry #{index} is missing its '{field}'")]
    MissingField {
        kind: ModelKind,
        index: usize,
        field: &'static str,
    },
}

/// Records that are keyed by a unique name in their table.
pub trait SeedKey {
    fn key(&self) -> &str;
}

/// Seed data for a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleSeed {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl RoleSeed {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl SeedKey for RoleSeed {
    fn key(&self) -> &str {
        &self.name
    }
}

/// Seed data for a user. Seed files may spell the username as `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSeed {
    #[serde(alias = "name")]
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl UserSeed {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: None,
            description: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl SeedKey for UserSeed {
    fn key(&self) -> &str {
        &self.username
    }
}

/// Grants the role named `role` to the user named `user`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingSeed {
    pub user: String,
    pub role: String,
}

impl MappingSeed {
    pub fn new(user: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            role: role.into(),
        }
    }
}

/// Per-model section of the seed file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSeed<T> {
    /// Registered model name to use instead of the conventional one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

impl<T> ModelSeed<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self { model: None, data }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

/// Complete seed configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Replace existing records instead of keeping them
    #[serde(default)]
    pub overwrite: bool,
    #[serde(rename = "User", default, skip_serializing_if = "Option::is_none")]
    pub user: Option<ModelSeed<UserSeed>>,
    #[serde(rename = "Role", default, skip_serializing_if = "Option::is_none")]
    pub role: Option<ModelSeed<RoleSeed>>,
    #[serde(
        rename = "RoleMapping",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub role_mapping: Option<ModelSeed<MappingSeed>>,
}

impl SeedConfig {
    /// Reads and validates a seed file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SeedConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| SeedConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Parses and validates a seed document.
    pub fn from_json_str(raw: &str) -> Result<Self, SeedConfigError> {
        let config: SeedConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every record carries its key fields.
    pub fn validate(&self) -> Result<(), SeedConfigError> {
        check_keys(ModelKind::Role, "name", self.role_data())?;
        check_keys(ModelKind::User, "username", self.user_data())?;

        for (index, mapping) in self.mapping_data().iter().enumerate() {
            let missing = if mapping.user.trim().is_empty() {
                Some("user")
            } else if mapping.role.trim().is_empty() {
                Some("role")
            } else {
                None
            };
            if let Some(field) = missing {
                return Err(SeedConfigError::MissingField {
                    kind: ModelKind::RoleMapping,
                    index,
                    field,
                });
            }
        }

        Ok(())
    }

    pub fn role_data(&self) -> &[RoleSeed] {
        self.role
            .as_ref()
            .map(|section| section.data.as_slice())
            .unwrap_or_default()
    }

    pub fn user_data(&self) -> &[UserSeed] {
        self.user
            .as_ref()
            .map(|section| section.data.as_slice())
            .unwrap_or_default()
    }

    /// Mapping pairs; an absent `RoleMapping` section means no mappings.
    pub fn mapping_data(&self) -> &[MappingSeed] {
        self.role_mapping
            .as_ref()
            .map(|section| section.data.as_slice())
            .unwrap_or_default()
    }

    /// Model name override configured for `kind`, if any.
    pub fn model_override(&self, kind: ModelKind) -> Option<&str> {
        match kind {
            ModelKind::User => self.user.as_ref().and_then(|s| s.model.as_deref()),
            ModelKind::Role => self.role.as_ref().and_then(|s| s.model.as_deref()),
            ModelKind::RoleMapping => self
                .role_mapping
                .as_ref()
                .and_then(|s| s.model.as_deref()),
        }
    }
}

fn check_keys<T: SeedKey>(
    kind: ModelKind,
    field: &'static str,
    records: &[T],
) -> Result<(), SeedConfigError> {
    match records.iter().position(|r| r.key().trim().is_empty()) {
        Some(index) => Err(SeedConfigError::MissingField { kind, index, field }),
        None => Ok(()),
    }
}
