//! Deployment profiles
//!
//! A profile file maps profile keys to [`ConfigProfile`] entries. Profiles keep their
//! declaration order so the operator sees them in the same order as in the file.

use crate::error::EzbxError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// One DNS route target within a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteEntry {
    pub domain: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_name: Option<String>,
}

impl RouteEntry {
    /// `host.domain` when a host name is set, otherwise just the domain.
    pub fn display_value(&self) -> String {
        match non_empty(self.host_name.as_deref()) {
            Some(host) => format!("{}.{}", host, self.domain),
            None => self.domain.clone(),
        }
    }
}

/// One named entry from the profile file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,
    pub api_endpoint: String,
    pub org_name: String,
    pub space_name: String,
    pub environment: String,
    pub manifest_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sso: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_directory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_command: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<Vec<RouteEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ConfigProfile {
    pub fn app_name(&self) -> Option<&str> {
        non_empty(self.app_name.as_deref())
    }

    pub fn build_directory(&self) -> Option<&str> {
        non_empty(self.build_directory.as_deref())
    }

    pub fn build_command(&self) -> Option<&str> {
        non_empty(self.build_command.as_deref())
    }

    pub fn routes(&self) -> &[RouteEntry] {
        self.route.as_deref().unwrap_or(&[])
    }
}

/// A profile key together with the label shown in the config-key question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileChoice {
    pub key: String,
    pub label: String,
}

/// Ordered set of profiles loaded from one profile file.
#[derive(Debug, Clone, Default)]
pub struct ProfileSet {
    entries: Vec<(String, ConfigProfile)>,
}

impl ProfileSet {
    pub fn new(entries: Vec<(String, ConfigProfile)>) -> Self {
        Self { entries }
    }

    /// Load a profile file. `.toml` files are parsed as TOML, everything else as JSON.
    pub fn load(path: &Path) -> Result<Self, EzbxError> {
        let content = std::fs::read_to_string(path).map_err(|e| EzbxError::ProfileLoad {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let is_toml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        let set = if is_toml {
            Self::from_toml_str(&content)
        } else {
            Self::from_json_str(&content)
        }
        .map_err(|message| EzbxError::ProfileLoad {
            path: path.to_path_buf(),
            message,
        })?;

        if set.is_empty() {
            return Err(EzbxError::ProfileLoad {
                path: path.to_path_buf(),
                message: "file does not define any profiles".to_string(),
            });
        }

        debug!(path = %path.display(), profiles = set.len(), "Loaded profile file");
        Ok(set)
    }

    pub fn from_json_str(content: &str) -> Result<Self, String> {
        let raw: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(content).map_err(|e| e.to_string())?;
        let mut entries = Vec::with_capacity(raw.len());
        for (key, value) in raw {
            let profile: ConfigProfile = serde_json::from_value(value)
                .map_err(|e| format!("profile '{}': {}", key, e))?;
            entries.push((key, profile));
        }
        Ok(Self { entries })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, String> {
        let raw: toml::Table = toml::from_str(content).map_err(|e| e.to_string())?;
        let mut entries = Vec::with_capacity(raw.len());
        for (key, value) in raw {
            let profile: ConfigProfile = value
                .try_into()
                .map_err(|e: toml::de::Error| format!("profile '{}': {}", key, e))?;
            entries.push((key, profile));
        }
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Profile keys with display labels, in file order.
    pub fn choices(&self) -> Vec<ProfileChoice> {
        self.entries
            .iter()
            .map(|(key, profile)| {
                let label = match non_empty(profile.description.as_deref()) {
                    Some(description) => format!("{} - {}", key, description),
                    None => key.clone(),
                };
                ProfileChoice {
                    key: key.clone(),
                    label,
                }
            })
            .collect()
    }

    /// Look up the profile for `key`.
    pub fn resolve(&self, key: &str) -> Result<&ConfigProfile, EzbxError> {
        self.entries
            .iter()
            .find(|(candidate, _)| candidate == key)
            .map(|(_, profile)| profile)
            .ok_or_else(|| EzbxError::ConfigKey(key.to_string()))
    }
}

pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
