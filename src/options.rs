// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use serde::{Deserialize, Serialize};

/// Environment variable selecting the development mode.
pub const ENV_VAR: &str = "TYPEMETA_ENV";

/// Registry configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RegistryOptions {
    /// Warn when a field's explicit kind disagrees with its design type.
    #[serde(default)]
    pub development: bool,
}

impl RegistryOptions {
    /// Options taken from the process environment.
    ///
    /// Development mode is on when `TYPEMETA_ENV=development`.
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var(ENV_VAR).ok().as_deref())
    }

    fn from_env_value(value: Option<&str>) -> Self {
        RegistryOptions {
            development: matches!(value, Some(v) if v.trim().eq_ignore_ascii_case("development")),
        }
    }

    pub fn from_json_str(s: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}
