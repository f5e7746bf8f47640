// Copyright 2025 Chris Custine
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Application configuration management.
//!
//! This module handles persistent configuration storage using TOML format.
//! It holds the OpenWeatherMap credential; the environment variable takes
//! precedence over the stored key.

use serde::{Deserialize, Serialize};

/// Environment variable consulted before the config file.
pub const API_KEY_ENV_VAR: &str = "OPENWEATHERMAP_API_KEY";

const APP_NAME: &str = "flight-weather";
const CONFIG_NAME: &str = "config";

/// Application configuration stored in TOML format.
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    /// OpenWeatherMap API key (optional, env var takes precedence)
    #[serde(default)]
    pub openweathermap_api_key: Option<String>,
}

impl AppConfig {
    /// Load configuration from disk, creating a default file if missing.
    pub fn load() -> Result<Self, confy::ConfyError> {
        confy::load(APP_NAME, CONFIG_NAME)
    }

    /// Save configuration to disk.
    pub fn save(&self) -> Result<(), confy::ConfyError> {
        confy::store(APP_NAME, CONFIG_NAME, self)
    }

    /// Get the config file path for display to user.
    pub fn get_config_path() -> Result<std::path::PathBuf, confy::ConfyError> {
        confy::get_configuration_file_path(APP_NAME, CONFIG_NAME)
    }
}

/// Resolve API key from environment variable or config.
#[must_use]
pub fn resolve_api_key(config_key: Option<&str>) -> Option<String> {
    // Check environment variable first
    if let Ok(key) = std::env::var(API_KEY_ENV_VAR) {
        if !key.is_empty() {
            return Some(key);
        }
    }

    // Fall back to config
    config_key.map(|s| s.to_string()).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_api_key_prefers_env_then_config() {
        // Single test body to avoid env var races across parallel tests.
        std::env::remove_var(API_KEY_ENV_VAR);
        assert_eq!(resolve_api_key(None), None);
        assert_eq!(resolve_api_key(Some("")), None);
        assert_eq!(
            resolve_api_key(Some("from-config")),
            Some("from-config".to_string())
        );

        std::env::set_var(API_KEY_ENV_VAR, "from-env");
        assert_eq!(
            resolve_api_key(Some("from-config")),
            Some("from-env".to_string())
        );
        std::env::remove_var(API_KEY_ENV_VAR);
    }
}
