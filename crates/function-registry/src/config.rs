// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Registry Configuration
//!
//! This module provides configuration for building a [`FunctionRegistry`].
//!
//! ## Configuration Structure
//!
//! The registry configuration includes:
//! - How a second registration under an existing name is handled
//! - Whether function names are matched case-insensitively
//! - Whether the builtin signature lists are loaded, and which are skipped
//!
//! ## Example
//!
//! ```rust
//! use sqlfn_function_registry::{RegistrationMode, RegistryConfig};
//!
//! let config = RegistryConfig {
//!     registration_mode: RegistrationMode::Merge,
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```
//!
//! [`FunctionRegistry`]: crate::FunctionRegistry

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Behavior of `register_signatures` when the name is already present
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationMode {
    /// Fail with `DuplicateFunctionRegistration`
    #[default]
    Reject,
    /// Append the new signatures after the existing ones, skipping exact duplicates
    Merge,
}

/// Function registry configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistryConfig {
    /// Handling of duplicate registrations
    pub registration_mode: RegistrationMode,

    /// Normalize names to lower case on registration and lookup
    pub case_insensitive_names: bool,

    /// Load the builtin signature lists on construction
    pub load_builtins: bool,

    /// Builtin functions to leave out of the catalog
    pub disabled_functions: Vec<String>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            registration_mode: RegistrationMode::Reject,
            case_insensitive_names: true,
            load_builtins: true,
            disabled_functions: Vec::new(),
        }
    }
}

impl RegistryConfig {
    /// Configuration for an empty catalog
    pub fn without_builtins() -> Self {
        Self {
            load_builtins: false,
            ..Default::default()
        }
    }

    /// Validate the configuration
    ///
    /// Checks that:
    /// - Disabled function names are non-empty and listed once
    /// - Functions are only disabled when builtins are loaded
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.load_builtins && !self.disabled_functions.is_empty() {
            return Err(ConfigError::DisabledWithoutBuiltins);
        }

        let mut seen = HashSet::new();
        for name in &self.disabled_functions {
            if name.trim().is_empty() {
                return Err(ConfigError::InvalidFunctionName { name: name.clone() });
            }
            let key = if self.case_insensitive_names {
                name.to_ascii_lowercase()
            } else {
                name.clone()
            };
            if !seen.insert(key) {
                return Err(ConfigError::DuplicateDisabledFunction { name: name.clone() });
            }
        }

        Ok(())
    }

    /// Whether the builtin `name` should be skipped
    pub fn is_disabled(&self, name: &str) -> bool {
        self.disabled_functions.iter().any(|disabled| {
            if self.case_insensitive_names {
                disabled.eq_ignore_ascii_case(name)
            } else {
                disabled == name
            }
        })
    }

    /// Parse registry config from a settings payload.
    ///
    /// Expected shape:
    /// {
    ///   "functionRegistry": {
    ///     "registrationMode": "reject" | "merge",
    ///     "caseInsensitiveNames": true,
    ///     "loadBuiltins": true,
    ///     "disabledFunctions": ["histogram"]
    ///   }
    /// }
    ///
    /// A payload without a `functionRegistry` section yields the default config.
    pub fn from_settings(settings: &Value) -> Result<Self, ConfigError> {
        let Some(section) = settings.get("functionRegistry") else {
            return Ok(Self::default());
        };

        let config: Self =
            serde_json::from_value(section.clone()).map_err(|e| ConfigError::Parse {
                reason: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Parse registry config from a YAML document with the same keys as the
    /// `functionRegistry` settings section
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Settings payload could not be deserialized
    #[error("Invalid registry settings: {reason}")]
    Parse { reason: String },

    /// Empty or blank function name
    #[error("Invalid function name: '{name}'")]
    InvalidFunctionName { name: String },

    /// Same function disabled twice
    #[error("Function '{name}' is disabled more than once")]
    DuplicateDisabledFunction { name: String },

    /// `disabledFunctions` set while builtins are not loaded
    #[error("disabledFunctions requires loadBuiltins to be enabled")]
    DisabledWithoutBuiltins,
}
