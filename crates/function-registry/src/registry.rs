// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

use std::borrow::Cow;
use std::collections::HashMap;

use sqlfn_ir::{FunctionError, FunctionResult, FunctionSignature};
use tracing::{debug, warn};

use crate::builtin;
use crate::config::{RegistrationMode, RegistryConfig};

/// Signature catalog
///
/// Maps each function name to its ordered list of candidate signatures. The
/// catalog is filled once at startup and read-only afterwards, so it can be
/// shared between threads (e.g. behind an `Arc`) without locking.
#[derive(Debug, Clone)]
pub struct FunctionRegistry {
    config: RegistryConfig,
    /// Signatures keyed by (normalized) function name
    functions: HashMap<String, Vec<FunctionSignature>>,
}

impl FunctionRegistry {
    /// Create a new function registry with all builtin functions loaded
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sqlfn_function_registry::FunctionRegistry;
    ///
    /// let registry = FunctionRegistry::new();
    /// assert!(registry.has_function("AVG"));
    /// ```
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create a registry with no functions
    pub fn empty() -> Self {
        Self::with_config(RegistryConfig::without_builtins())
    }

    /// Create a registry from a configuration
    ///
    /// Builtins are loaded when `config.load_builtins` is set, except those
    /// listed in `config.disabled_functions`.
    pub fn with_config(config: RegistryConfig) -> Self {
        let load_builtins = config.load_builtins;
        let mut registry = Self {
            config,
            functions: HashMap::new(),
        };

        if load_builtins {
            for function in builtin::all_functions() {
                if registry.config.is_disabled(function.name) {
                    debug!("Skipping disabled builtin function {}", function.name);
                    continue;
                }
                if let Err(e) = registry.register_signatures(function.name, function.signatures) {
                    warn!("Failed to load builtin function {}: {}", function.name, e);
                }
            }
            debug!("Loaded {} builtin functions", registry.len());
        }

        registry
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Register the ordered signature list of a function
    ///
    /// # Errors
    ///
    /// In [`RegistrationMode::Reject`], returns
    /// [`FunctionError::DuplicateFunctionRegistration`] if `name` is already
    /// registered. In [`RegistrationMode::Merge`] the new signatures are
    /// appended after the existing ones, skipping exact duplicates.
    pub fn register_signatures(
        &mut self,
        name: &str,
        signatures: Vec<FunctionSignature>,
    ) -> FunctionResult<()> {
        let key = self.normalize(name).into_owned();

        match self.functions.get_mut(&key) {
            None => {
                debug!("Registering {} with {} signature(s)", key, signatures.len());
                self.functions.insert(key, signatures);
                Ok(())
            }
            Some(_) if self.config.registration_mode == RegistrationMode::Reject => {
                warn!("Rejected duplicate registration of {}", key);
                Err(FunctionError::DuplicateFunctionRegistration { name: key })
            }
            Some(existing) => {
                let before = existing.len();
                for signature in signatures {
                    if !existing.contains(&signature) {
                        existing.push(signature);
                    }
                }
                debug!(
                    "Merged {} new signature(s) into {}",
                    existing.len() - before,
                    key
                );
                Ok(())
            }
        }
    }

    /// Lookup the candidate signatures of a function, in declaration order
    pub fn get_signatures(&self, name: &str) -> Option<&[FunctionSignature]> {
        self.functions
            .get(&*self.normalize(name))
            .map(Vec::as_slice)
    }

    /// Check if a function is registered
    pub fn has_function(&self, name: &str) -> bool {
        self.get_signatures(name).is_some()
    }

    /// Registered function names, sorted
    pub fn function_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Catalog key for a function name
    pub(crate) fn normalize<'a>(&self, name: &'a str) -> Cow<'a, str> {
        if self.config.case_insensitive_names && name.bytes().any(|b| b.is_ascii_uppercase()) {
            Cow::Owned(name.to_ascii_lowercase())
        } else {
            Cow::Borrowed(name)
        }
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
