// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Signature descriptions
//!
//! Renders registered overloads for diagnostics and editor hovers.
//!
//! ## Examples
//!
//! ```rust
//! use sqlfn_function_registry::{FunctionRegistry, SignatureDescriber};
//!
//! let registry = FunctionRegistry::new();
//! let describer = SignatureDescriber::new(&registry);
//! let info = describer.describe_function("COUNT").unwrap();
//! assert!(info.contains("count() -> BIGINT"));
//! ```

use sqlfn_ir::FunctionSignature;

use crate::registry::FunctionRegistry;

/// Render each signature as `name(ARGS) -> RET`
pub fn render_signatures(name: &str, signatures: &[FunctionSignature]) -> Vec<String> {
    signatures
        .iter()
        .map(|signature| signature.display_with_name(name))
        .collect()
}

/// Describes registered functions as Markdown
pub struct SignatureDescriber<'a> {
    registry: &'a FunctionRegistry,
}

impl<'a> SignatureDescriber<'a> {
    pub fn new(registry: &'a FunctionRegistry) -> Self {
        Self { registry }
    }

    /// Get a description of a function's overloads
    ///
    /// # Returns
    ///
    /// Markdown with one overload per line in a `sql` code block, or None
    /// if the function is not registered
    pub fn describe_function(&self, name: &str) -> Option<String> {
        let key = self.registry.normalize(name);
        let signatures = self.registry.get_signatures(&key)?;

        let lines = render_signatures(&key, signatures);
        let summary = match signatures.len() {
            1 => "1 overload".to_string(),
            n => format!("{} overloads", n),
        };

        Some(format!("```sql\n{}\n```\n\n{}", lines.join("\n"), summary))
    }

    /// One-line summary of every registered function
    pub fn describe_all(&self) -> Vec<String> {
        self.registry
            .function_names()
            .into_iter()
            .filter_map(|name| {
                let signatures = self.registry.get_signatures(name)?;
                Some(format!("{}: {} overload(s)", name, signatures.len()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_function() {
        let registry = FunctionRegistry::new();
        let describer = SignatureDescriber::new(&registry);

        let info = describer.describe_function("Group_Concat").unwrap();
        assert!(info.starts_with("```sql\n"));
        assert!(info.contains("group_concat(VARCHAR(65533), ANY...) -> VARCHAR(65533)"));
        assert!(info.ends_with("2 overloads"));

        assert!(describer.describe_function("nonexistent").is_none());
    }

    #[test]
    fn test_describe_all() {
        let registry = FunctionRegistry::new();
        let all = SignatureDescriber::new(&registry).describe_all();
        assert_eq!(all.len(), 5);
        assert_eq!(all[0], "avg: 9 overload(s)");
    }

    #[test]
    fn test_render_signatures() {
        let sigs = vec![FunctionSignature::ret(sqlfn_ir::DataType::DEFAULT_DECIMAL128)
            .args(vec![sqlfn_ir::DataType::DEFAULT_DECIMAL32])];
        assert_eq!(
            render_signatures("avg", &sigs),
            vec!["avg(DECIMALV3(9, 0)) -> DECIMALV3(38, 0)"]
        );
    }
}
