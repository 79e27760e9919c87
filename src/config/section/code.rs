//! `[code]` section: interactive code block component.

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};

/// Component that replaces `pre` blocks, and where to import it from.
///
/// # Example
///
/// ```toml
/// [code]
/// component = "Pre"
/// import_source = "~/components/pre"
/// highlight = true
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeConfig {
    /// Component name code blocks are relabeled to.
    pub component: String,
    /// Module the component is default-imported from.
    pub import_source: String,
    /// Split code into highlighted spans.
    pub highlight: bool,
}

impl Default for CodeConfig {
    fn default() -> Self {
        Self {
            component: "Pre".into(),
            import_source: "~/components/pre".into(),
            highlight: true,
        }
    }
}

impl CodeConfig {
    pub const COMPONENT: FieldPath = FieldPath::new("code.component");
    pub const IMPORT_SOURCE: FieldPath = FieldPath::new("code.import_source");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        let valid_ident = self
            .component
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
        match self.component.chars().next() {
            None => diag.error(Self::COMPONENT, "must not be empty"),
            // Lowercase tags are treated as intrinsic elements by JSX renderers.
            Some(first) if !first.is_ascii_uppercase() => diag.error_with_hint(
                Self::COMPONENT,
                format!("`{}` is not a component name", self.component),
                "component names start with an uppercase letter",
            ),
            Some(_) if !valid_ident => diag.error(
                Self::COMPONENT,
                format!("`{}` is not a valid identifier", self.component),
            ),
            Some(_) => {}
        }

        if self.import_source.trim().is_empty() {
            diag.error(Self::IMPORT_SOURCE, "must not be empty");
        }
    }
}
