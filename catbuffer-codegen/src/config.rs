//! Generator configuration.

use crate::error::CodegenError;
use serde::Deserialize;
use std::collections::BTreeSet;

/// Legacy base types that are spliced into their users instead of being generated.
pub const DEFAULT_EXCLUDED_TYPES: [&str; 5] = [
    "SizePrefixedEntity",
    "VerifiableEntity",
    "EntityBody",
    "EmbeddedTransactionHeader",
    "TransactionHeader",
];

/// Settings shared by every resolver of one compilation run.
///
/// Built with consuming setters or loaded from YAML; missing keys keep their
/// defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Structures that are never generated and never contribute enum values.
    pub excluded_types: BTreeSet<String>,
    /// Whether the first generatable inline composition becomes the super-class.
    pub use_super_class: bool,
    /// Type name suffix marking a bitmask enumeration.
    pub flags_suffix: String,
    /// Name of the raw byte alias.
    pub byte_type: String,
    /// Name of the self-describing entity size attribute.
    pub entity_size_field: String,
    /// Widest raw byte field still treated as a builtin integer.
    pub builtin_width_limit: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            excluded_types: DEFAULT_EXCLUDED_TYPES.iter().map(ToString::to_string).collect(),
            use_super_class: true,
            flags_suffix: "Flags".to_string(),
            byte_type: "byte".to_string(),
            entity_size_field: "size".to_string(),
            builtin_width_limit: 8,
        }
    }
}

impl GeneratorConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a configuration from YAML.
    ///
    /// # Errors
    /// Returns `CodegenError::Config` if the document is malformed.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CodegenError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).map_err(CodegenError::Config)
    }

    /// Replaces the exclusion denylist.
    #[must_use]
    pub fn excluded_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_types = types.into_iter().map(Into::into).collect();
        self
    }

    /// Adds a structure to the exclusion denylist.
    #[must_use]
    pub fn exclude(mut self, name: impl Into<String>) -> Self {
        self.excluded_types.insert(name.into());
        self
    }

    /// Enables or disables super-class detection.
    #[must_use]
    pub fn use_super_class(mut self, enabled: bool) -> Self {
        self.use_super_class = enabled;
        self
    }

    /// Sets the bitmask enumeration suffix.
    #[must_use]
    pub fn flags_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.flags_suffix = suffix.into();
        self
    }

    /// Sets the raw byte alias.
    #[must_use]
    pub fn byte_type(mut self, name: impl Into<String>) -> Self {
        self.byte_type = name.into();
        self
    }

    /// Sets the entity size attribute name.
    #[must_use]
    pub fn entity_size_field(mut self, name: impl Into<String>) -> Self {
        self.entity_size_field = name.into();
        self
    }

    /// Sets the widest builtin integer width.
    #[must_use]
    pub fn builtin_width_limit(mut self, width: u64) -> Self {
        self.builtin_width_limit = width;
        self
    }

    /// Returns true if the structure is generated rather than spliced.
    #[must_use]
    pub fn should_generate_class(&self, name: &str) -> bool {
        !self.excluded_types.contains(name)
    }

    /// Returns true if the type name marks a bitmask enumeration.
    #[must_use]
    pub fn is_flags_type(&self, type_name: &str) -> bool {
        type_name.ends_with(self.flags_suffix.as_str())
    }

    /// Returns true if the type name is the raw byte alias.
    #[must_use]
    pub fn is_byte_type(&self, type_name: &str) -> bool {
        type_name == self.byte_type
    }

    /// Returns true if the attribute name is the entity size attribute.
    #[must_use]
    pub fn is_entity_size_field(&self, name: &str) -> bool {
        name == self.entity_size_field
    }
}
