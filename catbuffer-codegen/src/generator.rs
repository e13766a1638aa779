//! Whole-schema compilation driver.

use crate::classify::Classifier;
use crate::config::GeneratorConfig;
use crate::error::CodegenError;
use crate::lang::LanguageHelper;
use crate::model::{ClassModel, EnumModel, TypeModel};
use catbuffer_schema::{Schema, TypeCategory, validate_schema};
use serde::Serialize;

/// One resolved schema entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "artifact", rename_all = "snake_case")]
pub enum Artifact {
    /// Atomic alias.
    Type(TypeModel),
    /// Enumeration.
    Enum(EnumModel),
    /// Structure.
    Class(ClassModel),
}

impl Artifact {
    /// Returns the schema name of the entry.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Type(model) => &model.name,
            Self::Enum(model) => &model.name,
            Self::Class(model) => &model.name,
        }
    }

    /// Returns the generated class name.
    #[must_use]
    pub fn generated_name(&self) -> &str {
        match self {
            Self::Type(model) => &model.generated_name,
            Self::Enum(model) => &model.generated_name,
            Self::Class(model) => &model.generated_name,
        }
    }
}

/// Every artifact of one compilation run, in schema order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompiledSchema {
    artifacts: Vec<Artifact>,
    skipped: Vec<String>,
}

impl CompiledSchema {
    /// Returns all artifacts.
    #[must_use]
    pub fn artifacts(&self) -> &[Artifact] {
        &self.artifacts
    }

    /// Returns the structures skipped by the exclusion denylist.
    #[must_use]
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    /// Looks up an artifact by schema name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Artifact> {
        self.artifacts.iter().find(|a| a.name() == name)
    }

    /// Looks up a class model by structure name.
    #[must_use]
    pub fn class(&self, name: &str) -> Option<&ClassModel> {
        self.classes().find(|c| c.name == name)
    }

    /// Looks up an enum model by name.
    #[must_use]
    pub fn enumeration(&self, name: &str) -> Option<&EnumModel> {
        self.enums().find(|e| e.name == name)
    }

    /// Iterates over the class models.
    pub fn classes(&self) -> impl Iterator<Item = &ClassModel> {
        self.artifacts.iter().filter_map(|a| match a {
            Artifact::Class(model) => Some(model),
            _ => None,
        })
    }

    /// Iterates over the enum models.
    pub fn enums(&self) -> impl Iterator<Item = &EnumModel> {
        self.artifacts.iter().filter_map(|a| match a {
            Artifact::Enum(model) => Some(model),
            _ => None,
        })
    }

    /// Iterates over the type models.
    pub fn types(&self) -> impl Iterator<Item = &TypeModel> {
        self.artifacts.iter().filter_map(|a| match a {
            Artifact::Type(model) => Some(model),
            _ => None,
        })
    }

    /// Returns the number of artifacts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    /// Returns true if nothing was compiled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}

impl IntoIterator for CompiledSchema {
    type Item = Artifact;
    type IntoIter = std::vec::IntoIter<Artifact>;

    fn into_iter(self) -> Self::IntoIter {
        self.artifacts.into_iter()
    }
}

/// Resolves a schema for one target language.
pub struct Generator<'a, L> {
    schema: &'a Schema,
    config: &'a GeneratorConfig,
    language: L,
}

impl<'a, L: LanguageHelper> Generator<'a, L> {
    /// Creates a new generator.
    #[must_use]
    pub fn new(schema: &'a Schema, config: &'a GeneratorConfig, language: L) -> Self {
        Self {
            schema,
            config,
            language,
        }
    }

    /// Returns the target language.
    #[must_use]
    pub fn language(&self) -> &L {
        &self.language
    }

    /// Validates the schema and resolves every entry in schema order.
    ///
    /// # Errors
    /// Returns the first `CodegenError` encountered; nothing is produced for
    /// a failing run.
    pub fn compile(&self) -> Result<CompiledSchema, CodegenError> {
        validate_schema(self.schema, &self.config.byte_type)?;

        let mut compiled = CompiledSchema::default();
        for (name, descriptor) in self.schema.iter() {
            match self.compile_entry(name, descriptor.category())? {
                Some(artifact) => compiled.artifacts.push(artifact),
                None => compiled.skipped.push(name.to_string()),
            }
        }

        tracing::info!(
            "Compiled schema for {}: {} types, {} enums, {} classes, {} skipped",
            self.language.name(),
            compiled.types().count(),
            compiled.enums().count(),
            compiled.classes().count(),
            compiled.skipped.len()
        );
        Ok(compiled)
    }

    /// Resolves a single schema entry.
    ///
    /// Returns `None` for structures on the exclusion denylist.
    ///
    /// # Errors
    /// Returns `CodegenError` if the entry does not exist or fails to resolve.
    pub fn compile_type(&self, name: &str) -> Result<Option<Artifact>, CodegenError> {
        let category = self.schema.category(name).ok_or_else(|| {
            CodegenError::reference(name, name, name, catbuffer_schema::ReferenceKind::Type)
        })?;
        self.compile_entry(name, category)
    }

    fn compile_entry(
        &self,
        name: &str,
        category: TypeCategory,
    ) -> Result<Option<Artifact>, CodegenError> {
        let classifier = Classifier::new(self.schema, self.config);
        let artifact = match category {
            TypeCategory::Atomic => {
                Artifact::Type(TypeModel::build(classifier, &self.language, name)?)
            }
            TypeCategory::Enum => {
                Artifact::Enum(EnumModel::build(classifier, &self.language, name)?)
            }
            TypeCategory::Struct if !self.config.should_generate_class(name) => {
                tracing::warn!("Skipping excluded structure {}", name);
                return Ok(None);
            }
            TypeCategory::Struct => {
                Artifact::Class(ClassModel::build(classifier, &self.language, name)?)
            }
        };
        tracing::debug!("Resolved {} as {}", name, artifact.generated_name());
        Ok(Some(artifact))
    }
}
