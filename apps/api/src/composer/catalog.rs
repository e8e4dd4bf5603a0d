//! Letter catalog: the read-only lookup table of categories, subtypes and fields.
//!
//! Loaded once at startup (embedded default or a JSON file override) and shared
//! behind an `Arc`. Order is significant everywhere: the first category is the
//! initial selection and a category's first subtype is selected when switching to it.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The catalog shipped with the binary.
const BUILTIN_CATALOG: &str = include_str!("../../assets/catalog.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Catalog contains no categories")]
    Empty,

    #[error("Category '{0}' has no subtypes")]
    NoSubtypes(String),

    #[error("Duplicate category '{0}'")]
    DuplicateCategory(String),

    #[error("Duplicate subtype '{subtype}' in category '{category}'")]
    DuplicateSubtype { category: String, subtype: String },

    #[error("Duplicate field '{field}' in '{owner}'")]
    DuplicateField { owner: String, field: String },

    #[error("Blank name in catalog")]
    BlankName,
}

/// A named input required to fill a letter, with optional fallback text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

impl FieldDescriptor {
    #[cfg(test)]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            placeholder: None,
        }
    }
}

/// A specific letter kind. `fields` replaces the category default when present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtype {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<FieldDescriptor>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub subtypes: Vec<Subtype>,
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
}

impl Category {
    pub fn subtype(&self, name: &str) -> Option<&Subtype> {
        self.subtypes.iter().find(|s| s.name == name)
    }

    /// Validation guarantees at least one subtype.
    pub fn first_subtype(&self) -> &Subtype {
        &self.subtypes[0]
    }

    /// Effective field list for `subtype`: its own list if it has one, else the category's.
    pub fn fields_for<'a>(&'a self, subtype: &'a Subtype) -> &'a [FieldDescriptor] {
        subtype.fields.as_deref().unwrap_or(&self.fields)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub categories: Vec<Category>,
}

impl Catalog {
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(raw)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Validation guarantees at least one category.
    pub fn first_category(&self) -> &Category {
        &self.categories[0]
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if self.categories.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen_categories = HashSet::new();
        for category in &self.categories {
            if category.name.trim().is_empty() {
                return Err(CatalogError::BlankName);
            }
            if !seen_categories.insert(category.name.as_str()) {
                return Err(CatalogError::DuplicateCategory(category.name.clone()));
            }
            if category.subtypes.is_empty() {
                return Err(CatalogError::NoSubtypes(category.name.clone()));
            }
            check_fields(&category.name, &category.fields)?;

            let mut seen_subtypes = HashSet::new();
            for subtype in &category.subtypes {
                if subtype.name.trim().is_empty() {
                    return Err(CatalogError::BlankName);
                }
                if !seen_subtypes.insert(subtype.name.as_str()) {
                    return Err(CatalogError::DuplicateSubtype {
                        category: category.name.clone(),
                        subtype: subtype.name.clone(),
                    });
                }
                if let Some(fields) = &subtype.fields {
                    check_fields(&subtype.name, fields)?;
                }
            }
        }

        Ok(())
    }
}

fn check_fields(owner: &str, fields: &[FieldDescriptor]) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for field in fields {
        if field.name.trim().is_empty() {
            return Err(CatalogError::BlankName);
        }
        if !seen.insert(field.name.as_str()) {
            return Err(CatalogError::DuplicateField {
                owner: owner.to_string(),
                field: field.name.clone(),
            });
        }
    }
    Ok(())
}
