//! Composer session: an immutable selection snapshot and the reducer that advances it.
//!
//! INVARIANT: changing category or subtype always clears the field values, so values
//! typed for one letter kind never leak into another.

use thiserror::Error;

use crate::composer::catalog::{Catalog, Category, FieldDescriptor, Subtype};
use crate::composer::conversation::Conversation;
use crate::composer::prompt::{compose, FieldValues};
use crate::composer::task::GenerationStatus;
use crate::composer::tone::Tone;
use crate::export::{export_filename, ExportFormat};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComposerError {
    #[error("Unknown category '{0}'")]
    UnknownCategory(String),

    #[error("Unknown subtype '{subtype}' in category '{category}'")]
    UnknownSubtype { category: String, subtype: String },

    #[error("Unknown field '{0}' for the selected letter")]
    UnknownField(String),

    #[error("A generation is already in flight")]
    AlreadyInFlight,

    #[error("No generation is in flight")]
    NotInFlight,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SelectCategory(String),
    SelectSubtype(String),
    SetField { name: String, value: String },
    SetTone(Tone),
    GenerationStarted,
    /// `Err` carries the text shown in place of a reply.
    GenerationSettled(Result<String, String>),
    /// Hand edits to the generated letter; only interactive sessions send this.
    #[allow(dead_code)]
    EditOutput(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposerState {
    pub category: String,
    pub subtype: String,
    pub fields: FieldValues,
    pub tone: Tone,
    pub status: GenerationStatus,
    /// Last generated letter; user edits land here too.
    pub output: String,
}

impl ComposerState {
    /// First category, its first subtype, no values, default tone.
    pub fn initial(catalog: &Catalog) -> Self {
        let category = catalog.first_category();
        Self {
            category: category.name.clone(),
            subtype: category.first_subtype().name.clone(),
            fields: FieldValues::new(),
            tone: Tone::default(),
            status: GenerationStatus::Idle,
            output: String::new(),
        }
    }

    /// The trigger stays disabled while a request is outstanding.
    #[allow(dead_code)]
    pub fn can_generate(&self) -> bool {
        !self.status.is_in_flight()
    }

    pub fn field_descriptors<'a>(
        &self,
        catalog: &'a Catalog,
    ) -> Result<&'a [FieldDescriptor], ComposerError> {
        let (category, subtype) = self.selection(catalog)?;
        Ok(category.fields_for(subtype))
    }

    pub fn prompt(&self, catalog: &Catalog) -> Result<String, ComposerError> {
        let fields = self.field_descriptors(catalog)?;
        Ok(compose(
            &self.category,
            &self.subtype,
            fields,
            &self.fields,
            self.tone,
        ))
    }

    /// Single-message conversation carrying the composed prompt.
    pub fn conversation(&self, catalog: &Catalog) -> Result<Conversation, ComposerError> {
        Ok(Conversation::new().with_user(self.prompt(catalog)?))
    }

    pub fn export_filename(&self, format: ExportFormat) -> String {
        export_filename(&self.subtype, format)
    }

    fn selection<'a>(
        &self,
        catalog: &'a Catalog,
    ) -> Result<(&'a Category, &'a Subtype), ComposerError> {
        let category = catalog
            .category(&self.category)
            .ok_or_else(|| ComposerError::UnknownCategory(self.category.clone()))?;
        let subtype = category
            .subtype(&self.subtype)
            .ok_or_else(|| ComposerError::UnknownSubtype {
                category: self.category.clone(),
                subtype: self.subtype.clone(),
            })?;
        Ok((category, subtype))
    }
}

/// Applies `action` to `state`, returning the next snapshot. `state` is never modified.
pub fn reduce(
    catalog: &Catalog,
    state: &ComposerState,
    action: Action,
) -> Result<ComposerState, ComposerError> {
    let mut next = state.clone();

    match action {
        Action::SelectCategory(name) => {
            let category = catalog
                .category(&name)
                .ok_or_else(|| ComposerError::UnknownCategory(name.clone()))?;
            next.subtype = category.first_subtype().name.clone();
            next.category = name;
            next.fields.clear();
        }
        Action::SelectSubtype(name) => {
            let category = catalog
                .category(&state.category)
                .ok_or_else(|| ComposerError::UnknownCategory(state.category.clone()))?;
            if category.subtype(&name).is_none() {
                return Err(ComposerError::UnknownSubtype {
                    category: state.category.clone(),
                    subtype: name,
                });
            }
            next.subtype = name;
            next.fields.clear();
        }
        Action::SetField { name, value } => {
            let known = state
                .field_descriptors(catalog)?
                .iter()
                .any(|f| f.name == name);
            if !known {
                return Err(ComposerError::UnknownField(name));
            }
            next.fields.insert(name, value);
        }
        Action::SetTone(tone) => next.tone = tone,
        Action::GenerationStarted => {
            if state.status.is_in_flight() {
                return Err(ComposerError::AlreadyInFlight);
            }
            next.status = GenerationStatus::InFlight;
        }
        Action::GenerationSettled(result) => {
            if !state.status.is_in_flight() {
                return Err(ComposerError::NotInFlight);
            }
            next.output = match &result {
                Ok(reply) => reply.clone(),
                Err(message) => message.clone(),
            };
            next.status = GenerationStatus::Settled(result);
        }
        Action::EditOutput(text) => next.output = text,
    }

    Ok(next)
}
