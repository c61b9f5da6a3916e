//! Survey schema: answer slots, their kinds and allowed choice sets.
//!
//! The schema is fixed data built once at startup through [`SchemaBuilder`]. Every
//! integrity problem (undersized multi-choice widths, codes that collide with the
//! storage separator, dangling export columns) is reported by `build()` so it is
//! caught before any request is served or any record is exported.

mod choices;
mod park;

pub use choices::*;
pub use park::national_park_survey;

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::codec::{ChoiceCodec, SEPARATOR};
use crate::errors::SchemaError;

/// Pseudo-code accepted by multi-choice-with-other slots.
pub const OTHER_CODE: &str = "OTHER";
/// Display label for [`OTHER_CODE`].
pub const OTHER_LABEL: &str = "Other";

/// One allowed answer: the stored code and its human-readable label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub code: &'static str,
    pub label: &'static str,
}

impl Choice {
    pub const fn new(code: &'static str, label: &'static str) -> Self {
        Self { code, label }
    }
}

/// The closed set of slot kinds. Storage, validation and display all match on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    SingleChoice {
        choices: &'static [Choice],
    },
    MultiChoice {
        choices: &'static [Choice],
    },
    /// Multi-choice that also accepts [`OTHER_CODE`]. The write-in text lives in the
    /// free-text slot named by `other_text`; the two are not tied together.
    MultiChoiceWithOther {
        choices: &'static [Choice],
        other_text: String,
    },
    FreeText,
    Integer,
}

impl FieldKind {
    /// Stable tag used in the schema endpoint.
    pub fn tag(&self) -> &'static str {
        match self {
            FieldKind::SingleChoice { .. } => "single_choice",
            FieldKind::MultiChoice { .. } => "multi_choice",
            FieldKind::MultiChoiceWithOther { .. } => "multi_choice_with_other",
            FieldKind::FreeText => "free_text",
            FieldKind::Integer => "integer",
        }
    }

    /// Declared choices. Empty for free text and integer slots.
    pub fn choices(&self) -> &'static [Choice] {
        match self {
            FieldKind::SingleChoice { choices }
            | FieldKind::MultiChoice { choices }
            | FieldKind::MultiChoiceWithOther { choices, .. } => choices,
            FieldKind::FreeText | FieldKind::Integer => &[],
        }
    }

    pub fn is_multi(&self) -> bool {
        matches!(
            self,
            FieldKind::MultiChoice { .. } | FieldKind::MultiChoiceWithOther { .. }
        )
    }

    /// Whether `code` may be submitted for this slot today.
    pub fn accepts_code(&self, code: &str) -> bool {
        if matches!(self, FieldKind::MultiChoiceWithOther { .. }) && code == OTHER_CODE {
            return true;
        }
        self.choices().iter().any(|c| c.code == code)
    }

    /// Label for `code`, `None` when the code is not in the current set.
    pub fn label_for(&self, code: &str) -> Option<&'static str> {
        if matches!(self, FieldKind::MultiChoiceWithOther { .. }) && code == OTHER_CODE {
            return Some(OTHER_LABEL);
        }
        self.choices()
            .iter()
            .find(|c| c.code == code)
            .map(|c| c.label)
    }

    /// Width needed to store the value, computed from the choice set.
    ///
    /// `None` for free text, whose width is whatever the schema author declares.
    pub fn required_width(&self) -> Option<usize> {
        let codes = self.choices().iter().map(|c| c.code);
        match self {
            FieldKind::SingleChoice { .. } => Some(codes.map(str::len).max().unwrap_or(0)),
            FieldKind::MultiChoice { .. } => Some(ChoiceCodec::storage_width(codes)),
            FieldKind::MultiChoiceWithOther { .. } => {
                Some(ChoiceCodec::storage_width(codes.chain([OTHER_CODE])))
            }
            FieldKind::FreeText => None,
            FieldKind::Integer => Some(0),
        }
    }
}

/// One named field of the survey.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerSlot {
    pub name: String,
    pub prompt: String,
    pub help: Option<String>,
    /// Heading shared by the rows of a matrix question.
    pub group: Option<String>,
    pub kind: FieldKind,
    /// Maximum stored length in characters. Unused for integer slots.
    pub max_width: usize,
}

impl AnswerSlot {
    pub fn is_integer(&self) -> bool {
        matches!(self.kind, FieldKind::Integer)
    }
}

/// A validated, immutable survey definition.
#[derive(Debug, Clone)]
pub struct SurveySchema {
    slots: Vec<AnswerSlot>,
    index: HashMap<String, usize>,
    export_columns: Vec<String>,
}

impl SurveySchema {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    /// Slots in declaration order.
    pub fn slots(&self) -> &[AnswerSlot] {
        &self.slots
    }

    pub fn slot(&self, name: &str) -> Option<&AnswerSlot> {
        self.index.get(name).map(|&i| &self.slots[i])
    }

    /// Slot names in export order.
    pub fn export_columns(&self) -> &[String] {
        &self.export_columns
    }
}

/// Builder for [`SurveySchema`]. Widths of choice slots are sized from their
/// choice sets unless overridden with [`SchemaBuilder::width`].
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    slots: Vec<AnswerSlot>,
    export_columns: Option<Vec<String>>,
}

impl SchemaBuilder {
    fn push(mut self, name: &str, prompt: &str, kind: FieldKind, width: usize) -> Self {
        self.slots.push(AnswerSlot {
            name: name.to_string(),
            prompt: prompt.to_string(),
            help: None,
            group: None,
            kind,
            max_width: width,
        });
        self
    }

    fn push_sized(self, name: &str, prompt: &str, kind: FieldKind) -> Self {
        let width = kind.required_width().unwrap_or(0);
        self.push(name, prompt, kind, width)
    }

    pub fn single(self, name: &str, prompt: &str, choices: &'static [Choice]) -> Self {
        self.push_sized(name, prompt, FieldKind::SingleChoice { choices })
    }

    pub fn multi(self, name: &str, prompt: &str, choices: &'static [Choice]) -> Self {
        self.push_sized(name, prompt, FieldKind::MultiChoice { choices })
    }

    pub fn multi_with_other(
        self,
        name: &str,
        prompt: &str,
        choices: &'static [Choice],
        other_text: &str,
    ) -> Self {
        let kind = FieldKind::MultiChoiceWithOther {
            choices,
            other_text: other_text.to_string(),
        };
        self.push_sized(name, prompt, kind)
    }

    pub fn text(self, name: &str, prompt: &str, max_len: usize) -> Self {
        self.push(name, prompt, FieldKind::FreeText, max_len)
    }

    pub fn integer(self, name: &str, prompt: &str) -> Self {
        self.push(name, prompt, FieldKind::Integer, 0)
    }

    /// One single-choice slot per item, named `{prefix}_1`, `{prefix}_2`, ...
    /// Every row carries `group` as its heading.
    pub fn single_matrix(
        mut self,
        prefix: &str,
        group: &str,
        items: &[&str],
        choices: &'static [Choice],
    ) -> Self {
        for (i, item) in items.iter().enumerate() {
            self = self
                .single(&format!("{}_{}", prefix, i + 1), item, choices)
                .group(group);
        }
        self
    }

    /// One integer slot per item, named `{prefix}_1`, `{prefix}_2`, ...
    pub fn integer_matrix(mut self, prefix: &str, group: &str, items: &[&str]) -> Self {
        for (i, item) in items.iter().enumerate() {
            self = self
                .integer(&format!("{}_{}", prefix, i + 1), item)
                .group(group);
        }
        self
    }

    fn group(mut self, group: &str) -> Self {
        if let Some(slot) = self.slots.last_mut() {
            slot.group = Some(group.to_string());
        }
        self
    }

    /// Attach help text to the most recently added slot.
    pub fn help(mut self, help: &str) -> Self {
        if let Some(slot) = self.slots.last_mut() {
            slot.help = Some(help.to_string());
        }
        self
    }

    /// Override the storage width of the most recently added slot.
    pub fn width(mut self, width: usize) -> Self {
        if let Some(slot) = self.slots.last_mut() {
            slot.max_width = width;
        }
        self
    }

    /// Fix the export column order. Defaults to declaration order.
    pub fn export_columns<S: AsRef<str>>(mut self, columns: &[S]) -> Self {
        self.export_columns = Some(columns.iter().map(|c| c.as_ref().to_string()).collect());
        self
    }

    pub fn build(self) -> Result<SurveySchema, SchemaError> {
        let mut index = HashMap::with_capacity(self.slots.len());
        for (i, slot) in self.slots.iter().enumerate() {
            if index.insert(slot.name.clone(), i).is_some() {
                return Err(SchemaError::DuplicateSlot(slot.name.clone()));
            }
        }

        for slot in &self.slots {
            check_choices(slot)?;

            if let Some(required) = slot.kind.required_width() {
                if slot.kind.is_multi() && slot.max_width < required {
                    return Err(SchemaError::InsufficientWidth {
                        slot: slot.name.clone(),
                        declared: slot.max_width,
                        required,
                    });
                }
            }

            if let FieldKind::MultiChoiceWithOther { other_text, .. } = &slot.kind {
                let companion = index.get(other_text).map(|&i| &self.slots[i].kind);
                if companion != Some(&FieldKind::FreeText) {
                    return Err(SchemaError::MissingOtherText {
                        slot: slot.name.clone(),
                        other_text: other_text.clone(),
                    });
                }
            }
        }

        let export_columns = match self.export_columns {
            Some(columns) => columns,
            None => self.slots.iter().map(|s| s.name.clone()).collect(),
        };
        if let Some(unknown) = export_columns.iter().find(|c| !index.contains_key(*c)) {
            return Err(SchemaError::UnknownExportColumn(unknown.clone()));
        }

        tracing::debug!(
            "Survey schema built with {} slots, {} export columns",
            self.slots.len(),
            export_columns.len()
        );

        Ok(SurveySchema {
            slots: self.slots,
            index,
            export_columns,
        })
    }
}

fn check_choices(slot: &AnswerSlot) -> Result<(), SchemaError> {
    let choices = slot.kind.choices();
    let is_choice_kind = matches!(
        slot.kind,
        FieldKind::SingleChoice { .. }
            | FieldKind::MultiChoice { .. }
            | FieldKind::MultiChoiceWithOther { .. }
    );
    if is_choice_kind && choices.is_empty() {
        return Err(SchemaError::EmptyChoices(slot.name.clone()));
    }

    let mut seen = HashSet::new();
    for choice in choices {
        if choice.code.is_empty() || choice.code.contains(SEPARATOR) {
            return Err(SchemaError::InvalidCode {
                slot: slot.name.clone(),
                code: choice.code.to_string(),
            });
        }
        if !seen.insert(choice.code) {
            return Err(SchemaError::DuplicateCode {
                slot: slot.name.clone(),
                code: choice.code.to_string(),
            });
        }
    }
    Ok(())
}
