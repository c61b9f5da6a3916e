//! Display resolver: stored value to export-ready text.

use crate::codec::{ChoiceCodec, SEPARATOR};
use crate::models::StoredValue;
use crate::schema::{AnswerSlot, FieldKind};

/// A stored value whose shape does not match its slot kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindMismatch {
    pub kind: &'static str,
    pub found: &'static str,
}

impl std::fmt::Display for KindMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} slot holds a {} value", self.kind, self.found)
    }
}

/// Maps stored answers to the labels written to the export file.
#[derive(Debug, Clone)]
pub struct DisplayResolver {
    separator: String,
}

impl Default for DisplayResolver {
    fn default() -> Self {
        Self {
            separator: SEPARATOR.to_string(),
        }
    }
}

impl DisplayResolver {
    /// Use `separator` between labels of multi-choice answers.
    pub fn with_separator(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
        }
    }

    /// Resolve one slot. An absent value resolves like an empty one.
    pub fn resolve(
        &self,
        slot: &AnswerSlot,
        value: Option<&StoredValue>,
    ) -> Result<String, KindMismatch> {
        let text = match value {
            None => return Ok(String::new()),
            Some(StoredValue::Integer(n)) => {
                return match slot.kind {
                    FieldKind::Integer => Ok(n.map(|n| n.to_string()).unwrap_or_default()),
                    _ => Err(KindMismatch {
                        kind: slot.kind.tag(),
                        found: "integer",
                    }),
                };
            }
            Some(StoredValue::Text(text)) => text,
        };

        match &slot.kind {
            FieldKind::SingleChoice { .. } => {
                Ok(slot.kind.label_for(text).unwrap_or_default().to_string())
            }
            FieldKind::MultiChoice { .. } | FieldKind::MultiChoiceWithOther { .. } => {
                let codes = ChoiceCodec::decode(text);
                let labels: Vec<&str> = codes
                    .iter()
                    .map(|code| slot.kind.label_for(code).unwrap_or(code.as_str()))
                    .collect();
                Ok(labels.join(self.separator.as_str()))
            }
            FieldKind::FreeText => Ok(text.clone()),
            FieldKind::Integer => Err(KindMismatch {
                kind: slot.kind.tag(),
                found: "text",
            }),
        }
    }
}
