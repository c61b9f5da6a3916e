//! Serializable view of the survey schema, consumed by the form renderer.

use serde::Serialize;

use crate::schema::{AnswerSlot, Choice, FieldKind, SurveySchema, OTHER_CODE, OTHER_LABEL};

/// One slot as described to the renderer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotView {
    pub name: String,
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<Choice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_text: Option<String>,
    pub max_width: usize,
    pub required: bool,
}

impl SlotView {
    pub fn from_slot(slot: &AnswerSlot, required: bool) -> Self {
        let mut choices = slot.kind.choices().to_vec();
        let other_text = match &slot.kind {
            FieldKind::MultiChoiceWithOther { other_text, .. } => {
                choices.push(Choice::new(OTHER_CODE, OTHER_LABEL));
                Some(other_text.clone())
            }
            _ => None,
        };

        Self {
            name: slot.name.clone(),
            prompt: slot.prompt.clone(),
            help: slot.help.clone(),
            group: slot.group.clone(),
            kind: slot.kind.tag(),
            choices,
            other_text,
            max_width: slot.max_width,
            required,
        }
    }
}

/// The whole form, in declaration order.
#[derive(Debug, Clone, Serialize)]
pub struct SchemaView {
    pub slots: Vec<SlotView>,
}

impl SchemaView {
    pub fn new(schema: &SurveySchema, all_optional: bool) -> Self {
        Self {
            slots: schema
                .slots()
                .iter()
                .map(|slot| SlotView::from_slot(slot, !all_optional))
                .collect(),
        }
    }
}
