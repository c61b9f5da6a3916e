//! Survey record model: one respondent's stored answers.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::schema::{AnswerSlot, SurveySchema};

/// Value of one answer slot as it sits in storage.
///
/// Choice and free text slots are text, with `""` meaning unanswered. Multi-choice
/// slots hold the codec's encoded form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum StoredValue {
    Text(String),
    Integer(Option<i64>),
}

impl StoredValue {
    /// The unanswered value for a slot.
    pub fn empty_for(slot: &AnswerSlot) -> Self {
        if slot.is_integer() {
            StoredValue::Integer(None)
        } else {
            StoredValue::Text(String::new())
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            StoredValue::Text(s) => s.is_empty(),
            StoredValue::Integer(v) => v.is_none(),
        }
    }
}

/// A bound submission that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSurveyRecord {
    pub answers: BTreeMap<String, StoredValue>,
}

impl NewSurveyRecord {
    /// A record with every slot unanswered.
    pub fn empty(schema: &SurveySchema) -> Self {
        let answers = schema
            .slots()
            .iter()
            .map(|slot| (slot.name.clone(), StoredValue::empty_for(slot)))
            .collect();
        Self { answers }
    }

    pub fn get(&self, slot: &str) -> Option<&StoredValue> {
        self.answers.get(slot)
    }
}

/// A stored survey response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyRecord {
    /// Assigned by the store on creation, never reused
    pub id: i64,
    pub created_at: String,
    pub answers: BTreeMap<String, StoredValue>,
}

impl SurveyRecord {
    pub fn get(&self, slot: &str) -> Option<&StoredValue> {
        self.answers.get(slot)
    }
}

/// Returned to the submitter once a response is stored.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub id: i64,
    pub created_at: String,
}
