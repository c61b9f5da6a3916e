//! Submission form: binds a raw payload into a new survey record.
//!
//! Every slot is checked before anything is returned, so a submitter sees all of
//! their mistakes in one round trip.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::codec::ChoiceCodec;
use crate::errors::FieldErrors;
use crate::models::{NewSurveyRecord, StoredValue};
use crate::schema::{AnswerSlot, FieldKind, SurveySchema};

pub const REQUIRED: &str = "This field is required.";
pub const INVALID_LIST: &str = "Enter a list of values.";
pub const INVALID_CHOICE: &str = "Enter a valid choice.";
pub const INVALID_TEXT: &str = "Enter a valid value.";
pub const INVALID_INTEGER: &str = "Enter a whole number.";

fn unknown_choice(code: &str) -> String {
    format!(
        "Select a valid choice. {} is not one of the available choices.",
        code
    )
}

fn too_long(max: usize, len: usize) -> String {
    format!(
        "Ensure this value has at most {} characters (it has {}).",
        max, len
    )
}

/// Validates submissions against a survey schema.
#[derive(Debug, Clone)]
pub struct SubmissionForm {
    schema: Arc<SurveySchema>,
    all_optional: bool,
}

impl SubmissionForm {
    /// A form where every slot is optional.
    pub fn new(schema: Arc<SurveySchema>) -> Self {
        Self {
            schema,
            all_optional: true,
        }
    }

    /// When `false`, an unanswered slot is reported as required.
    pub fn with_all_optional(mut self, all_optional: bool) -> Self {
        self.all_optional = all_optional;
        self
    }

    pub fn all_optional(&self) -> bool {
        self.all_optional
    }

    pub fn schema(&self) -> &SurveySchema {
        &self.schema
    }

    /// Bind `payload` into a record, or return the messages for every invalid slot.
    ///
    /// Absent keys are unanswered slots. Keys that name no slot are ignored.
    pub fn bind(&self, payload: &Map<String, Value>) -> Result<NewSurveyRecord, FieldErrors> {
        let mut record = NewSurveyRecord::empty(&self.schema);
        let mut errors = FieldErrors::new();

        for slot in self.schema.slots() {
            let raw = payload.get(&slot.name).unwrap_or(&Value::Null);
            match clean(slot, raw) {
                Ok(value) => {
                    if value.is_empty() && !self.all_optional {
                        errors.insert(slot.name.clone(), vec![REQUIRED.to_string()]);
                    } else {
                        record.answers.insert(slot.name.clone(), value);
                    }
                }
                Err(messages) => {
                    errors.insert(slot.name.clone(), messages);
                }
            }
        }

        for key in payload.keys() {
            if self.schema.slot(key).is_none() {
                tracing::debug!("Ignoring unknown field {} in submission", key);
            }
        }

        if errors.is_empty() {
            Ok(record)
        } else {
            Err(errors)
        }
    }
}

/// Clean one raw value according to its slot kind.
fn clean(slot: &AnswerSlot, raw: &Value) -> Result<StoredValue, Vec<String>> {
    match &slot.kind {
        FieldKind::SingleChoice { .. } => clean_single(slot, raw),
        FieldKind::MultiChoice { .. } | FieldKind::MultiChoiceWithOther { .. } => {
            clean_multi(slot, raw)
        }
        FieldKind::FreeText => clean_text(slot, raw),
        FieldKind::Integer => clean_integer(raw),
    }
}

fn clean_single(slot: &AnswerSlot, raw: &Value) -> Result<StoredValue, Vec<String>> {
    let code = match raw {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return Err(vec![INVALID_CHOICE.to_string()]),
    };
    if !code.is_empty() && !slot.kind.accepts_code(&code) {
        return Err(vec![unknown_choice(&code)]);
    }
    Ok(StoredValue::Text(code))
}

fn clean_multi(slot: &AnswerSlot, raw: &Value) -> Result<StoredValue, Vec<String>> {
    let items = match raw {
        Value::Null => return Ok(StoredValue::Text(String::new())),
        Value::Array(items) => items,
        _ => return Err(vec![INVALID_LIST.to_string()]),
    };

    // A selection is a set: repeats collapse onto the first occurrence
    let mut codes: Vec<&str> = Vec::with_capacity(items.len());
    let mut messages = Vec::new();
    for item in items {
        match item {
            Value::String(code) if slot.kind.accepts_code(code) => {
                if !codes.contains(&code.as_str()) {
                    codes.push(code.as_str());
                }
            }
            Value::String(code) => messages.push(unknown_choice(code)),
            other => messages.push(unknown_choice(&other.to_string())),
        }
    }
    if !messages.is_empty() {
        return Err(messages);
    }

    let encoded = ChoiceCodec::encode(&codes);
    let len = encoded.chars().count();
    if len > slot.max_width {
        return Err(vec![too_long(slot.max_width, len)]);
    }
    Ok(StoredValue::Text(encoded))
}

fn clean_text(slot: &AnswerSlot, raw: &Value) -> Result<StoredValue, Vec<String>> {
    let text = match raw {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        _ => return Err(vec![INVALID_TEXT.to_string()]),
    };
    let len = text.chars().count();
    if len > slot.max_width {
        return Err(vec![too_long(slot.max_width, len)]);
    }
    Ok(StoredValue::Text(text))
}

fn clean_integer(raw: &Value) -> Result<StoredValue, Vec<String>> {
    match raw {
        Value::Null => Ok(StoredValue::Integer(None)),
        Value::Number(n) => n
            .as_i64()
            .map(|v| StoredValue::Integer(Some(v)))
            .ok_or_else(|| vec![INVALID_INTEGER.to_string()]),
        Value::String(s) if s.trim().is_empty() => Ok(StoredValue::Integer(None)),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map(|v| StoredValue::Integer(Some(v)))
            .map_err(|_| vec![INVALID_INTEGER.to_string()]),
        _ => Err(vec![INVALID_INTEGER.to_string()]),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::schema::{national_park_survey, Choice};

    fn form() -> SubmissionForm {
        SubmissionForm::new(Arc::new(national_park_survey().unwrap()))
    }

    fn payload(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_empty_submission_is_accepted() {
        let form = form();
        let record = form.bind(&Map::new()).unwrap();

        assert_eq!(record.answers.len(), form.schema().slots().len());
        assert!(record.answers.values().all(StoredValue::is_empty));
        assert_eq!(record.get("q10_1"), Some(&StoredValue::Integer(None)));
        assert_eq!(record.get("q4"), Some(&StoredValue::Text(String::new())));
    }

    #[test]
    fn test_binds_every_kind() {
        let record = form()
            .bind(&payload(json!({
                "q1": "2",
                "q4": ["W", "AA"],
                "q7": "82190",
                "q10_1": 2,
                "q10_2": " 3 ",
                "q12": ["2", "OTHER"],
                "q12_23_text": "A ranger at the gate",
            })))
            .unwrap();

        assert_eq!(record.get("q1"), Some(&StoredValue::Text("2".to_string())));
        assert_eq!(record.get("q4"), Some(&StoredValue::Text("W,AA".to_string())));
        assert_eq!(record.get("q7"), Some(&StoredValue::Text("82190".to_string())));
        assert_eq!(record.get("q10_1"), Some(&StoredValue::Integer(Some(2))));
        assert_eq!(record.get("q10_2"), Some(&StoredValue::Integer(Some(3))));
        assert_eq!(
            record.get("q12"),
            Some(&StoredValue::Text("2,OTHER".to_string()))
        );
    }

    #[test]
    fn test_reports_every_invalid_slot() {
        let errors = form()
            .bind(&payload(json!({
                "q4": "W",
                "q1": "9",
                "q10_1": "many",
                "q2": "F",
            })))
            .unwrap_err();

        assert_eq!(errors.len(), 3);
        assert_eq!(errors["q4"], vec![INVALID_LIST.to_string()]);
        assert_eq!(
            errors["q1"],
            vec!["Select a valid choice. 9 is not one of the available choices.".to_string()]
        );
        assert_eq!(errors["q10_1"], vec![INVALID_INTEGER.to_string()]);
        assert!(!errors.contains_key("q2"));
    }

    #[test]
    fn test_unknown_multi_code_is_rejected() {
        let errors = form()
            .bind(&payload(json!({ "q4": ["W", "X"] })))
            .unwrap_err();
        assert_eq!(
            errors["q4"],
            vec!["Select a valid choice. X is not one of the available choices.".to_string()]
        );
    }

    #[test]
    fn test_repeated_codes_are_stored_once() {
        let record = form()
            .bind(&payload(json!({ "q4": ["W", "AA", "W", "W"], "q19": ["OTHER", "OTHER"] })))
            .unwrap();
        assert_eq!(record.get("q4"), Some(&StoredValue::Text("W,AA".to_string())));
        assert_eq!(record.get("q19"), Some(&StoredValue::Text("OTHER".to_string())));

        let repeated = vec!["AA"; 8];
        let record = form().bind(&payload(json!({ "q4": repeated }))).unwrap();
        assert_eq!(record.get("q4"), Some(&StoredValue::Text("AA".to_string())));
    }

    #[test]
    fn test_multi_value_wider_than_column_is_a_field_error() {
        const RACE: &[Choice] = &[Choice::new("W", "White"), Choice::new("AA", "Native")];
        let slot = AnswerSlot {
            name: "race".to_string(),
            prompt: "Race".to_string(),
            help: None,
            group: None,
            kind: FieldKind::MultiChoice { choices: RACE },
            max_width: 3,
        };

        assert_eq!(
            clean_multi(&slot, &json!(["W", "AA"])),
            Err(vec![
                "Ensure this value has at most 3 characters (it has 4).".to_string()
            ])
        );
        assert_eq!(
            clean_multi(&slot, &json!(["AA"])),
            Ok(StoredValue::Text("AA".to_string()))
        );
    }

    #[test]
    fn test_other_only_accepted_on_other_kind() {
        let errors = form()
            .bind(&payload(json!({ "q4": ["OTHER"], "q19": ["OTHER"] })))
            .unwrap_err();
        assert!(errors.contains_key("q4"));
        assert!(!errors.contains_key("q19"));
    }

    #[test]
    fn test_other_without_write_in_is_accepted() {
        let record = form().bind(&payload(json!({ "q20": ["OTHER"] }))).unwrap();
        assert_eq!(record.get("q20_10_text"), Some(&StoredValue::Text(String::new())));
    }

    #[test]
    fn test_free_text_length_is_bounded() {
        let errors = form()
            .bind(&payload(json!({ "q7": "12345-67890" })))
            .unwrap_err();
        assert_eq!(
            errors["q7"],
            vec!["Ensure this value has at most 10 characters (it has 11).".to_string()]
        );
    }

    #[test]
    fn test_required_when_not_all_optional() {
        let errors = form()
            .with_all_optional(false)
            .bind(&payload(json!({ "q1": "1", "q4": [] })))
            .unwrap_err();
        assert!(!errors.contains_key("q1"));
        assert_eq!(errors["q4"], vec![REQUIRED.to_string()]);
        assert_eq!(errors["q10_1"], vec![REQUIRED.to_string()]);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let record = form()
            .bind(&payload(json!({ "csrfmiddlewaretoken": "abc", "q3": "Y" })))
            .unwrap();
        assert_eq!(record.get("q3"), Some(&StoredValue::Text("Y".to_string())));
        assert!(record.get("csrfmiddlewaretoken").is_none());
    }
}
