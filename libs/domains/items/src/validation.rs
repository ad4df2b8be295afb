//! Request payload validation
//!
//! Payloads arrive as untyped JSON so that every problem can be reported at
//! once: shape and type checks run over the raw object, length constraints
//! run through the `validator` derive on [`ItemPayload`]. Messages name the
//! offending field, e.g. `"name" is required`.

use axum_helpers::ValidatePayload;
use serde_json::{Map, Value};
use validator::Validate;

use crate::models::{CreateItem, ItemStatus, UpdateItem};

pub const NAME_MAX_CHARS: u64 = 100;
pub const DESCRIPTION_MAX_CHARS: u64 = 500;

/// Which rule set applies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    /// `name` is required, `status` defaults to `active`
    Create,
    /// Every field is optional
    Update,
}

/// Typed fields of a payload that passed shape and type checks
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct ItemPayload {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    pub status: Option<ItemStatus>,
}

/// Violations sort by field, unknown keys last
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Slot {
    Name,
    Description,
    Status,
    Unknown,
}

#[derive(Default)]
struct Violations(Vec<(Slot, String)>);

impl Violations {
    fn push(&mut self, slot: Slot, message: String) {
        self.0.push((slot, message));
    }

    fn into_messages(mut self) -> Vec<String> {
        // Stable, so unknown keys keep their key order
        self.0.sort_by_key(|(slot, _)| *slot);
        self.0.into_iter().map(|(_, message)| message).collect()
    }
}

fn must_be_string(field: &str) -> String {
    format!("\"{}\" must be a string", field)
}

/// Message for a status value that is a string but not a known status
pub fn invalid_status_message() -> String {
    let names: Vec<&str> = ItemStatus::ALL.iter().map(ItemStatus::as_str).collect();
    format!("\"status\" must be one of [{}]", names.join(", "))
}

fn too_long(field: &str, max: u64) -> String {
    format!(
        "\"{}\" length must be less than or equal to {} characters long",
        field, max
    )
}

fn string_field(
    value: &Value,
    field: &str,
    slot: Slot,
    violations: &mut Violations,
) -> Option<String> {
    match value.as_str() {
        Some(s) => Some(s.to_owned()),
        None => {
            violations.push(slot, must_be_string(field));
            None
        }
    }
}

fn collect_fields(object: &Map<String, Value>, violations: &mut Violations) -> ItemPayload {
    let mut payload = ItemPayload::default();

    for (key, value) in object {
        match key.as_str() {
            "name" => payload.name = string_field(value, "name", Slot::Name, violations),
            "description" => {
                payload.description =
                    string_field(value, "description", Slot::Description, violations)
            }
            "status" => {
                payload.status = string_field(value, "status", Slot::Status, violations)
                    .and_then(|raw| match raw.parse::<ItemStatus>() {
                        Ok(status) => Some(status),
                        Err(_) => {
                            violations.push(Slot::Status, invalid_status_message());
                            None
                        }
                    })
            }
            other => violations.push(Slot::Unknown, format!("\"{}\" is not allowed", other)),
        }
    }

    payload
}

fn check_lengths(payload: &ItemPayload, violations: &mut Violations) {
    let Err(errors) = payload.validate() else {
        return;
    };
    let fields = errors.field_errors();

    if fields.contains_key("name") {
        let message = match payload.name.as_deref() {
            Some("") => "\"name\" is not allowed to be empty".to_string(),
            _ => too_long("name", NAME_MAX_CHARS),
        };
        violations.push(Slot::Name, message);
    }
    if fields.contains_key("description") {
        violations.push(
            Slot::Description,
            too_long("description", DESCRIPTION_MAX_CHARS),
        );
    }
}

/// Validate a raw item payload.
///
/// Returns the typed fields on success, or every violation found.
pub fn validate(payload: &Value, mode: ValidationMode) -> Result<ItemPayload, Vec<String>> {
    let Some(object) = payload.as_object() else {
        return Err(vec!["\"value\" must be of type object".to_string()]);
    };

    let mut violations = Violations::default();
    let parsed = collect_fields(object, &mut violations);

    if mode == ValidationMode::Create && !object.contains_key("name") {
        violations.push(Slot::Name, "\"name\" is required".to_string());
    }
    check_lengths(&parsed, &mut violations);

    if violations.0.is_empty() {
        Ok(parsed)
    } else {
        Err(violations.into_messages())
    }
}

impl ValidatePayload for CreateItem {
    fn from_json(value: Value) -> Result<Self, Vec<String>> {
        let payload = validate(&value, ValidationMode::Create)?;
        let Some(name) = payload.name else {
            return Err(vec!["\"name\" is required".to_string()]);
        };

        Ok(CreateItem {
            name,
            description: payload.description,
            status: payload.status.unwrap_or_default(),
        })
    }
}

impl ValidatePayload for UpdateItem {
    fn from_json(value: Value) -> Result<Self, Vec<String>> {
        let payload = validate(&value, ValidationMode::Update)?;

        Ok(UpdateItem {
            name: payload.name,
            description: payload.description,
            status: payload.status,
        })
    }
}
