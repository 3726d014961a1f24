//! The NPC reply response schema.
//!
//! The schema is declared once, as [`NPC_RESPONSE_SCHEMA`]. The same value is
//! rendered into the upstream structured-output configuration
//! ([`ResponseSchema::to_json`]) and used to check the upstream reply locally
//! ([`ResponseSchema::validate`]), so the two can never drift apart.

use serde_json::{json, Map, Value};

use crate::error::DomainError;
use crate::value_objects::Intimacy;

/// Sentinel used by `newTask`, `newDestination` and `selectedTool` when
/// there is nothing to report.
pub const NONE_SENTINEL: &str = "none";

/// JSON type of a single schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Integer,
    Boolean,
}

impl FieldType {
    /// Type name in the upstream schema dialect.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "STRING",
            Self::Integer => "INTEGER",
            Self::Boolean => "BOOLEAN",
        }
    }

    fn matches(&self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Boolean => value.is_boolean(),
        }
    }

    fn expected(&self) -> &'static str {
        match self {
            Self::String => "expected string",
            Self::Integer => "expected integer",
            Self::Boolean => "expected boolean",
        }
    }
}

/// One property of the response object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub field_type: FieldType,
    pub description: &'static str,
    /// Inclusive bounds for integer fields. Checked locally only; the
    /// upstream schema carries the bounds in the description text.
    pub range: Option<(i64, i64)>,
}

/// A soft contract breach: the reply is structurally valid, but a value
/// falls outside its documented range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaWarning {
    pub field: &'static str,
    pub value: i64,
    pub min: i64,
    pub max: i64,
}

impl std::fmt::Display for SchemaWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} = {} outside [{}, {}]",
            self.field, self.value, self.min, self.max
        )
    }
}

/// An object schema where every property is required.
#[derive(Debug, Clone, Copy)]
pub struct ResponseSchema {
    fields: &'static [FieldSpec],
}

impl ResponseSchema {
    pub const fn new(fields: &'static [FieldSpec]) -> Self {
        Self { fields }
    }

    /// Names of the required properties, in declaration order.
    pub fn required(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.name).collect()
    }

    /// Render the schema in the upstream structured-output dialect.
    pub fn to_json(&self) -> Value {
        let properties: Map<String, Value> = self
            .fields
            .iter()
            .map(|f| {
                (
                    f.name.to_string(),
                    json!({
                        "type": f.field_type.as_str(),
                        "description": f.description,
                    }),
                )
            })
            .collect();

        json!({
            "type": "OBJECT",
            "properties": properties,
            "required": self.required(),
        })
    }

    /// Check a parsed reply against the schema.
    ///
    /// Missing properties and type mismatches are hard errors. Integer values
    /// outside a field's range come back as warnings. Extra properties are
    /// ignored.
    pub fn validate(&self, value: &Value) -> Result<Vec<SchemaWarning>, DomainError> {
        let object = value
            .as_object()
            .ok_or_else(|| DomainError::schema_violation("$", "expected object"))?;

        let mut warnings = Vec::new();
        for spec in self.fields {
            let field = object
                .get(spec.name)
                .ok_or_else(|| DomainError::schema_violation(spec.name, "missing"))?;

            if !spec.field_type.matches(field) {
                return Err(DomainError::schema_violation(
                    spec.name,
                    spec.field_type.expected(),
                ));
            }

            if let (Some((min, max)), Some(n)) = (spec.range, field.as_i64()) {
                if n < min || n > max {
                    warnings.push(SchemaWarning {
                        field: spec.name,
                        value: n,
                        min,
                        max,
                    });
                }
            }
        }

        Ok(warnings)
    }
}

const NPC_RESPONSE_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "text",
        field_type: FieldType::String,
        description: "The NPC's spoken reply. Dialogue only, no narration or stage directions.",
        range: None,
    },
    FieldSpec {
        name: "newIntimacy",
        field_type: FieldType::Integer,
        description: "The new intimacy value after this exchange, from -100 to 100.",
        range: Some((Intimacy::MIN as i64, Intimacy::MAX as i64)),
    },
    FieldSpec {
        name: "newEmotion",
        field_type: FieldType::String,
        description: "The NPC's emotional state after this exchange, e.g. 'normal', 'joy', 'anger', 'sadness', 'surprise'.",
        range: None,
    },
    FieldSpec {
        name: "newTask",
        field_type: FieldType::String,
        description: "The NPC's current behavioral task. Use 'none' when there is no task.",
        range: None,
    },
    FieldSpec {
        name: "endChat",
        field_type: FieldType::Boolean,
        description: "true when the player clearly signals the end of the conversation (e.g. 'goodbye', 'I have to go') or the NPC strongly wants to end it; otherwise false.",
        range: None,
    },
    FieldSpec {
        name: "newDestination",
        field_type: FieldType::String,
        description: "Where the NPC should head next as a result of the conversation. Pick from the destination list given in the prompt, or 'none' if the NPC stays put.",
        range: None,
    },
    FieldSpec {
        name: "selectedTool",
        field_type: FieldType::String,
        description: "The tool the NPC should use to satisfy the player's request. Pick from the available tool list given in the prompt, or 'none' if no tool is needed.",
        range: None,
    },
];

/// Schema the upstream model is constrained to produce for every NPC reply.
pub const NPC_RESPONSE_SCHEMA: ResponseSchema = ResponseSchema::new(NPC_RESPONSE_FIELDS);

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_reply() -> Value {
        json!({
            "text": "hi",
            "newIntimacy": 5,
            "newEmotion": "joy",
            "newTask": "none",
            "endChat": false,
            "newDestination": "none",
            "selectedTool": "none"
        })
    }

    #[test]
    fn all_seven_fields_are_required() {
        assert_eq!(
            NPC_RESPONSE_SCHEMA.required(),
            vec![
                "text",
                "newIntimacy",
                "newEmotion",
                "newTask",
                "endChat",
                "newDestination",
                "selectedTool"
            ]
        );
    }

    #[test]
    fn renders_upstream_dialect() {
        let rendered = NPC_RESPONSE_SCHEMA.to_json();
        assert_eq!(rendered["type"], "OBJECT");
        assert_eq!(rendered["properties"]["newIntimacy"]["type"], "INTEGER");
        assert_eq!(rendered["properties"]["endChat"]["type"], "BOOLEAN");
        assert_eq!(rendered["properties"]["selectedTool"]["type"], "STRING");
        assert_eq!(rendered["required"].as_array().map(Vec::len), Some(7));
    }

    #[test]
    fn accepts_conforming_reply() {
        let warnings = NPC_RESPONSE_SCHEMA.validate(&valid_reply());
        assert_eq!(warnings, Ok(Vec::new()));
    }

    #[test]
    fn missing_field_is_violation() {
        let mut reply = valid_reply();
        if let Some(object) = reply.as_object_mut() {
            object.remove("selectedTool");
        }

        let err = NPC_RESPONSE_SCHEMA.validate(&reply).unwrap_err();
        assert_eq!(err, DomainError::schema_violation("selectedTool", "missing"));
    }

    #[test]
    fn wrong_type_is_violation() {
        let mut reply = valid_reply();
        reply["endChat"] = json!("false");

        let err = NPC_RESPONSE_SCHEMA.validate(&reply).unwrap_err();
        assert!(err.is_schema_violation());
    }

    #[test]
    fn non_object_is_violation() {
        assert!(NPC_RESPONSE_SCHEMA.validate(&json!(["hi"])).is_err());
    }

    #[test]
    fn out_of_range_intimacy_is_warning() {
        let mut reply = valid_reply();
        reply["newIntimacy"] = json!(150);

        let warnings = NPC_RESPONSE_SCHEMA.validate(&reply).unwrap();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].field, "newIntimacy");
        assert_eq!(warnings[0].to_string(), "newIntimacy = 150 outside [-100, 100]");
    }
}
