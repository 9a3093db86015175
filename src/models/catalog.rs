// src/models/catalog.rs
//
// Reference data shared by every project: work types and executors.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::common::validation::not_blank;

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct WorkType {
    pub id: i32,
    #[schema(example = "Plastering")]
    pub name: String,
    /// Position in the technological sequence (1 = first).
    #[schema(example = 1)]
    pub order: i32,
    #[schema(example = "#e53e3e")]
    pub color: String,
    #[schema(example = "Rough works")]
    pub category: String,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Executor {
    pub id: i32,
    #[schema(example = "Crew #1")]
    pub name: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct WorkTypePayload {
    #[serde(default)]
    #[validate(
        custom(function = "not_blank"),
        length(max = 255, message = "Name must be at most 255 characters.")
    )]
    #[schema(example = "Plastering")]
    pub name: String,

    #[serde(default)]
    #[validate(
        required(message = "This field is required."),
        range(min = 1, message = "Number must be at least 1.")
    )]
    #[schema(value_type = i32, example = 1)]
    pub order: Option<i32>,

    #[serde(default)]
    #[validate(
        custom(function = "not_blank"),
        length(max = 64, message = "Color must be at most 64 characters.")
    )]
    #[schema(example = "#e53e3e")]
    pub color: String,

    #[serde(default)]
    #[validate(
        custom(function = "not_blank"),
        length(max = 255, message = "Category must be at most 255 characters.")
    )]
    #[schema(example = "Rough works")]
    pub category: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ExecutorPayload {
    #[serde(default)]
    #[validate(
        custom(function = "not_blank"),
        length(max = 255, message = "Name must be at most 255 characters.")
    )]
    #[schema(example = "Crew #1")]
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn work_type_order_must_be_positive() {
        let payload: WorkTypePayload = serde_json::from_value(json!({
            "name": "Plastering", "order": 0, "color": "#fff", "category": "Rough works"
        }))
        .unwrap();
        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("order"));
    }

    #[test]
    fn work_type_requires_every_field() {
        let payload: WorkTypePayload = serde_json::from_value(json!({})).unwrap();
        let errors = payload.validate().unwrap_err();
        let fields = errors.field_errors();
        for field in ["name", "order", "color", "category"] {
            assert!(fields.contains_key(field), "{field} should be reported");
        }
    }

    #[test]
    fn blank_names_are_rejected() {
        let payload: WorkTypePayload = serde_json::from_value(json!({
            "name": "  ", "order": 1, "color": " ", "category": "\n"
        }))
        .unwrap();
        let errors = payload.validate().unwrap_err();
        let fields = errors.field_errors();
        for field in ["name", "color", "category"] {
            assert!(fields.contains_key(field), "{field} should be reported");
        }

        let executor = ExecutorPayload { name: "   ".into() };
        assert!(executor.validate().is_err());
    }

    #[test]
    fn executor_name_length_is_bounded() {
        let payload = ExecutorPayload { name: "x".repeat(256) };
        assert!(payload.validate().is_err());
        let payload = ExecutorPayload { name: "Crew #1".into() };
        assert!(payload.validate().is_ok());
    }
}
