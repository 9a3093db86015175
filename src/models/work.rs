// src/models/work.rs

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::common::{error::AppError, serde_utils, validation::not_blank};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum WorkStatus {
    NotStarted,
    InProgress,
    Completed,
    Overdue,
}

impl WorkStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            WorkStatus::NotStarted => "not-started",
            WorkStatus::InProgress => "in-progress",
            WorkStatus::Completed => "completed",
            WorkStatus::Overdue => "overdue",
        }
    }

    /// Status implied by progress and schedule: 100 is completed, anything
    /// above 0 is in progress, and unfinished work past its end date is overdue.
    pub fn derive(progress: i32, end_date: NaiveDate, today: NaiveDate) -> Self {
        let status = match progress {
            100.. => WorkStatus::Completed,
            1..=99 => WorkStatus::InProgress,
            _ => WorkStatus::NotStarted,
        };
        if end_date < today && status != WorkStatus::Completed {
            WorkStatus::Overdue
        } else {
            status
        }
    }
}

impl fmt::Display for WorkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not-started" => Ok(WorkStatus::NotStarted),
            "in-progress" => Ok(WorkStatus::InProgress),
            "completed" => Ok(WorkStatus::Completed),
            "overdue" => Ok(WorkStatus::Overdue),
            other => Err(format!("unknown work status '{other}'")),
        }
    }
}

// --- Rows ---

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Work {
    pub id: i32,
    pub executor_id: i32,
    pub work_type_id: i32,
    pub floor_id: i32,
    pub object_id: i32,
    #[schema(value_type = String, format = Date, example = "2024-06-01")]
    pub start_date: NaiveDate,
    #[schema(value_type = String, format = Date, example = "2024-06-10")]
    pub end_date: NaiveDate,
    #[schema(example = "in-progress")]
    pub status: String,
    #[schema(example = "medium")]
    pub priority: String,
    #[schema(example = 40)]
    pub progress: i32,
    pub note: Option<String>,
}

/// A work row with its display fields resolved through
/// floor → block → project, object, work type and executor.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct WorkView {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub work: Work,
    /// Project code.
    #[schema(example = "maikop")]
    pub project: String,
    #[schema(example = "M-1")]
    pub block: String,
    #[schema(example = "3")]
    pub floor: String,
    #[schema(example = "Lobby")]
    pub object: String,
    #[serde(rename = "workType")]
    #[schema(example = "Plastering")]
    pub work_type: String,
    #[schema(example = "Crew #1")]
    pub executor: String,
    #[serde(rename = "techOrder")]
    #[schema(example = 1)]
    pub tech_order: i32,
    #[schema(example = "Rough works")]
    pub category: String,
}

// --- Payloads ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct WorkPayload {
    #[serde(default)]
    #[validate(required(message = "This field is required."))]
    pub executor_id: Option<i32>,

    #[serde(default)]
    #[validate(required(message = "This field is required."))]
    pub work_type_id: Option<i32>,

    #[serde(default, deserialize_with = "serde_utils::optional_date")]
    #[validate(required(message = "This field is required."))]
    #[schema(value_type = String, format = Date, example = "2024-06-01")]
    pub start_date: Option<NaiveDate>,

    #[serde(default, deserialize_with = "serde_utils::optional_date")]
    #[validate(required(message = "This field is required."))]
    #[schema(value_type = String, format = Date, example = "2024-06-10")]
    pub end_date: Option<NaiveDate>,

    #[serde(default)]
    #[validate(required(message = "This field is required."), custom(function = "validate_status"))]
    #[schema(example = "in-progress")]
    pub status: Option<String>,

    #[serde(default, deserialize_with = "serde_utils::optional_label")]
    #[validate(
        required(message = "This field is required."),
        custom(function = "not_blank"),
        length(max = 64, message = "Priority must be at most 64 characters.")
    )]
    #[schema(value_type = String, example = "medium")]
    pub priority: Option<String>,

    #[serde(default)]
    #[validate(
        required(message = "This field is required."),
        range(min = 0, max = 100, message = "Number must be between 0 and 100.")
    )]
    #[schema(example = 40)]
    pub progress: Option<i32>,

    pub note: Option<String>,

    #[serde(default)]
    #[validate(required(message = "This field is required."))]
    pub floor_id: Option<i32>,

    #[serde(default)]
    #[validate(required(message = "This field is required."))]
    pub object_id: Option<i32>,
}

fn validate_status(status: &str) -> Result<(), ValidationError> {
    status.parse::<WorkStatus>().map(|_| ()).map_err(|_| {
        let mut err = ValidationError::new("choice");
        err.message = Some("Not a valid choice.".into());
        err
    })
}

/// A validated work record, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct NewWork {
    pub executor_id: i32,
    pub work_type_id: i32,
    pub floor_id: i32,
    pub object_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: WorkStatus,
    pub priority: String,
    pub progress: i32,
    pub note: Option<String>,
}

impl TryFrom<WorkPayload> for NewWork {
    type Error = AppError;

    fn try_from(payload: WorkPayload) -> Result<Self, Self::Error> {
        payload.validate()?;

        // validate() guarantees every required field is present.
        let (
            Some(executor_id),
            Some(work_type_id),
            Some(floor_id),
            Some(object_id),
            Some(start_date),
            Some(end_date),
            Some(status),
            Some(priority),
            Some(progress),
        ) = (
            payload.executor_id,
            payload.work_type_id,
            payload.floor_id,
            payload.object_id,
            payload.start_date,
            payload.end_date,
            payload.status,
            payload.priority,
            payload.progress,
        )
        else {
            return Err(AppError::BadRequest("Missing required work fields".into()));
        };

        let status = status.parse::<WorkStatus>().map_err(AppError::BadRequest)?;

        Ok(NewWork {
            executor_id,
            work_type_id,
            floor_id,
            object_id,
            start_date,
            end_date,
            status,
            priority,
            progress,
            note: payload.note,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn valid_payload() -> serde_json::Value {
        json!({
            "executor_id": 1,
            "work_type_id": 2,
            "floor_id": 3,
            "object_id": 4,
            "start_date": "2024-06-01",
            "end_date": "2024-06-10",
            "status": "in-progress",
            "priority": "medium",
            "progress": 40,
            "note": "first coat"
        })
    }

    fn parse(value: serde_json::Value) -> Result<NewWork, AppError> {
        NewWork::try_from(serde_json::from_value::<WorkPayload>(value).unwrap())
    }

    fn field_errors(err: AppError) -> Vec<String> {
        let AppError::ValidationError(errors) = err else {
            panic!("expected validation error, got {err:?}");
        };
        let mut keys: Vec<String> = errors.field_errors().keys().map(|k| k.to_string()).collect();
        keys.sort();
        keys
    }

    #[test]
    fn valid_payload_converts() {
        let work = parse(valid_payload()).unwrap();
        assert_eq!(work.status, WorkStatus::InProgress);
        assert_eq!(work.progress, 40);
        assert_eq!(work.start_date, date(2024, 6, 1));
        assert_eq!(work.note.as_deref(), Some("first coat"));
    }

    #[test]
    fn blank_priority_is_rejected() {
        let mut payload = valid_payload();
        payload["priority"] = json!("   ");
        assert_eq!(field_errors(parse(payload).unwrap_err()), ["priority"]);
    }

    #[test]
    fn progress_outside_range_is_rejected() {
        for progress in [-1, 101, 1000] {
            let mut payload = valid_payload();
            payload["progress"] = json!(progress);
            assert_eq!(field_errors(parse(payload).unwrap_err()), ["progress"]);
        }
    }

    #[test]
    fn progress_bounds_are_inclusive() {
        for progress in [0, 100] {
            let mut payload = valid_payload();
            payload["progress"] = json!(progress);
            assert!(parse(payload).is_ok());
        }
    }

    #[test]
    fn missing_foreign_keys_are_field_errors() {
        let mut payload = valid_payload();
        let obj = payload.as_object_mut().unwrap();
        obj.remove("executor_id");
        obj.remove("floor_id");
        assert_eq!(field_errors(parse(payload).unwrap_err()), ["executor_id", "floor_id"]);
    }

    #[test]
    fn unknown_status_is_rejected() {
        let mut payload = valid_payload();
        payload["status"] = json!("paused");
        assert_eq!(field_errors(parse(payload).unwrap_err()), ["status"]);
    }

    #[test]
    fn end_before_start_is_accepted() {
        let mut payload = valid_payload();
        payload["end_date"] = json!("2024-05-01");
        assert!(parse(payload).is_ok());
    }

    #[test]
    fn numeric_priority_is_stored_as_text() {
        let mut payload = valid_payload();
        payload["priority"] = json!(3);
        assert_eq!(parse(payload).unwrap().priority, "3");
    }

    #[test]
    fn derived_status_follows_progress_and_schedule() {
        let today = date(2024, 7, 1);
        let future = date(2024, 7, 10);
        let past = date(2024, 6, 20);

        assert_eq!(WorkStatus::derive(100, future, today), WorkStatus::Completed);
        assert_eq!(WorkStatus::derive(50, future, today), WorkStatus::InProgress);
        assert_eq!(WorkStatus::derive(0, future, today), WorkStatus::NotStarted);
        assert_eq!(WorkStatus::derive(50, past, today), WorkStatus::Overdue);
        assert_eq!(WorkStatus::derive(0, past, today), WorkStatus::Overdue);
        assert_eq!(WorkStatus::derive(100, past, today), WorkStatus::Completed);
        // Ending today is not overdue yet.
        assert_eq!(WorkStatus::derive(10, today, today), WorkStatus::InProgress);
    }

    #[test]
    fn status_round_trips_through_wire_names() {
        for status in [
            WorkStatus::NotStarted,
            WorkStatus::InProgress,
            WorkStatus::Completed,
            WorkStatus::Overdue,
        ] {
            assert_eq!(status.as_str().parse::<WorkStatus>(), Ok(status));
            assert_eq!(serde_json::to_value(status).unwrap(), json!(status.as_str()));
        }
    }
}
