// src/models/project.rs

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::common::{error::AppError, serde_utils, validation::not_blank};

// --- Rows ---

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Project {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "maikop")]
    pub code: String,
    #[schema(example = "🏗️")]
    pub icon: Option<String>,
    #[schema(example = "Residential complex, building 3.2")]
    pub name: String,
    pub description: Option<String>,
    pub client: Option<String>,
    pub contractor: Option<String>,
    pub address: Option<String>,
    #[schema(value_type = Option<String>, format = Date, example = "2024-05-31")]
    pub start_date: Option<NaiveDate>,
    #[schema(value_type = Option<String>, format = Date, example = "2024-08-10")]
    pub end_date: Option<NaiveDate>,
    #[schema(example = 1200000000.0)]
    pub budget: Option<f64>,
}

#[derive(Debug, Clone, FromRow)]
pub struct Block {
    pub id: i32,
    pub name: String,
    pub project_id: i32,
}

#[derive(Debug, Clone, FromRow)]
pub struct Floor {
    pub id: i32,
    pub number: String,
    pub block_id: i32,
}

/// A named functional zone of a project ("Lobby", "Apartments").
#[derive(Debug, Clone, FromRow)]
pub struct SiteObject {
    pub id: i32,
    pub name: String,
    pub project_id: i32,
}

// --- Response views ---

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FloorView {
    pub id: i32,
    #[schema(example = "1")]
    pub number: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct BlockView {
    pub id: i32,
    #[schema(example = "M-1")]
    pub name: String,
    pub floors: Vec<FloorView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ObjectView {
    pub id: i32,
    #[schema(example = "Lobby")]
    pub name: String,
}

/// A project with its blocks (sorted by name, floors sorted by label) and
/// objects (sorted by name).
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProjectView {
    #[serde(flatten)]
    pub project: Project,
    pub blocks: Vec<BlockView>,
    pub objects: Vec<ObjectView>,
}

impl ProjectView {
    /// Builds views for `projects` from the children loaded in bulk.
    /// Children that belong to none of `projects` are ignored.
    pub fn assemble(
        projects: Vec<Project>,
        blocks: Vec<Block>,
        floors: Vec<Floor>,
        objects: Vec<SiteObject>,
    ) -> Vec<ProjectView> {
        let mut floors_by_block: HashMap<i32, Vec<FloorView>> = HashMap::new();
        for floor in floors {
            floors_by_block.entry(floor.block_id).or_default().push(FloorView {
                id: floor.id,
                number: floor.number,
            });
        }

        let mut blocks_by_project: HashMap<i32, Vec<BlockView>> = HashMap::new();
        for block in blocks {
            let mut floors = floors_by_block.remove(&block.id).unwrap_or_default();
            floors.sort_by(|a, b| a.number.cmp(&b.number));
            blocks_by_project.entry(block.project_id).or_default().push(BlockView {
                id: block.id,
                name: block.name,
                floors,
            });
        }

        let mut objects_by_project: HashMap<i32, Vec<ObjectView>> = HashMap::new();
        for object in objects {
            objects_by_project.entry(object.project_id).or_default().push(ObjectView {
                id: object.id,
                name: object.name,
            });
        }

        projects
            .into_iter()
            .map(|project| {
                let mut blocks = blocks_by_project.remove(&project.id).unwrap_or_default();
                blocks.sort_by(|a, b| a.name.cmp(&b.name));
                let mut objects = objects_by_project.remove(&project.id).unwrap_or_default();
                objects.sort_by(|a, b| a.name.cmp(&b.name));
                ProjectView { project, blocks, objects }
            })
            .collect()
    }
}

// --- Payloads ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct BlockPayload {
    #[serde(default)]
    #[validate(
        custom(function = "not_blank"),
        length(max = 64, message = "Block name must be at most 64 characters.")
    )]
    #[schema(example = "B1")]
    pub name: String,

    #[serde(default, deserialize_with = "serde_utils::labels")]
    #[validate(custom(function = "validate_floor_labels"))]
    #[schema(example = json!(["1", "2"]))]
    pub floors: Vec<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ProjectPayload {
    #[serde(default)]
    #[validate(
        custom(function = "not_blank"),
        length(max = 64, message = "Code must be at most 64 characters.")
    )]
    #[schema(example = "x1")]
    pub code: String,

    pub icon: Option<String>,

    #[serde(default)]
    #[validate(
        custom(function = "not_blank"),
        length(max = 255, message = "Name must be at most 255 characters.")
    )]
    #[schema(example = "Test")]
    pub name: String,

    pub description: Option<String>,
    #[validate(length(max = 255, message = "Client must be at most 255 characters."))]
    pub client: Option<String>,
    #[validate(length(max = 255, message = "Contractor must be at most 255 characters."))]
    pub contractor: Option<String>,
    #[validate(length(max = 255, message = "Address must be at most 255 characters."))]
    pub address: Option<String>,

    #[serde(default, deserialize_with = "serde_utils::optional_date")]
    #[schema(value_type = Option<String>, format = Date, example = "2024-05-31")]
    pub start_date: Option<NaiveDate>,

    #[serde(default, deserialize_with = "serde_utils::optional_date")]
    #[schema(value_type = Option<String>, format = Date, example = "2024-08-10")]
    pub end_date: Option<NaiveDate>,

    pub budget: Option<f64>,

    #[serde(default)]
    #[validate(nested)]
    pub blocks: Vec<BlockPayload>,

    #[serde(default)]
    #[validate(custom(function = "validate_object_names"))]
    #[schema(example = json!(["Lobby"]))]
    pub objects: Vec<String>,
}

fn validate_floor_labels(labels: &[String]) -> Result<(), ValidationError> {
    if labels.iter().any(|l| l.trim().is_empty() || l.chars().count() > 64) {
        let mut err = ValidationError::new("floor_label");
        err.message = Some("Floor labels must be non-empty (max 64 characters).".into());
        return Err(err);
    }
    Ok(())
}

fn validate_object_names(names: &[String]) -> Result<(), ValidationError> {
    if names.iter().any(|n| n.trim().is_empty() || n.chars().count() > 255) {
        let mut err = ValidationError::new("object_name");
        err.message = Some("Object names must be non-empty (max 255 characters).".into());
        return Err(err);
    }
    Ok(())
}

/// Scalar project columns, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectFields {
    pub code: String,
    pub icon: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub client: Option<String>,
    pub contractor: Option<String>,
    pub address: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub budget: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockSpec {
    pub name: String,
    pub floors: Vec<String>,
}

/// A validated project payload with duplicate block names, floor labels and
/// object names collapsed (first occurrence wins).
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectInput {
    pub fields: ProjectFields,
    pub blocks: Vec<BlockSpec>,
    pub objects: Vec<String>,
}

impl TryFrom<ProjectPayload> for ProjectInput {
    type Error = AppError;

    fn try_from(payload: ProjectPayload) -> Result<Self, Self::Error> {
        payload.validate()?;

        let mut seen_blocks = HashSet::new();
        let blocks = payload
            .blocks
            .into_iter()
            .filter(|b| seen_blocks.insert(b.name.clone()))
            .map(|b| BlockSpec {
                name: b.name,
                floors: dedup(b.floors),
            })
            .collect();

        Ok(ProjectInput {
            fields: ProjectFields {
                code: payload.code,
                icon: payload.icon,
                name: payload.name,
                description: payload.description,
                client: payload.client,
                contractor: payload.contractor,
                address: payload.address,
                start_date: payload.start_date,
                end_date: payload.end_date,
                budget: payload.budget,
            },
            blocks,
            objects: dedup(payload.objects),
        })
    }
}

fn dedup(values: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    values.into_iter().filter(|v| seen.insert(v.clone())).collect()
}
