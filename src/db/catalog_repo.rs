// src/db/catalog_repo.rs

use sqlx::{Executor, Postgres};

use crate::{
    common::{db_utils::map_constraint_error, error::AppError},
    models::catalog::{Executor as ExecutorRow, WorkType},
};

pub const DUPLICATE_WORK_TYPE: &str = "Work type with this name already exists";
pub const DUPLICATE_EXECUTOR: &str = "Executor with this name already exists";

/// Work types and executors. Name uniqueness is left to the table
/// constraints; violations come back as `AppError::Conflict`.
#[derive(Clone, Default)]
pub struct CatalogRepository;

impl CatalogRepository {
    pub fn new() -> Self {
        Self
    }

    // --- Work types ---

    pub async fn list_work_types<'e, E>(&self, executor: E) -> Result<Vec<WorkType>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let work_types =
            sqlx::query_as::<_, WorkType>(r#"SELECT * FROM work_types ORDER BY "order", id"#)
                .fetch_all(executor)
                .await?;
        Ok(work_types)
    }

    pub async fn create_work_type<'e, E>(
        &self,
        executor: E,
        name: &str,
        order: i32,
        color: &str,
        category: &str,
    ) -> Result<WorkType, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, WorkType>(
            r#"
            INSERT INTO work_types (name, "order", color, category)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(order)
        .bind(color)
        .bind(category)
        .fetch_one(executor)
        .await
        .map_err(|e| map_constraint_error(e, DUPLICATE_WORK_TYPE))
    }

    // --- Executors ---

    pub async fn list_executors<'e, E>(&self, executor: E) -> Result<Vec<ExecutorRow>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let executors =
            sqlx::query_as::<_, ExecutorRow>("SELECT * FROM executors ORDER BY name, id")
                .fetch_all(executor)
                .await?;
        Ok(executors)
    }

    pub async fn create_executor<'e, E>(
        &self,
        executor: E,
        name: &str,
    ) -> Result<ExecutorRow, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, ExecutorRow>("INSERT INTO executors (name) VALUES ($1) RETURNING *")
            .bind(name)
            .fetch_one(executor)
            .await
            .map_err(|e| map_constraint_error(e, DUPLICATE_EXECUTOR))
    }

    // --- Seeding ---

    /// Removes every row of every table, children first.
    pub async fn truncate_all<'e, E>(&self, executor: E) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            "TRUNCATE works, floors, blocks, objects, work_types, executors, projects \
             RESTART IDENTITY",
        )
        .execute(executor)
        .await?;
        Ok(())
    }
}
