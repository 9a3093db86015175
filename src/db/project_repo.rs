// src/db/project_repo.rs

use sqlx::{Executor, Postgres};

use crate::{
    common::{db_utils::map_constraint_error, error::AppError},
    models::project::{Block, Floor, Project, ProjectFields, SiteObject},
};

pub const DUPLICATE_PROJECT_CODE: &str = "Project with this code already exists";

/// Projects and everything they own: blocks, floors and objects.
#[derive(Clone, Default)]
pub struct ProjectRepository;

impl ProjectRepository {
    pub fn new() -> Self {
        Self
    }

    // =========================================================================
    //  PROJECTS
    // =========================================================================

    pub async fn list_projects<'e, E>(&self, executor: E) -> Result<Vec<Project>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let projects = sqlx::query_as::<_, Project>("SELECT * FROM projects ORDER BY id")
            .fetch_all(executor)
            .await?;
        Ok(projects)
    }

    pub async fn find_by_code<'e, E>(
        &self,
        executor: E,
        code: &str,
    ) -> Result<Option<Project>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let project = sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE code = $1")
            .bind(code)
            .fetch_optional(executor)
            .await?;
        Ok(project)
    }

    pub async fn insert_project<'e, E>(
        &self,
        executor: E,
        fields: &ProjectFields,
    ) -> Result<Project, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (
                code, icon, name, description, client, contractor,
                address, start_date, end_date, budget
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(&fields.code)
        .bind(&fields.icon)
        .bind(&fields.name)
        .bind(&fields.description)
        .bind(&fields.client)
        .bind(&fields.contractor)
        .bind(&fields.address)
        .bind(fields.start_date)
        .bind(fields.end_date)
        .bind(fields.budget)
        .fetch_one(executor)
        .await
        // Two concurrent creates can both pass the pre-check; the constraint decides.
        .map_err(|e| map_constraint_error(e, DUPLICATE_PROJECT_CODE))
    }

    pub async fn update_project<'e, E>(
        &self,
        executor: E,
        id: i32,
        fields: &ProjectFields,
    ) -> Result<Project, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Project>(
            r#"
            UPDATE projects SET
                code = $2, icon = $3, name = $4, description = $5, client = $6,
                contractor = $7, address = $8, start_date = $9, end_date = $10,
                budget = $11
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&fields.code)
        .bind(&fields.icon)
        .bind(&fields.name)
        .bind(&fields.description)
        .bind(&fields.client)
        .bind(&fields.contractor)
        .bind(&fields.address)
        .bind(fields.start_date)
        .bind(fields.end_date)
        .bind(fields.budget)
        .fetch_one(executor)
        .await
        .map_err(|e| map_constraint_error(e, DUPLICATE_PROJECT_CODE))
    }

    /// Blocks, floors, objects and their works go with it (ON DELETE CASCADE).
    pub async fn delete_by_code<'e, E>(&self, executor: E, code: &str) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM projects WHERE code = $1")
            .bind(code)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    // =========================================================================
    //  BLOCKS & FLOORS
    // =========================================================================

    pub async fn list_blocks<'e, E>(
        &self,
        executor: E,
        project_ids: &[i32],
    ) -> Result<Vec<Block>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let blocks = sqlx::query_as::<_, Block>(
            "SELECT * FROM blocks WHERE project_id = ANY($1) ORDER BY id",
        )
        .bind(project_ids)
        .fetch_all(executor)
        .await?;
        Ok(blocks)
    }

    pub async fn list_floors<'e, E>(
        &self,
        executor: E,
        block_ids: &[i32],
    ) -> Result<Vec<Floor>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let floors = sqlx::query_as::<_, Floor>(
            "SELECT * FROM floors WHERE block_id = ANY($1) ORDER BY id",
        )
        .bind(block_ids)
        .fetch_all(executor)
        .await?;
        Ok(floors)
    }

    pub async fn insert_block<'e, E>(
        &self,
        executor: E,
        project_id: i32,
        name: &str,
    ) -> Result<Block, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let block = sqlx::query_as::<_, Block>(
            "INSERT INTO blocks (name, project_id) VALUES ($1, $2) RETURNING *",
        )
        .bind(name)
        .bind(project_id)
        .fetch_one(executor)
        .await?;
        Ok(block)
    }

    /// Inserts all labels for one block in a single statement.
    pub async fn insert_floors<'e, E>(
        &self,
        executor: E,
        block_id: i32,
        numbers: &[String],
    ) -> Result<Vec<Floor>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let floors = sqlx::query_as::<_, Floor>(
            r#"
            INSERT INTO floors (number, block_id)
            SELECT number, $2::int FROM UNNEST($1::varchar[]) WITH ORDINALITY AS t(number, pos)
            ORDER BY pos
            RETURNING *
            "#,
        )
        .bind(numbers)
        .bind(block_id)
        .fetch_all(executor)
        .await?;
        Ok(floors)
    }

    pub async fn delete_blocks<'e, E>(&self, executor: E, ids: &[i32]) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM blocks WHERE id = ANY($1)")
            .bind(ids)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete_floors<'e, E>(&self, executor: E, ids: &[i32]) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM floors WHERE id = ANY($1)")
            .bind(ids)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    // =========================================================================
    //  OBJECTS
    // =========================================================================

    pub async fn list_objects<'e, E>(
        &self,
        executor: E,
        project_ids: &[i32],
    ) -> Result<Vec<SiteObject>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let objects = sqlx::query_as::<_, SiteObject>(
            "SELECT * FROM objects WHERE project_id = ANY($1) ORDER BY id",
        )
        .bind(project_ids)
        .fetch_all(executor)
        .await?;
        Ok(objects)
    }

    pub async fn insert_objects<'e, E>(
        &self,
        executor: E,
        project_id: i32,
        names: &[String],
    ) -> Result<Vec<SiteObject>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let objects = sqlx::query_as::<_, SiteObject>(
            r#"
            INSERT INTO objects (name, project_id)
            SELECT name, $2::int FROM UNNEST($1::varchar[]) WITH ORDINALITY AS t(name, pos)
            ORDER BY pos
            RETURNING *
            "#,
        )
        .bind(names)
        .bind(project_id)
        .fetch_all(executor)
        .await?;
        Ok(objects)
    }

    pub async fn delete_objects<'e, E>(&self, executor: E, ids: &[i32]) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM objects WHERE id = ANY($1)")
            .bind(ids)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
