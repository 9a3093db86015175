// src/db/work_repo.rs

use sqlx::{Executor, Postgres};

use crate::{
    common::{db_utils::map_constraint_error, error::AppError},
    models::work::{NewWork, Work, WorkView},
};

// Every display field is resolved with inner joins; FKs are NOT NULL and
// cascade, so a work row always has all of them.
const WORK_VIEW_SELECT: &str = r#"
    SELECT
        w.id, w.executor_id, w.work_type_id, w.floor_id, w.object_id,
        w.start_date, w.end_date, w.status, w.priority, w.progress, w.note,
        p.code      AS project,
        b.name      AS block,
        f.number    AS floor,
        o.name      AS object,
        wt.name     AS work_type,
        e.name      AS executor,
        wt."order"  AS tech_order,
        wt.category AS category
    FROM works w
    INNER JOIN floors f      ON f.id = w.floor_id
    INNER JOIN blocks b      ON b.id = f.block_id
    INNER JOIN projects p    ON p.id = b.project_id
    INNER JOIN objects o     ON o.id = w.object_id
    INNER JOIN work_types wt ON wt.id = w.work_type_id
    INNER JOIN executors e   ON e.id = w.executor_id
"#;

#[derive(Clone, Default)]
pub struct WorkRepository;

impl WorkRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn list_views<'e, E>(&self, executor: E) -> Result<Vec<WorkView>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!("{WORK_VIEW_SELECT} ORDER BY w.id");
        let works = sqlx::query_as::<_, WorkView>(&sql)
            .fetch_all(executor)
            .await?;
        Ok(works)
    }

    pub async fn find_view<'e, E>(&self, executor: E, id: i32) -> Result<Option<WorkView>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!("{WORK_VIEW_SELECT} WHERE w.id = $1");
        let work = sqlx::query_as::<_, WorkView>(&sql)
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(work)
    }

    pub async fn exists<'e, E>(&self, executor: E, id: i32) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM works WHERE id = $1)")
            .bind(id)
            .fetch_one(executor)
            .await?;
        Ok(exists)
    }

    pub async fn insert<'e, E>(&self, executor: E, work: &NewWork) -> Result<Work, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Work>(
            r#"
            INSERT INTO works (
                executor_id, work_type_id, floor_id, object_id, start_date,
                end_date, status, priority, progress, note
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(work.executor_id)
        .bind(work.work_type_id)
        .bind(work.floor_id)
        .bind(work.object_id)
        .bind(work.start_date)
        .bind(work.end_date)
        .bind(work.status.as_str())
        .bind(&work.priority)
        .bind(work.progress)
        .bind(&work.note)
        .fetch_one(executor)
        .await
        .map_err(|e| map_constraint_error(e, "Work already exists"))
    }

    /// Returns `None` when no work has this id.
    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: i32,
        work: &NewWork,
    ) -> Result<Option<Work>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Work>(
            r#"
            UPDATE works SET
                executor_id = $2, work_type_id = $3, floor_id = $4, object_id = $5,
                start_date = $6, end_date = $7, status = $8, priority = $9,
                progress = $10, note = $11
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(work.executor_id)
        .bind(work.work_type_id)
        .bind(work.floor_id)
        .bind(work.object_id)
        .bind(work.start_date)
        .bind(work.end_date)
        .bind(work.status.as_str())
        .bind(&work.priority)
        .bind(work.progress)
        .bind(&work.note)
        .fetch_optional(executor)
        .await
        .map_err(|e| map_constraint_error(e, "Work already exists"))
    }

    pub async fn delete<'e, E>(&self, executor: E, id: i32) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM works WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    /// Bulk insert used by the seeder.
    pub async fn insert_many<'e, E>(&self, executor: E, works: &[NewWork]) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let mut executor_ids = Vec::with_capacity(works.len());
        let mut work_type_ids = Vec::with_capacity(works.len());
        let mut floor_ids = Vec::with_capacity(works.len());
        let mut object_ids = Vec::with_capacity(works.len());
        let mut start_dates = Vec::with_capacity(works.len());
        let mut end_dates = Vec::with_capacity(works.len());
        let mut statuses = Vec::with_capacity(works.len());
        let mut priorities = Vec::with_capacity(works.len());
        let mut progresses = Vec::with_capacity(works.len());
        let mut notes = Vec::with_capacity(works.len());

        for w in works {
            executor_ids.push(w.executor_id);
            work_type_ids.push(w.work_type_id);
            floor_ids.push(w.floor_id);
            object_ids.push(w.object_id);
            start_dates.push(w.start_date);
            end_dates.push(w.end_date);
            statuses.push(w.status.as_str());
            priorities.push(w.priority.as_str());
            progresses.push(w.progress);
            notes.push(w.note.clone());
        }

        let result = sqlx::query(
            r#"
            INSERT INTO works (
                executor_id, work_type_id, floor_id, object_id, start_date,
                end_date, status, priority, progress, note
            )
            SELECT * FROM UNNEST(
                $1::int[], $2::int[], $3::int[], $4::int[], $5::date[],
                $6::date[], $7::varchar[], $8::varchar[], $9::int[], $10::text[]
            )
            "#,
        )
        .bind(&executor_ids)
        .bind(&work_type_ids)
        .bind(&floor_ids)
        .bind(&object_ids)
        .bind(&start_dates)
        .bind(&end_dates)
        .bind(&statuses)
        .bind(&priorities)
        .bind(&progresses)
        .bind(&notes)
        .execute(executor)
        .await?;

        Ok(result.rows_affected())
    }
}
