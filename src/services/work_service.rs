// src/services/work_service.rs

use sqlx::{Acquire, PgPool, Postgres};

use crate::{
    common::error::AppError,
    db::WorkRepository,
    models::work::{NewWork, WorkPayload, WorkView},
};

#[derive(Clone)]
pub struct WorkService {
    repo: WorkRepository,
}

impl WorkService {
    pub fn new(repo: WorkRepository) -> Self {
        Self { repo }
    }

    pub async fn list(&self, pool: &PgPool) -> Result<Vec<WorkView>, AppError> {
        self.repo.list_views(pool).await
    }

    pub async fn get(&self, pool: &PgPool, id: i32) -> Result<WorkView, AppError> {
        self.repo
            .find_view(pool, id)
            .await?
            .ok_or(AppError::NotFound("Work"))
    }

    pub async fn create<'e, E>(&self, executor: E, work: NewWork) -> Result<WorkView, AppError>
    where
        E: Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;
        let created = self.repo.insert(&mut *tx, &work).await?;
        let view = self
            .repo
            .find_view(&mut *tx, created.id)
            .await?
            .ok_or(AppError::NotFound("Work"))?;
        tx.commit().await?;

        tracing::info!(id = view.work.id, project = %view.project, "Serviço criado");
        Ok(view)
    }

    /// Checks the work exists before validating, so a missing id is a 404
    /// whatever the body holds.
    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: i32,
        payload: WorkPayload,
    ) -> Result<WorkView, AppError>
    where
        E: Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;
        if !self.repo.exists(&mut *tx, id).await? {
            return Err(AppError::NotFound("Work"));
        }
        let work = NewWork::try_from(payload)?;

        self.repo
            .update(&mut *tx, id, &work)
            .await?
            .ok_or(AppError::NotFound("Work"))?;
        let view = self
            .repo
            .find_view(&mut *tx, id)
            .await?
            .ok_or(AppError::NotFound("Work"))?;
        tx.commit().await?;

        tracing::info!(id, status = %work.status, progress = work.progress, "Serviço atualizado");
        Ok(view)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: i32) -> Result<(), AppError>
    where
        E: Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;
        if self.repo.delete(&mut *tx, id).await? == 0 {
            return Err(AppError::NotFound("Work"));
        }
        tx.commit().await?;

        tracing::info!(id, "Serviço removido");
        Ok(())
    }
}
