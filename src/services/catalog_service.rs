// src/services/catalog_service.rs

use sqlx::{Executor, Postgres};

use crate::{
    common::error::AppError,
    db::CatalogRepository,
    models::catalog::{Executor as ExecutorRow, ExecutorPayload, WorkType, WorkTypePayload},
};

#[derive(Clone)]
pub struct CatalogService {
    repo: CatalogRepository,
}

impl CatalogService {
    pub fn new(repo: CatalogRepository) -> Self {
        Self { repo }
    }

    pub async fn list_work_types<'e, E>(&self, executor: E) -> Result<Vec<WorkType>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.list_work_types(executor).await
    }

    /// Expects a payload that already passed `validate()`.
    pub async fn create_work_type<'e, E>(
        &self,
        executor: E,
        payload: &WorkTypePayload,
    ) -> Result<WorkType, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let order = payload
            .order
            .ok_or_else(|| AppError::BadRequest("order is required".into()))?;

        let work_type = self
            .repo
            .create_work_type(executor, &payload.name, order, &payload.color, &payload.category)
            .await?;

        tracing::info!(id = work_type.id, name = %work_type.name, "Tipo de serviço criado");
        Ok(work_type)
    }

    pub async fn list_executors<'e, E>(&self, executor: E) -> Result<Vec<ExecutorRow>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.list_executors(executor).await
    }

    pub async fn create_executor<'e, E>(
        &self,
        executor: E,
        payload: &ExecutorPayload,
    ) -> Result<ExecutorRow, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let created = self.repo.create_executor(executor, &payload.name).await?;
        tracing::info!(id = created.id, name = %created.name, "Executor criado");
        Ok(created)
    }
}
