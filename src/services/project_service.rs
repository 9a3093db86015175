// src/services/project_service.rs

use std::collections::HashMap;

use sqlx::{Acquire, PgConnection, PgPool, Postgres};

use crate::{
    common::error::AppError,
    db::{project_repo::DUPLICATE_PROJECT_CODE, ProjectRepository},
    models::project::{BlockSpec, Project, ProjectInput, ProjectPayload, ProjectView},
    services::reconcile::plan_sync,
};

#[derive(Clone)]
pub struct ProjectService {
    repo: ProjectRepository,
}

impl ProjectService {
    pub fn new(repo: ProjectRepository) -> Self {
        Self { repo }
    }

    // =========================================================================
    //  READS
    // =========================================================================

    pub async fn list(&self, pool: &PgPool) -> Result<Vec<ProjectView>, AppError> {
        let projects = self.repo.list_projects(pool).await?;
        let ids: Vec<i32> = projects.iter().map(|p| p.id).collect();

        let blocks = self.repo.list_blocks(pool, &ids).await?;
        let block_ids: Vec<i32> = blocks.iter().map(|b| b.id).collect();
        let floors = self.repo.list_floors(pool, &block_ids).await?;
        let objects = self.repo.list_objects(pool, &ids).await?;

        Ok(ProjectView::assemble(projects, blocks, floors, objects))
    }

    pub async fn get(&self, pool: &PgPool, code: &str) -> Result<ProjectView, AppError> {
        let mut conn = pool.acquire().await?;
        let project = self
            .repo
            .find_by_code(&mut *conn, code)
            .await?
            .ok_or(AppError::NotFound("Project"))?;
        self.load_view(&mut conn, project).await
    }

    // =========================================================================
    //  WRITES (one transaction each)
    // =========================================================================

    pub async fn create<'e, E>(&self, executor: E, input: ProjectInput) -> Result<ProjectView, AppError>
    where
        E: Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        if self.repo.find_by_code(&mut *tx, &input.fields.code).await?.is_some() {
            return Err(AppError::Conflict(DUPLICATE_PROJECT_CODE.to_string()));
        }

        let project = self.repo.insert_project(&mut *tx, &input.fields).await?;

        for block in &input.blocks {
            self.insert_block_with_floors(&mut tx, project.id, block).await?;
        }
        if !input.objects.is_empty() {
            self.repo.insert_objects(&mut *tx, project.id, &input.objects).await?;
        }

        let view = self.load_view(&mut tx, project).await?;
        tx.commit().await?;

        tracing::info!(
            code = %view.project.code,
            blocks = view.blocks.len(),
            objects = view.objects.len(),
            "Projeto criado"
        );
        Ok(view)
    }

    /// Replaces the scalar fields and reconciles blocks, floors and objects
    /// against the payload by natural key. The payload is validated only once
    /// the project is known to exist, so a missing code is always a 404.
    pub async fn update<'e, E>(
        &self,
        executor: E,
        code: &str,
        payload: ProjectPayload,
    ) -> Result<ProjectView, AppError>
    where
        E: Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let current = self
            .repo
            .find_by_code(&mut *tx, code)
            .await?
            .ok_or(AppError::NotFound("Project"))?;

        let input = ProjectInput::try_from(payload)?;

        if input.fields.code != current.code
            && self.repo.find_by_code(&mut *tx, &input.fields.code).await?.is_some()
        {
            return Err(AppError::Conflict(DUPLICATE_PROJECT_CODE.to_string()));
        }

        let project = self.repo.update_project(&mut *tx, current.id, &input.fields).await?;

        self.sync_blocks(&mut tx, project.id, &input.blocks).await?;
        self.sync_objects(&mut tx, project.id, &input.objects).await?;

        let view = self.load_view(&mut tx, project).await?;
        tx.commit().await?;

        tracing::info!(code = %view.project.code, previous_code = %code, "Projeto atualizado");
        Ok(view)
    }

    pub async fn delete<'e, E>(&self, executor: E, code: &str) -> Result<(), AppError>
    where
        E: Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;
        let deleted = self.repo.delete_by_code(&mut *tx, code).await?;
        if deleted == 0 {
            return Err(AppError::NotFound("Project"));
        }
        tx.commit().await?;

        tracing::info!(code = %code, "Projeto removido");
        Ok(())
    }

    // =========================================================================
    //  HELPERS
    // =========================================================================

    async fn insert_block_with_floors(
        &self,
        conn: &mut PgConnection,
        project_id: i32,
        block: &BlockSpec,
    ) -> Result<(), AppError> {
        let created = self.repo.insert_block(&mut *conn, project_id, &block.name).await?;
        if !block.floors.is_empty() {
            self.repo.insert_floors(&mut *conn, created.id, &block.floors).await?;
        }
        Ok(())
    }

    async fn sync_blocks(
        &self,
        conn: &mut PgConnection,
        project_id: i32,
        desired: &[BlockSpec],
    ) -> Result<(), AppError> {
        let existing = self.repo.list_blocks(&mut *conn, &[project_id]).await?;
        let names: Vec<String> = desired.iter().map(|b| b.name.clone()).collect();
        let plan = plan_sync(existing.iter().map(|b| (b.id, b.name.as_str())), &names);

        if !plan.delete.is_empty() {
            // Floors and their works cascade.
            self.repo.delete_blocks(&mut *conn, &plan.delete).await?;
        }

        let specs: HashMap<&str, &BlockSpec> =
            desired.iter().map(|b| (b.name.as_str(), b)).collect();

        // Floors of retained blocks.
        let kept_ids: Vec<i32> = plan.keep.iter().map(|(id, _)| *id).collect();
        let mut floors_by_block: HashMap<i32, Vec<(i32, String)>> = HashMap::new();
        for floor in self.repo.list_floors(&mut *conn, &kept_ids).await? {
            floors_by_block
                .entry(floor.block_id)
                .or_default()
                .push((floor.id, floor.number));
        }

        let mut floors_removed = 0;
        let mut floors_added = 0;
        for (block_id, name) in &plan.keep {
            let Some(spec) = specs.get(name.as_str()) else {
                continue;
            };
            let current = floors_by_block.remove(block_id).unwrap_or_default();
            let floor_plan = plan_sync(
                current.iter().map(|(id, number)| (*id, number.as_str())),
                &spec.floors,
            );
            if !floor_plan.delete.is_empty() {
                floors_removed += self.repo.delete_floors(&mut *conn, &floor_plan.delete).await?;
            }
            if !floor_plan.insert.is_empty() {
                floors_added += self
                    .repo
                    .insert_floors(&mut *conn, *block_id, &floor_plan.insert)
                    .await?
                    .len();
            }
        }

        for name in &plan.insert {
            if let Some(spec) = specs.get(name.as_str()) {
                self.insert_block_with_floors(conn, project_id, spec).await?;
            }
        }

        tracing::debug!(
            project_id,
            blocks_removed = plan.delete.len(),
            blocks_added = plan.insert.len(),
            floors_removed,
            floors_added,
            "Blocos reconciliados"
        );
        Ok(())
    }

    async fn sync_objects(
        &self,
        conn: &mut PgConnection,
        project_id: i32,
        desired: &[String],
    ) -> Result<(), AppError> {
        let existing = self.repo.list_objects(&mut *conn, &[project_id]).await?;
        let plan = plan_sync(existing.iter().map(|o| (o.id, o.name.as_str())), desired);
        if plan.is_noop() {
            return Ok(());
        }

        if !plan.delete.is_empty() {
            self.repo.delete_objects(&mut *conn, &plan.delete).await?;
        }
        if !plan.insert.is_empty() {
            self.repo.insert_objects(&mut *conn, project_id, &plan.insert).await?;
        }

        tracing::debug!(
            project_id,
            objects_removed = plan.delete.len(),
            objects_added = plan.insert.len(),
            "Objetos reconciliados"
        );
        Ok(())
    }

    async fn load_view(
        &self,
        conn: &mut PgConnection,
        project: Project,
    ) -> Result<ProjectView, AppError> {
        let ids = [project.id];
        let blocks = self.repo.list_blocks(&mut *conn, &ids).await?;
        let block_ids: Vec<i32> = blocks.iter().map(|b| b.id).collect();
        let floors = self.repo.list_floors(&mut *conn, &block_ids).await?;
        let objects = self.repo.list_objects(&mut *conn, &ids).await?;

        ProjectView::assemble(vec![project], blocks, floors, objects)
            .pop()
            .ok_or_else(|| AppError::InternalServerError(anyhow::anyhow!("project view lost")))
    }
}
