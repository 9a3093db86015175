// src/services/seed_service.rs

use chrono::{Duration, Local, NaiveDate};
use rand::{rngs::StdRng, seq::IndexedRandom, Rng, SeedableRng};
use serde::Serialize;
use sqlx::{Acquire, Postgres};
use utoipa::ToSchema;

use crate::{
    common::error::AppError,
    db::{CatalogRepository, ProjectRepository, WorkRepository},
    models::{
        catalog::{Executor as ExecutorRow, WorkType},
        project::{ProjectFields, SiteObject},
        work::{NewWork, WorkStatus},
    },
    services::seed_catalog::{EXECUTORS, PROJECTS, WORK_TYPES},
};

pub const SEEDED_WORKS: usize = 200;

/// A seeded floor together with the project that owns it.
#[derive(Debug, Clone)]
pub struct SeedFloor {
    pub id: i32,
    pub number: String,
    pub project_id: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SeedSummary {
    pub projects: usize,
    pub floors: usize,
    pub objects: usize,
    pub work_types: usize,
    pub executors: usize,
    pub works: u64,
}

#[derive(Clone)]
pub struct SeedService {
    catalog_repo: CatalogRepository,
    project_repo: ProjectRepository,
    work_repo: WorkRepository,
}

impl SeedService {
    pub fn new(
        catalog_repo: CatalogRepository,
        project_repo: ProjectRepository,
        work_repo: WorkRepository,
    ) -> Self {
        Self { catalog_repo, project_repo, work_repo }
    }

    /// Wipes every table and writes the demo catalogue plus random works.
    /// Runs in one transaction: on failure the previous data is untouched.
    pub async fn seed<'e, E>(&self, executor: E) -> Result<SeedSummary, AppError>
    where
        E: Acquire<'e, Database = Postgres>,
    {
        let mut rng = StdRng::from_os_rng();
        let today = Local::now().date_naive();

        let mut tx = executor.begin().await?;

        self.catalog_repo.truncate_all(&mut *tx).await?;

        let mut work_types: Vec<WorkType> = Vec::with_capacity(WORK_TYPES.len());
        for wt in WORK_TYPES {
            work_types.push(
                self.catalog_repo
                    .create_work_type(&mut *tx, wt.name, wt.order, wt.color, wt.category)
                    .await?,
            );
        }

        let mut executors: Vec<ExecutorRow> = Vec::with_capacity(EXECUTORS.len());
        for name in EXECUTORS {
            executors.push(self.catalog_repo.create_executor(&mut *tx, name).await?);
        }

        let mut floors: Vec<SeedFloor> = Vec::new();
        let mut objects: Vec<SiteObject> = Vec::new();

        for seed in PROJECTS {
            let fields = ProjectFields {
                code: seed.code.to_string(),
                icon: Some(seed.icon.to_string()),
                name: seed.name.to_string(),
                description: Some(seed.description.to_string()),
                client: Some(seed.client.to_string()),
                contractor: Some(seed.contractor.to_string()),
                address: Some(seed.address.to_string()),
                start_date: ymd(seed.start_date),
                end_date: ymd(seed.end_date),
                budget: Some(seed.budget),
            };
            let project = self.project_repo.insert_project(&mut *tx, &fields).await?;

            for block_seed in seed.blocks {
                let block = self
                    .project_repo
                    .insert_block(&mut *tx, project.id, block_seed.name)
                    .await?;
                let numbers: Vec<String> =
                    block_seed.floors.iter().map(|f| f.to_string()).collect();
                let inserted = self.project_repo.insert_floors(&mut *tx, block.id, &numbers).await?;
                floors.extend(inserted.into_iter().map(|f| SeedFloor {
                    id: f.id,
                    number: f.number,
                    project_id: project.id,
                }));
            }

            let names: Vec<String> = seed.objects.iter().map(|o| o.to_string()).collect();
            objects.extend(self.project_repo.insert_objects(&mut *tx, project.id, &names).await?);
        }

        if floors.is_empty() || objects.is_empty() {
            return Err(AppError::SeedPrecondition(
                "No floors or objects to seed works".to_string(),
            ));
        }

        let works = plan_works(
            &mut rng,
            today,
            SEEDED_WORKS,
            &floors,
            &objects,
            &work_types,
            &executors,
        );
        let inserted = self.work_repo.insert_many(&mut *tx, &works).await?;

        tx.commit().await?;

        let summary = SeedSummary {
            projects: PROJECTS.len(),
            floors: floors.len(),
            objects: objects.len(),
            work_types: work_types.len(),
            executors: executors.len(),
            works: inserted,
        };
        tracing::info!(?summary, "🌱 Banco de dados populado com dados de demonstração");
        Ok(summary)
    }
}

fn ymd((y, m, d): (i32, u32, u32)) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

/// Generates up to `count` random works. Each picks a floor, then an object
/// of the same project; floors whose project has no objects are skipped.
pub fn plan_works<R>(
    rng: &mut R,
    today: NaiveDate,
    count: usize,
    floors: &[SeedFloor],
    objects: &[SiteObject],
    work_types: &[WorkType],
    executors: &[ExecutorRow],
) -> Vec<NewWork>
where
    R: Rng + ?Sized,
{
    let mut works = Vec::with_capacity(count);

    for _ in 0..count {
        let Some(floor) = floors.choose(rng) else {
            break;
        };
        let related: Vec<&SiteObject> =
            objects.iter().filter(|o| o.project_id == floor.project_id).collect();
        let Some(object) = related.choose(rng) else {
            continue;
        };
        let (Some(work_type), Some(executor)) = (work_types.choose(rng), executors.choose(rng))
        else {
            break;
        };

        let start_date = today - Duration::days(rng.random_range(0..=60));
        let end_date = start_date + Duration::days(rng.random_range(3..=14));
        let progress: i32 = rng.random_range(0..=100);

        works.push(NewWork {
            executor_id: executor.id,
            work_type_id: work_type.id,
            floor_id: floor.id,
            object_id: object.id,
            start_date,
            end_date,
            status: WorkStatus::derive(progress, end_date, today),
            priority: rng.random_range(1..=5).to_string(),
            progress,
            note: Some(format!(
                "Generated note for {} on floor {}",
                work_type.name, floor.number
            )),
        });
    }

    works
}
