// src/config.rs

use std::{env, time::Duration};

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    db::{CatalogRepository, ProjectRepository, WorkRepository},
    services::{
        catalog_service::CatalogService, project_service::ProjectService,
        seed_service::SeedService, work_service::WorkService,
    },
};

/// Process configuration, read from the environment (and `.env`).
///
/// | Env Var              | Default                 |
/// |----------------------|-------------------------|
/// | `DATABASE_URL`       | required                |
/// | `HOST`               | `0.0.0.0`               |
/// | `PORT`               | `3000`                  |
/// | `CORS_ORIGIN`        | `http://localhost:5173` |
/// | `DB_MAX_CONNECTIONS` | `5`                     |
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub cors_origin: String,
    pub db_max_connections: u32,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .context("PORT must be a valid u16")?;
        let cors_origin =
            env::var("CORS_ORIGIN").unwrap_or_else(|_| "http://localhost:5173".into());
        let db_max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".into())
            .parse()
            .context("DB_MAX_CONNECTIONS must be a valid u32")?;

        Ok(Self {
            database_url,
            host,
            port,
            cors_origin,
            db_max_connections,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub project_service: ProjectService,
    pub work_service: WorkService,
    pub catalog_service: CatalogService,
    pub seed_service: SeedService,
}

impl AppState {
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let db_pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&config.database_url)
            .await
            .context("Falha ao conectar ao banco de dados")?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        Ok(Self::from_pool(db_pool))
    }

    /// Wires repositories into services on top of an existing pool.
    pub fn from_pool(db_pool: PgPool) -> Self {
        let project_repo = ProjectRepository::new();
        let work_repo = WorkRepository::new();
        let catalog_repo = CatalogRepository::new();

        Self {
            db_pool,
            project_service: ProjectService::new(project_repo.clone()),
            work_service: WorkService::new(work_repo.clone()),
            catalog_service: CatalogService::new(catalog_repo.clone()),
            seed_service: SeedService::new(catalog_repo, project_repo, work_repo),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_joins_host_and_port() {
        let config = AppConfig {
            database_url: "postgres://localhost/obra".into(),
            host: "127.0.0.1".into(),
            port: 8080,
            cors_origin: "http://localhost:5173".into(),
            db_max_connections: 5,
        };
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
    }
}
