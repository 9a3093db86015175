pub mod catalog_repo;
pub use catalog_repo::CatalogRepository;
pub mod project_repo;
pub use project_repo::ProjectRepository;
pub mod work_repo;
pub use work_repo::WorkRepository;
