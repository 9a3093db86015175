pub mod catalog_service;
pub mod project_service;
pub mod reconcile;
pub mod seed_catalog;
pub mod seed_service;
pub mod work_service;
