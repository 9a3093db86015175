pub mod catalog;
pub mod projects;
pub mod system;
pub mod works;
