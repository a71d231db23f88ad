pub mod employees;
pub mod projects;
