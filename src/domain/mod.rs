mod data_stores;
mod email;
mod employee;
mod employee_id;
mod error;
mod project;
mod project_id;
mod project_query;

pub use data_stores::*;
pub use email::*;
pub use employee::*;
pub use employee_id::*;
pub use error::*;
pub use project::*;
pub use project_id::*;
pub use project_query::*;
