use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::{EmployeeStore, ProjectStore};

pub type ProjectStoreType = Arc<RwLock<dyn ProjectStore + Send + Sync>>;
pub type EmployeeStoreType = Arc<RwLock<dyn EmployeeStore + Send + Sync>>;

#[derive(Clone)]
pub struct AppState {
    pub project_store: ProjectStoreType,
    pub employee_store: EmployeeStoreType,
}

impl AppState {
    pub fn new(
        project_store: ProjectStoreType,
        employee_store: EmployeeStoreType,
    ) -> Self {
        Self {
            project_store,
            employee_store,
        }
    }
}
