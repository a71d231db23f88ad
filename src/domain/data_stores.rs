use super::{
    Employee, EmployeeId, PageQuery, Project, ProjectFilter, ProjectId,
};
use color_eyre::eyre::Report;
use thiserror::Error;

#[async_trait::async_trait]
pub trait ProjectStore {
    async fn add_project(
        &mut self,
        project: &Project,
    ) -> Result<(), ProjectStoreError>;
    async fn get_project(
        &self,
        project_id: &ProjectId,
    ) -> Result<Project, ProjectStoreError>;
    async fn get_all(&self) -> Result<Vec<Project>, ProjectStoreError>;
    async fn get_by_filter(
        &self,
        page: Option<&PageQuery>,
        filter: Option<&ProjectFilter>,
    ) -> Result<Vec<Project>, ProjectStoreError>;
    async fn count(&self) -> Result<i64, ProjectStoreError>;
    /// Persists scalar fields and drains the membership buffers within one
    /// atomic unit of work. On success the project's buffers are cleared;
    /// on failure both storage and buffers are left untouched, so the same
    /// save call can be retried.
    async fn save_project(
        &mut self,
        project: &mut Project,
    ) -> Result<(), ProjectStoreError>;
    async fn delete_project(
        &mut self,
        project_id: &ProjectId,
    ) -> Result<(), ProjectStoreError>;
}

#[derive(Debug, Error)]
pub enum ProjectStoreError {
    #[error("Project not found")]
    ProjectNotFound,
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
}

impl PartialEq for ProjectStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::ProjectNotFound, Self::ProjectNotFound)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

#[async_trait::async_trait]
pub trait EmployeeStore {
    async fn add_employee(
        &mut self,
        employee: &Employee,
    ) -> Result<(), EmployeeStoreError>;
    async fn get_employee(
        &self,
        employee_id: &EmployeeId,
    ) -> Result<Employee, EmployeeStoreError>;
    async fn get_by_ids(
        &self,
        employee_ids: &[EmployeeId],
    ) -> Result<Vec<Employee>, EmployeeStoreError>;
    async fn get_all(
        &self,
        search_text: Option<&str>,
    ) -> Result<Vec<Employee>, EmployeeStoreError>;
    async fn update_employee(
        &mut self,
        employee: &Employee,
    ) -> Result<(), EmployeeStoreError>;
    async fn delete_employee(
        &mut self,
        employee_id: &EmployeeId,
    ) -> Result<(), EmployeeStoreError>;
    /// Existence check used by the service layer before membership-mutating
    /// aggregate calls; the aggregate itself never verifies employee ids.
    async fn employee_exists(
        &self,
        employee_id: &EmployeeId,
    ) -> Result<bool, EmployeeStoreError>;
}

#[derive(Debug, Error)]
pub enum EmployeeStoreError {
    #[error("Employee not found")]
    EmployeeNotFound,
    #[error("Employee email already exists")]
    EmailExists,
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
}

impl PartialEq for EmployeeStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::EmployeeNotFound, Self::EmployeeNotFound)
                | (Self::EmailExists, Self::EmailExists)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}
