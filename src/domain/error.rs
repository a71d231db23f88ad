use color_eyre::eyre::Report;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum APIError {
    #[error("Resource with ID not found: {0}")]
    IDNotFoundError(Uuid),
    #[error("Employee with this email already exists: {0}")]
    EmailExistsError(String),
    #[error("Project rule violation")]
    ProjectRuleError(#[from] ProjectError),
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
    #[error("Validation error")]
    ValidationError(#[from] ValidationError),
}

/// Expected rejections from `Project` aggregate operations. These are
/// recoverable and surfaced to the caller as a rejected request, never a
/// process failure.
#[derive(Debug, Error, PartialEq)]
pub enum ProjectError {
    #[error("Employee {0} is already assigned to project")]
    AlreadyAssigned(Uuid),
    #[error("Employee {0} is not assigned to project")]
    NotAssigned(Uuid),
    #[error("Employee {0} is already the project leader")]
    AlreadyLeader(Uuid),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Error, PartialEq)]
#[error("Validation error: {0}")]
pub struct ValidationError(String);

impl ValidationError {
    pub fn new(message: String) -> Self {
        Self(message)
    }

    pub fn as_ref(&self) -> &String {
        &self.0
    }
}
