use std::collections::HashSet;

use super::{Email, EmployeeId, ProjectId, ValidationError};

/// Employee aggregate. Identity is immutable; name and contact fields are
/// replaced wholesale via `reconstruct`. Email uniqueness is a persistence
/// concern, not checked here.
#[derive(Debug, Clone, PartialEq)]
pub struct Employee {
    pub id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    pub patronymic: Option<String>,
    pub email: Email,
    pub project_ids: HashSet<ProjectId>,
}

impl Employee {
    pub fn create(
        first_name: String,
        last_name: String,
        patronymic: Option<String>,
        email: Email,
    ) -> Result<Self, ValidationError> {
        if first_name.trim().is_empty() {
            return Err(ValidationError::new(
                "Firstname cannot be empty".to_string(),
            ));
        }
        if last_name.trim().is_empty() {
            return Err(ValidationError::new(
                "Lastname cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            id: EmployeeId::default(),
            first_name: first_name.trim().to_owned(),
            last_name: last_name.trim().to_owned(),
            patronymic,
            email,
            project_ids: HashSet::new(),
        })
    }

    /// Trusted storage round-trip; no validation.
    pub fn reconstruct(
        id: EmployeeId,
        first_name: String,
        last_name: String,
        patronymic: Option<String>,
        email: Email,
        project_ids: HashSet<ProjectId>,
    ) -> Self {
        Self {
            id,
            first_name,
            last_name,
            patronymic,
            email,
            project_ids,
        }
    }
}
