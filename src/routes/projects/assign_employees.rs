use axum::{extract::State, http::StatusCode, Json};
use color_eyre::eyre::eyre;
use serde::Deserialize;

use crate::{
    domain::{APIError, EmployeeId, ProjectId, ProjectStoreError},
    AppState,
};

/// Applies a batch of membership edits to a project: additions first, then
/// removals, in request order. The aggregate buffers the delta and the
/// store drains it in one unit of work on save.
#[tracing::instrument(name = "Assign project employees route handler", skip_all)]
pub async fn assign_employees(
    State(state): State<AppState>,
    Json(request): Json<AssignEmployeesRequest>,
) -> Result<StatusCode, APIError> {
    let project_id = ProjectId::parse(&request.project_id)?;

    let mut to_add = Vec::new();
    for id in &request.employees_to_add {
        to_add.push(EmployeeId::parse(id)?);
    }
    let mut to_remove = Vec::new();
    for id in &request.employees_to_remove {
        to_remove.push(EmployeeId::parse(id)?);
    }

    {
        let employee_store = state.employee_store.read().await;
        for employee_id in to_add.iter().chain(to_remove.iter()) {
            let exists = employee_store
                .employee_exists(employee_id)
                .await
                .map_err(|e| APIError::UnexpectedError(eyre!(e)))?;
            if !exists {
                return Err(APIError::IDNotFoundError(
                    *employee_id.as_ref(),
                ));
            }
        }
    }

    let mut project_store = state.project_store.write().await;
    let mut project = project_store
        .get_project(&project_id)
        .await
        .map_err(|e| match e {
            ProjectStoreError::ProjectNotFound => {
                APIError::IDNotFoundError(*project_id.as_ref())
            }
            e => APIError::UnexpectedError(eyre!(e)),
        })?;

    for employee_id in to_add {
        project.assign_employee(employee_id)?;
    }
    for employee_id in to_remove {
        project.remove_employee(employee_id)?;
    }

    project_store
        .save_project(&mut project)
        .await
        .map_err(|e| match e {
            ProjectStoreError::ProjectNotFound => {
                APIError::IDNotFoundError(*project_id.as_ref())
            }
            e => APIError::UnexpectedError(eyre!(e)),
        })?;

    Ok(StatusCode::OK)
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct AssignEmployeesRequest {
    #[serde(rename = "projectId")]
    pub project_id: String,
    #[serde(rename = "employeesToAdd", default)]
    pub employees_to_add: Vec<String>,
    #[serde(rename = "employeesToRemove", default)]
    pub employees_to_remove: Vec<String>,
}
