use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use color_eyre::eyre::eyre;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{APIError, EmployeeId, ProjectId, ProjectStoreError},
    routes::employees::EmployeeResponse,
    AppState,
};

#[derive(Deserialize)]
pub struct GetProjectEmployeesQueryParams {
    #[serde(rename = "projectId")]
    project_id: uuid::Uuid,
}

#[tracing::instrument(name = "Get project employees route handler", skip_all)]
pub async fn get_project_employees(
    State(state): State<AppState>,
    Query(params): Query<GetProjectEmployeesQueryParams>,
) -> Result<(StatusCode, Json<ProjectEmployeesResponse>), APIError> {
    let project_id = ProjectId::new(params.project_id);

    let project = state
        .project_store
        .read()
        .await
        .get_project(&project_id)
        .await
        .map_err(|e| match e {
            ProjectStoreError::ProjectNotFound => {
                APIError::IDNotFoundError(*project_id.as_ref())
            }
            e => APIError::UnexpectedError(eyre!(e)),
        })?;

    let member_ids: Vec<EmployeeId> =
        project.employee_ids().iter().copied().collect();
    let employees = state
        .employee_store
        .read()
        .await
        .get_by_ids(&member_ids)
        .await
        .map_err(|e| APIError::UnexpectedError(eyre!(e)))?;

    let response = Json(ProjectEmployeesResponse {
        id: *project.id().as_ref(),
        title: project.title().to_owned(),
        leader_id: project.leader_id().map(|id| *id.as_ref()),
        employees: employees.iter().map(EmployeeResponse::from).collect(),
    });

    Ok((StatusCode::OK, response))
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectEmployeesResponse {
    pub id: uuid::Uuid,
    pub title: String,
    #[serde(rename = "leaderId")]
    pub leader_id: Option<uuid::Uuid>,
    pub employees: Vec<EmployeeResponse>,
}
