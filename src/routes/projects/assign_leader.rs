use axum::{extract::State, http::StatusCode, Json};
use color_eyre::eyre::eyre;
use serde::Deserialize;

use crate::{
    domain::{APIError, EmployeeId, ProjectId, ProjectStoreError},
    AppState,
};

#[tracing::instrument(name = "Assign project leader route handler", skip_all)]
pub async fn assign_leader(
    State(state): State<AppState>,
    Json(request): Json<AssignLeaderRequest>,
) -> Result<StatusCode, APIError> {
    let project_id = ProjectId::parse(&request.project_id)?;
    let leader_id = EmployeeId::parse(&request.leader_id)?;

    let exists = state
        .employee_store
        .read()
        .await
        .employee_exists(&leader_id)
        .await
        .map_err(|e| APIError::UnexpectedError(eyre!(e)))?;
    if !exists {
        return Err(APIError::IDNotFoundError(*leader_id.as_ref()));
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

    project.assign_leader(leader_id)?;

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
pub struct AssignLeaderRequest {
    #[serde(rename = "projectId")]
    pub project_id: String,
    #[serde(rename = "leaderId")]
    pub leader_id: String,
}
