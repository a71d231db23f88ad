use axum::{
    extract::{Query, State},
    http::StatusCode,
};
use color_eyre::eyre::eyre;
use serde::Deserialize;

use crate::{
    domain::{APIError, ProjectId, ProjectStoreError},
    AppState,
};

#[derive(Deserialize)]
pub struct DeleteProjectQueryParams {
    #[serde(rename = "projectId")]
    project_id: uuid::Uuid,
}

#[tracing::instrument(name = "Delete project route handler", skip_all)]
pub async fn delete_project(
    State(state): State<AppState>,
    Query(params): Query<DeleteProjectQueryParams>,
) -> Result<StatusCode, APIError> {
    let project_id = ProjectId::new(params.project_id);

    state
        .project_store
        .write()
        .await
        .delete_project(&project_id)
        .await
        .map_err(|e| match e {
            ProjectStoreError::ProjectNotFound => {
                APIError::IDNotFoundError(*project_id.as_ref())
            }
            e => APIError::UnexpectedError(eyre!(e)),
        })?;

    Ok(StatusCode::OK)
}
