use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use color_eyre::eyre::eyre;
use serde::Deserialize;

use crate::{
    domain::{APIError, ProjectId, ProjectStoreError},
    AppState,
};

#[derive(Deserialize)]
pub struct GetProjectQueryParams {
    #[serde(rename = "projectId")]
    project_id: uuid::Uuid,
}

#[tracing::instrument(name = "Get project route handler", skip_all)]
pub async fn get_project(
    State(state): State<AppState>,
    Query(params): Query<GetProjectQueryParams>,
) -> Result<(StatusCode, Json<super::ProjectResponse>), APIError> {
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

    Ok((StatusCode::OK, Json(super::ProjectResponse::from(&project))))
}
