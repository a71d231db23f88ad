use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use color_eyre::eyre::eyre;
use serde::Deserialize;

use crate::{domain::APIError, AppState};

#[derive(Deserialize)]
pub struct EmployeeListQueryParams {
    #[serde(rename = "searchText")]
    search_text: Option<String>,
}

#[tracing::instrument(name = "Get employee list route handler", skip_all)]
pub async fn get_employee_list(
    State(state): State<AppState>,
    Query(params): Query<EmployeeListQueryParams>,
) -> Result<Response, APIError> {
    let employees = state
        .employee_store
        .read()
        .await
        .get_all(params.search_text.as_deref())
        .await
        .map_err(|e| APIError::UnexpectedError(eyre!(e)))?;

    if employees.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    let response: Vec<super::EmployeeResponse> =
        employees.iter().map(super::EmployeeResponse::from).collect();

    Ok((StatusCode::OK, Json(response)).into_response())
}
