use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use color_eyre::eyre::eyre;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{APIError, EmployeeId, EmployeeStoreError},
    AppState,
};

#[derive(Deserialize)]
pub struct GetEmployeeQueryParams {
    #[serde(rename = "employeeId")]
    employee_id: uuid::Uuid,
}

#[tracing::instrument(name = "Get employee route handler", skip_all)]
pub async fn get_employee(
    State(state): State<AppState>,
    Query(params): Query<GetEmployeeQueryParams>,
) -> Result<(StatusCode, Json<EmployeeDetailsResponse>), APIError> {
    let employee_id = EmployeeId::new(params.employee_id);

    let employee = state
        .employee_store
        .read()
        .await
        .get_employee(&employee_id)
        .await
        .map_err(|e| match e {
            EmployeeStoreError::EmployeeNotFound => {
                APIError::IDNotFoundError(*employee_id.as_ref())
            }
            e => APIError::UnexpectedError(eyre!(e)),
        })?;

    let mut project_ids: Vec<uuid::Uuid> =
        employee.project_ids.iter().map(|id| *id.as_ref()).collect();
    project_ids.sort();

    let response = Json(EmployeeDetailsResponse {
        employee: super::EmployeeResponse::from(&employee),
        project_ids,
    });

    Ok((StatusCode::OK, response))
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct EmployeeDetailsResponse {
    #[serde(flatten)]
    pub employee: super::EmployeeResponse,
    #[serde(rename = "projectIds")]
    pub project_ids: Vec<uuid::Uuid>,
}
