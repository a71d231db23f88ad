use axum::{
    extract::{Query, State},
    http::StatusCode,
};
use color_eyre::eyre::eyre;
use serde::Deserialize;

use crate::{
    domain::{APIError, EmployeeId, EmployeeStoreError},
    AppState,
};

#[derive(Deserialize)]
pub struct DeleteEmployeeQueryParams {
    #[serde(rename = "employeeId")]
    employee_id: uuid::Uuid,
}

#[tracing::instrument(name = "Delete employee route handler", skip_all)]
pub async fn delete_employee(
    State(state): State<AppState>,
    Query(params): Query<DeleteEmployeeQueryParams>,
) -> Result<StatusCode, APIError> {
    let employee_id = EmployeeId::new(params.employee_id);

    state
        .employee_store
        .write()
        .await
        .delete_employee(&employee_id)
        .await
        .map_err(|e| match e {
            EmployeeStoreError::EmployeeNotFound => {
                APIError::IDNotFoundError(*employee_id.as_ref())
            }
            e => APIError::UnexpectedError(eyre!(e)),
        })?;

    Ok(StatusCode::OK)
}
