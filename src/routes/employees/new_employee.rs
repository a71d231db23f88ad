use axum::{extract::State, http::StatusCode, Json};
use color_eyre::eyre::eyre;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{APIError, Email, Employee, EmployeeStoreError},
    AppState,
};

#[tracing::instrument(name = "Create new employee route handler", skip_all)]
pub async fn new_employee(
    State(state): State<AppState>,
    Json(request): Json<NewEmployeeRequest>,
) -> Result<(StatusCode, Json<NewEmployeeResponse>), APIError> {
    let email = Email::parse(request.email)?;
    let employee = Employee::create(
        request.firstname,
        request.lastname,
        request.patronymic,
        email,
    )?;

    state
        .employee_store
        .write()
        .await
        .add_employee(&employee)
        .await
        .map_err(|e| match e {
            EmployeeStoreError::EmailExists => APIError::EmailExistsError(
                employee.email.as_ref().to_owned(),
            ),
            e => APIError::UnexpectedError(eyre!(e)),
        })?;

    let response = Json(NewEmployeeResponse {
        id: *employee.id.as_ref(),
    });

    Ok((StatusCode::CREATED, response))
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct NewEmployeeResponse {
    pub id: uuid::Uuid,
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct NewEmployeeRequest {
    pub firstname: String,
    pub lastname: String,
    pub patronymic: Option<String>,
    pub email: String,
}
