use axum::{extract::State, http::StatusCode, Json};
use color_eyre::eyre::eyre;
use serde::Deserialize;

use crate::{
    domain::{
        APIError, Email, Employee, EmployeeId, EmployeeStoreError,
        ValidationError,
    },
    AppState,
};

#[tracing::instrument(name = "Update employee route handler", skip_all)]
pub async fn update_employee(
    State(state): State<AppState>,
    Json(request): Json<UpdateEmployeeRequest>,
) -> Result<StatusCode, APIError> {
    let employee_id = EmployeeId::parse(&request.employee_id)?;

    let email = match request.email {
        Some(email) => Some(Email::parse(email)?),
        None => None,
    };
    validate_name(&request.firstname, "Firstname")?;
    validate_name(&request.lastname, "Lastname")?;

    let mut employee_store = state.employee_store.write().await;
    let employee = employee_store
        .get_employee(&employee_id)
        .await
        .map_err(|e| match e {
            EmployeeStoreError::EmployeeNotFound => {
                APIError::IDNotFoundError(*employee_id.as_ref())
            }
            e => APIError::UnexpectedError(eyre!(e)),
        })?;

    // Merge the provided fields onto the stored employee; identity and
    // membership back-references are carried over untouched.
    let updated = Employee::reconstruct(
        employee.id,
        request.firstname.unwrap_or(employee.first_name),
        request.lastname.unwrap_or(employee.last_name),
        request.patronymic.or(employee.patronymic),
        email.clone().unwrap_or(employee.email),
        employee.project_ids,
    );

    employee_store
        .update_employee(&updated)
        .await
        .map_err(|e| match e {
            EmployeeStoreError::EmployeeNotFound => {
                APIError::IDNotFoundError(*employee_id.as_ref())
            }
            EmployeeStoreError::EmailExists => APIError::EmailExistsError(
                updated.email.as_ref().to_owned(),
            ),
            e => APIError::UnexpectedError(eyre!(e)),
        })?;

    Ok(StatusCode::OK)
}

fn validate_name(
    value: &Option<String>,
    field: &str,
) -> Result<(), ValidationError> {
    match value {
        Some(value) if value.trim().is_empty() => Err(ValidationError::new(
            format!("{field} cannot be empty"),
        )),
        _ => Ok(()),
    }
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct UpdateEmployeeRequest {
    #[serde(rename = "employeeId")]
    pub employee_id: String,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub patronymic: Option<String>,
    pub email: Option<String>,
}
