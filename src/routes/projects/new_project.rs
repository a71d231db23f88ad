use axum::{extract::State, http::StatusCode, Json};
use chrono::NaiveDate;
use color_eyre::eyre::eyre;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::{
    domain::{APIError, EmployeeId, Project},
    AppState,
};

#[tracing::instrument(name = "Create new project route handler", skip_all)]
pub async fn new_project(
    State(state): State<AppState>,
    Json(request): Json<NewProjectRequest>,
) -> Result<(StatusCode, Json<NewProjectResponse>), APIError> {
    let leader_id = match &request.leader_id {
        Some(id) => Some(EmployeeId::parse(id)?),
        None => None,
    };

    let mut employee_ids = HashSet::new();
    if let Some(ids) = &request.employee_ids {
        for id in ids {
            employee_ids.insert(EmployeeId::parse(id)?);
        }
    }

    // Referenced employees must exist before the aggregate sees them.
    {
        let employee_store = state.employee_store.read().await;
        for employee_id in employee_ids.iter().chain(leader_id.iter()) {
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

    let project = Project::create(
        &request.title,
        &request.customer_company_name,
        &request.contractor_company_name,
        request.priority,
        request.start_date,
        request.end_date,
        leader_id,
        Some(employee_ids),
    )?;

    state
        .project_store
        .write()
        .await
        .add_project(&project)
        .await
        .map_err(|e| APIError::UnexpectedError(eyre!(e)))?;

    let response = Json(NewProjectResponse {
        id: *project.id().as_ref(),
    });

    Ok((StatusCode::CREATED, response))
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct NewProjectResponse {
    pub id: uuid::Uuid,
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct NewProjectRequest {
    pub title: String,
    #[serde(rename = "customerCompanyName", default = "unknown_company")]
    pub customer_company_name: String,
    #[serde(rename = "contractorCompanyName", default = "unknown_company")]
    pub contractor_company_name: String,
    #[serde(default)]
    pub priority: i32,
    #[serde(rename = "startDate")]
    pub start_date: NaiveDate,
    #[serde(rename = "endDate")]
    pub end_date: Option<NaiveDate>,
    #[serde(rename = "leaderId")]
    pub leader_id: Option<String>,
    #[serde(rename = "employeeIds")]
    pub employee_ids: Option<Vec<String>>,
}

fn unknown_company() -> String {
    "Unknown".to_string()
}
