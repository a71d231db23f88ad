use axum::{extract::State, http::StatusCode, Json};
use chrono::NaiveDate;
use color_eyre::eyre::eyre;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    domain::{
        APIError, EmployeeId, Project, ProjectId, ProjectPatch,
        ProjectStoreError,
    },
    AppState,
};

#[tracing::instrument(name = "Update project route handler", skip_all)]
pub async fn update_project(
    State(state): State<AppState>,
    Json(request): Json<PatchProjectRequest>,
) -> Result<(StatusCode, Json<PatchProjectResponse>), APIError> {
    let project_id = ProjectId::parse(&request.project_id)?;
    let leader_id = match &request.leader_id {
        Some(id) => Some(EmployeeId::parse(id)?),
        None => None,
    };

    if let Some(leader_id) = leader_id {
        if request.remove_leader != Some(true) {
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
        }
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
    let before = project.clone();

    let patch = ProjectPatch {
        title: request.title.clone(),
        customer_company_name: request.customer_company_name.clone(),
        contractor_company_name: request.contractor_company_name.clone(),
        priority: request.priority,
        start_date: request.start_date,
        end_date: request.end_date,
        remove_leader: request.remove_leader,
        leader_id,
    };
    project.apply_patch(&patch)?;

    project_store
        .save_project(&mut project)
        .await
        .map_err(|e| match e {
            ProjectStoreError::ProjectNotFound => {
                APIError::IDNotFoundError(*project_id.as_ref())
            }
            e => APIError::UnexpectedError(eyre!(e)),
        })?;

    let response = Json(PatchProjectResponse {
        id: *project_id.as_ref(),
        changes: collect_changes(&before, &project),
    });

    Ok((StatusCode::OK, response))
}

/// Field-by-field change log over the known field set; the fields are few
/// and fixed, so the comparisons are written out by hand.
fn collect_changes(before: &Project, after: &Project) -> Vec<PropertyChange> {
    let mut changes = Vec::new();
    let mut push = |property: &str, old: Value, new: Value| {
        if old != new {
            changes.push(PropertyChange {
                property: property.to_string(),
                old_value: old,
                new_value: new,
            });
        }
    };

    push("title", json!(before.title()), json!(after.title()));
    push(
        "customerCompanyName",
        json!(before.customer_company_name()),
        json!(after.customer_company_name()),
    );
    push(
        "contractorCompanyName",
        json!(before.contractor_company_name()),
        json!(after.contractor_company_name()),
    );
    push(
        "priority",
        json!(before.priority()),
        json!(after.priority()),
    );
    push(
        "startDate",
        json!(before.start_date()),
        json!(after.start_date()),
    );
    push("endDate", json!(before.end_date()), json!(after.end_date()));
    push(
        "leaderId",
        json!(before.leader_id().map(|id| *id.as_ref())),
        json!(after.leader_id().map(|id| *id.as_ref())),
    );

    changes
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct PatchProjectRequest {
    #[serde(rename = "projectId")]
    pub project_id: String,
    pub title: Option<String>,
    #[serde(rename = "customerCompanyName")]
    pub customer_company_name: Option<String>,
    #[serde(rename = "contractorCompanyName")]
    pub contractor_company_name: Option<String>,
    pub priority: Option<i32>,
    #[serde(rename = "startDate")]
    pub start_date: Option<NaiveDate>,
    #[serde(rename = "endDate")]
    pub end_date: Option<NaiveDate>,
    #[serde(rename = "removeLeader")]
    pub remove_leader: Option<bool>,
    #[serde(rename = "leaderId")]
    pub leader_id: Option<String>,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct PatchProjectResponse {
    pub id: uuid::Uuid,
    pub changes: Vec<PropertyChange>,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct PropertyChange {
    pub property: String,
    #[serde(rename = "oldValue")]
    pub old_value: Value,
    #[serde(rename = "newValue")]
    pub new_value: Value,
}
