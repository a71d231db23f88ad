use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use color_eyre::eyre::eyre;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{APIError, PageQuery, ProjectFilter, SortBy},
    AppState,
};

#[derive(Debug, Deserialize)]
pub struct ProjectListQueryParams {
    #[serde(rename = "pageNum")]
    page_num: Option<u32>,
    #[serde(rename = "pageSize")]
    page_size: Option<u32>,
    #[serde(rename = "searchText")]
    search_text: Option<String>,
    #[serde(rename = "startDateFrom")]
    start_date_from: Option<NaiveDate>,
    #[serde(rename = "startDateTo")]
    start_date_to: Option<NaiveDate>,
    #[serde(rename = "priorityFrom")]
    priority_from: Option<i32>,
    #[serde(rename = "priorityTo")]
    priority_to: Option<i32>,
    #[serde(rename = "sortBy")]
    sort_by: Option<SortBy>,
    #[serde(rename = "sortDescending", default)]
    sort_descending: bool,
}

#[tracing::instrument(name = "Get project list route handler", skip_all)]
pub async fn get_project_list(
    State(state): State<AppState>,
    Query(params): Query<ProjectListQueryParams>,
) -> Result<Response, APIError> {
    let page = match (params.page_num, params.page_size) {
        (None, None) => None,
        (page_num, page_size) => {
            let defaults = PageQuery::default();
            Some(PageQuery {
                page_num: page_num.unwrap_or(defaults.page_num),
                page_size: page_size.unwrap_or(defaults.page_size),
            })
        }
    };
    let filter = ProjectFilter {
        search_text: params.search_text,
        start_date_from: params.start_date_from,
        start_date_to: params.start_date_to,
        priority_from: params.priority_from,
        priority_to: params.priority_to,
        sort_by: params.sort_by,
        sort_descending: params.sort_descending,
    };

    let project_store = state.project_store.read().await;
    let projects = project_store
        .get_by_filter(page.as_ref(), Some(&filter))
        .await
        .map_err(|e| APIError::UnexpectedError(eyre!(e)))?;

    if projects.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    let total = project_store
        .count()
        .await
        .map_err(|e| APIError::UnexpectedError(eyre!(e)))?;
    let total_pages = match page {
        Some(page) if page.page_size > 0 => {
            (total + i64::from(page.page_size) - 1)
                / i64::from(page.page_size)
        }
        _ => 1,
    };

    let response = Json(ProjectListResponse {
        items: projects.iter().map(super::ProjectResponse::from).collect(),
        total,
        total_pages,
    });

    Ok((StatusCode::OK, response).into_response())
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectListResponse {
    pub items: Vec<super::ProjectResponse>,
    pub total: i64,
    #[serde(rename = "totalPages")]
    pub total_pages: i64,
}
