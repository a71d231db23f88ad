use chrono::NaiveDate;
use serde::Deserialize;

/// 1-based page selection for project listings.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PageQuery {
    #[serde(rename = "pageNum", default = "default_page_num")]
    pub page_num: u32,
    #[serde(rename = "pageSize", default = "default_page_size")]
    pub page_size: u32,
}

fn default_page_num() -> u32 {
    1
}

fn default_page_size() -> u32 {
    20
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page_num: default_page_num(),
            page_size: default_page_size(),
        }
    }
}

/// Filtering and sorting options for project listings. `search_text`
/// matches title, customer and contractor company names,
/// case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProjectFilter {
    #[serde(rename = "searchText")]
    pub search_text: Option<String>,
    #[serde(rename = "startDateFrom")]
    pub start_date_from: Option<NaiveDate>,
    #[serde(rename = "startDateTo")]
    pub start_date_to: Option<NaiveDate>,
    #[serde(rename = "priorityFrom")]
    pub priority_from: Option<i32>,
    #[serde(rename = "priorityTo")]
    pub priority_to: Option<i32>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<SortBy>,
    #[serde(rename = "sortDescending", default)]
    pub sort_descending: bool,
}

/// Sortable project fields. Default ordering (no `sortBy`) is priority
/// descending, then start date descending.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    Title,
    Priority,
    StartDate,
    EndDate,
    CustomerCompany,
    ContractorCompany,
}
