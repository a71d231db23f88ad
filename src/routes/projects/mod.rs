mod assign_employees;
mod assign_leader;
mod delete_project;
mod get_project;
mod get_project_employees;
mod get_project_list;
mod new_project;
mod update_project;

pub use assign_employees::assign_employees;
pub use assign_leader::assign_leader;
pub use delete_project::delete_project;
pub use get_project::get_project;
pub use get_project_employees::get_project_employees;
pub use get_project_list::get_project_list;
pub use new_project::new_project;
pub use update_project::update_project;

use serde::{Deserialize, Serialize};

use crate::domain::Project;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectResponse {
    pub id: uuid::Uuid,
    pub title: String,
    #[serde(rename = "customerCompanyName")]
    pub customer_company_name: String,
    #[serde(rename = "contractorCompanyName")]
    pub contractor_company_name: String,
    pub priority: i32,
    #[serde(rename = "startDate")]
    pub start_date: chrono::NaiveDate,
    #[serde(rename = "endDate")]
    pub end_date: Option<chrono::NaiveDate>,
}

impl From<&Project> for ProjectResponse {
    fn from(project: &Project) -> Self {
        Self {
            id: *project.id().as_ref(),
            title: project.title().to_owned(),
            customer_company_name: project
                .customer_company_name()
                .to_owned(),
            contractor_company_name: project
                .contractor_company_name()
                .to_owned(),
            priority: project.priority(),
            start_date: project.start_date(),
            end_date: project.end_date(),
        }
    }
}
