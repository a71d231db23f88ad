mod delete_employee;
mod get_employee;
mod get_employee_list;
mod new_employee;
mod update_employee;

pub use delete_employee::delete_employee;
pub use get_employee::get_employee;
pub use get_employee_list::get_employee_list;
pub use new_employee::new_employee;
pub use update_employee::update_employee;

use serde::{Deserialize, Serialize};

use crate::domain::Employee;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct EmployeeResponse {
    pub id: uuid::Uuid,
    pub firstname: String,
    pub lastname: String,
    pub patronymic: Option<String>,
    pub email: String,
}

impl From<&Employee> for EmployeeResponse {
    fn from(employee: &Employee) -> Self {
        Self {
            id: *employee.id.as_ref(),
            firstname: employee.first_name.clone(),
            lastname: employee.last_name.clone(),
            patronymic: employee.patronymic.clone(),
            email: employee.email.as_ref().to_owned(),
        }
    }
}
