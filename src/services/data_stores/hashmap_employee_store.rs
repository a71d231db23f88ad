use std::collections::HashMap;

use crate::domain::{
    Employee, EmployeeId, EmployeeStore, EmployeeStoreError,
};

#[derive(Default)]
pub struct HashmapEmployeeStore {
    employees: HashMap<EmployeeId, Employee>,
}

impl HashmapEmployeeStore {
    fn email_taken(&self, employee: &Employee) -> bool {
        self.employees
            .values()
            .any(|e| e.email == employee.email && e.id != employee.id)
    }
}

#[async_trait::async_trait]
impl EmployeeStore for HashmapEmployeeStore {
    async fn add_employee(
        &mut self,
        employee: &Employee,
    ) -> Result<(), EmployeeStoreError> {
        if self.email_taken(employee) {
            return Err(EmployeeStoreError::EmailExists);
        }

        self.employees.insert(employee.id, employee.clone());
        Ok(())
    }

    async fn get_employee(
        &self,
        employee_id: &EmployeeId,
    ) -> Result<Employee, EmployeeStoreError> {
        match self.employees.get(employee_id) {
            Some(employee) => Ok(employee.clone()),
            None => Err(EmployeeStoreError::EmployeeNotFound),
        }
    }

    async fn get_by_ids(
        &self,
        employee_ids: &[EmployeeId],
    ) -> Result<Vec<Employee>, EmployeeStoreError> {
        let mut employees: Vec<Employee> = employee_ids
            .iter()
            .filter_map(|id| self.employees.get(id).cloned())
            .collect();

        employees.sort_by(|a, b| {
            (&a.last_name, &a.first_name).cmp(&(&b.last_name, &b.first_name))
        });
        Ok(employees)
    }

    async fn get_all(
        &self,
        search_text: Option<&str>,
    ) -> Result<Vec<Employee>, EmployeeStoreError> {
        let mut employees: Vec<Employee> = match search_text {
            Some(search_text) if !search_text.trim().is_empty() => {
                let search_text = search_text.trim().to_lowercase();
                self.employees
                    .values()
                    .filter(|e| {
                        e.first_name.to_lowercase().starts_with(&search_text)
                            || e.last_name
                                .to_lowercase()
                                .starts_with(&search_text)
                            || e.patronymic.as_ref().is_some_and(|p| {
                                p.to_lowercase().starts_with(&search_text)
                            })
                    })
                    .cloned()
                    .collect()
            }
            _ => self.employees.values().cloned().collect(),
        };

        employees.sort_by(|a, b| {
            (&a.last_name, &a.first_name).cmp(&(&b.last_name, &b.first_name))
        });
        Ok(employees)
    }

    async fn update_employee(
        &mut self,
        employee: &Employee,
    ) -> Result<(), EmployeeStoreError> {
        if !self.employees.contains_key(&employee.id) {
            return Err(EmployeeStoreError::EmployeeNotFound);
        }
        if self.email_taken(employee) {
            return Err(EmployeeStoreError::EmailExists);
        }

        self.employees.insert(employee.id, employee.clone());
        Ok(())
    }

    async fn delete_employee(
        &mut self,
        employee_id: &EmployeeId,
    ) -> Result<(), EmployeeStoreError> {
        match self.employees.remove(employee_id) {
            Some(_) => Ok(()),
            None => Err(EmployeeStoreError::EmployeeNotFound),
        }
    }

    async fn employee_exists(
        &self,
        employee_id: &EmployeeId,
    ) -> Result<bool, EmployeeStoreError> {
        Ok(self.employees.contains_key(employee_id))
    }
}
