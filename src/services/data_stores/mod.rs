mod hashmap_employee_store;
mod hashmap_project_store;
mod postgres_employee_store;
mod postgres_project_store;

pub use hashmap_employee_store::HashmapEmployeeStore;
pub use hashmap_project_store::HashmapProjectStore;
pub use postgres_employee_store::PostgresEmployeeStore;
pub use postgres_project_store::PostgresProjectStore;
