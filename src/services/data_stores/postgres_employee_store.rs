use std::collections::{HashMap, HashSet};

use color_eyre::eyre::eyre;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{
    Email, Employee, EmployeeId, EmployeeStore, EmployeeStoreError,
    ProjectId,
};

pub struct PostgresEmployeeStore {
    pool: PgPool,
}

impl PostgresEmployeeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn get_project_links(
        &self,
        employee_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, HashSet<ProjectId>>, EmployeeStoreError> {
        if employee_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let links = sqlx::query_as::<_, (Uuid, Uuid)>(
            r#"
                SELECT employee_id, project_id
                FROM project_employees
                WHERE employee_id = ANY($1)
            "#,
        )
        .bind(employee_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| EmployeeStoreError::UnexpectedError(eyre!(e)))?;

        let mut memberships: HashMap<Uuid, HashSet<ProjectId>> =
            HashMap::new();
        for (employee_id, project_id) in links {
            memberships
                .entry(employee_id)
                .or_default()
                .insert(ProjectId::new(project_id));
        }
        Ok(memberships)
    }
}

#[derive(sqlx::FromRow)]
struct EmployeeRow {
    id: Uuid,
    first_name: String,
    last_name: String,
    patronymic: Option<String>,
    email: String,
}

impl EmployeeRow {
    fn into_domain(
        self,
        project_ids: HashSet<ProjectId>,
    ) -> Result<Employee, EmployeeStoreError> {
        let email = Email::parse(self.email)
            .map_err(|e| EmployeeStoreError::UnexpectedError(eyre!(e)))?;
        Ok(Employee::reconstruct(
            EmployeeId::new(self.id),
            self.first_name,
            self.last_name,
            self.patronymic,
            email,
            project_ids,
        ))
    }
}

#[async_trait::async_trait]
impl EmployeeStore for PostgresEmployeeStore {
    #[tracing::instrument(name = "Adding employee to PostgreSQL", skip_all)]
    async fn add_employee(
        &mut self,
        employee: &Employee,
    ) -> Result<(), EmployeeStoreError> {
        sqlx::query(
            r#"
            INSERT INTO employees (id, first_name, last_name, patronymic,
                email)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(employee.id.as_ref())
        .bind(&employee.first_name)
        .bind(&employee.last_name)
        .bind(&employee.patronymic)
        .bind(employee.email.as_ref())
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                EmployeeStoreError::EmailExists
            }
            e => EmployeeStoreError::UnexpectedError(eyre!(e)),
        })?;
        Ok(())
    }

    #[tracing::instrument(
        name = "Getting employee from PostgreSQL",
        skip_all
    )]
    async fn get_employee(
        &self,
        employee_id: &EmployeeId,
    ) -> Result<Employee, EmployeeStoreError> {
        let row = sqlx::query_as::<_, EmployeeRow>(
            r#"
                SELECT id, first_name, last_name, patronymic, email
                FROM employees
                WHERE id = $1
            "#,
        )
        .bind(employee_id.as_ref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => EmployeeStoreError::EmployeeNotFound,
            e => EmployeeStoreError::UnexpectedError(eyre!(e)),
        })?;

        let links = self.get_project_links(&[row.id]).await?;
        let project_ids = links.into_values().next().unwrap_or_default();
        row.into_domain(project_ids)
    }

    #[tracing::instrument(
        name = "Getting employees by ids from PostgreSQL",
        skip_all
    )]
    async fn get_by_ids(
        &self,
        employee_ids: &[EmployeeId],
    ) -> Result<Vec<Employee>, EmployeeStoreError> {
        let ids: Vec<Uuid> =
            employee_ids.iter().map(|id| *id.as_ref()).collect();

        let rows = sqlx::query_as::<_, EmployeeRow>(
            r#"
                SELECT id, first_name, last_name, patronymic, email
                FROM employees
                WHERE id = ANY($1)
                ORDER BY last_name, first_name
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| EmployeeStoreError::UnexpectedError(eyre!(e)))?;

        let mut links = self.get_project_links(&ids).await?;
        rows.into_iter()
            .map(|row| {
                let project_ids =
                    links.remove(&row.id).unwrap_or_default();
                row.into_domain(project_ids)
            })
            .collect()
    }

    #[tracing::instrument(
        name = "Getting employee list from PostgreSQL",
        skip_all
    )]
    async fn get_all(
        &self,
        search_text: Option<&str>,
    ) -> Result<Vec<Employee>, EmployeeStoreError> {
        let rows = match search_text {
            Some(search_text) if !search_text.trim().is_empty() => {
                let pattern =
                    format!("{}%", search_text.trim().to_lowercase());
                sqlx::query_as::<_, EmployeeRow>(
                    r#"
                        SELECT id, first_name, last_name, patronymic, email
                        FROM employees
                        WHERE LOWER(first_name) LIKE $1
                           OR LOWER(last_name) LIKE $1
                           OR (patronymic IS NOT NULL
                               AND LOWER(patronymic) LIKE $1)
                        ORDER BY last_name, first_name
                    "#,
                )
                .bind(pattern)
                .fetch_all(&self.pool)
                .await
            }
            _ => {
                sqlx::query_as::<_, EmployeeRow>(
                    r#"
                        SELECT id, first_name, last_name, patronymic, email
                        FROM employees
                        ORDER BY last_name, first_name
                    "#,
                )
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| EmployeeStoreError::UnexpectedError(eyre!(e)))?;

        // List queries skip the project-id back-references.
        rows.into_iter()
            .map(|row| row.into_domain(HashSet::new()))
            .collect()
    }

    #[tracing::instrument(name = "Updating employee in PostgreSQL", skip_all)]
    async fn update_employee(
        &mut self,
        employee: &Employee,
    ) -> Result<(), EmployeeStoreError> {
        let result = sqlx::query(
            r#"
            UPDATE employees
            SET first_name = $2, last_name = $3, patronymic = $4, email = $5
            WHERE id = $1
            "#,
        )
        .bind(employee.id.as_ref())
        .bind(&employee.first_name)
        .bind(&employee.last_name)
        .bind(&employee.patronymic)
        .bind(employee.email.as_ref())
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                EmployeeStoreError::EmailExists
            }
            e => EmployeeStoreError::UnexpectedError(eyre!(e)),
        })?;

        if result.rows_affected() == 0 {
            return Err(EmployeeStoreError::EmployeeNotFound);
        }
        Ok(())
    }

    #[tracing::instrument(
        name = "Deleting employee from PostgreSQL",
        skip_all
    )]
    async fn delete_employee(
        &mut self,
        employee_id: &EmployeeId,
    ) -> Result<(), EmployeeStoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| EmployeeStoreError::UnexpectedError(eyre!(e)))?;

        // Membership links and leadership references go first, then the
        // row itself, all in one unit of work.
        sqlx::query("DELETE FROM project_employees WHERE employee_id = $1")
            .bind(employee_id.as_ref())
            .execute(&mut *tx)
            .await
            .map_err(|e| EmployeeStoreError::UnexpectedError(eyre!(e)))?;

        sqlx::query("UPDATE projects SET leader_id = NULL WHERE leader_id = $1")
            .bind(employee_id.as_ref())
            .execute(&mut *tx)
            .await
            .map_err(|e| EmployeeStoreError::UnexpectedError(eyre!(e)))?;

        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(employee_id.as_ref())
            .execute(&mut *tx)
            .await
            .map_err(|e| EmployeeStoreError::UnexpectedError(eyre!(e)))?;

        if result.rows_affected() == 0 {
            return Err(EmployeeStoreError::EmployeeNotFound);
        }

        tx.commit()
            .await
            .map_err(|e| EmployeeStoreError::UnexpectedError(eyre!(e)))?;
        Ok(())
    }

    #[tracing::instrument(
        name = "Checking employee existence in PostgreSQL",
        skip_all
    )]
    async fn employee_exists(
        &self,
        employee_id: &EmployeeId,
    ) -> Result<bool, EmployeeStoreError> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM employees WHERE id = $1)",
        )
        .bind(employee_id.as_ref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| EmployeeStoreError::UnexpectedError(eyre!(e)))
    }
}
