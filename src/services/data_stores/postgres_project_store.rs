use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use color_eyre::eyre::eyre;
use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::domain::{
    EmployeeId, PageQuery, Project, ProjectFilter, ProjectId, ProjectStore,
    ProjectStoreError, SortBy,
};

pub struct PostgresProjectStore {
    pool: PgPool,
}

impl PostgresProjectStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ProjectRow {
    id: Uuid,
    title: String,
    customer_company_name: String,
    contractor_company_name: String,
    priority: i32,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    leader_id: Option<Uuid>,
}

#[derive(sqlx::FromRow)]
struct LinkRow {
    project_id: Uuid,
    employee_id: Uuid,
}

const PROJECT_COLUMNS: &str = "id, title, customer_company_name, \
     contractor_company_name, priority, start_date, end_date, leader_id";

impl ProjectRow {
    fn into_domain(self, employee_ids: HashSet<EmployeeId>) -> Project {
        Project::reconstruct(
            ProjectId::new(self.id),
            self.title,
            self.customer_company_name,
            self.contractor_company_name,
            self.priority,
            self.start_date,
            self.end_date,
            self.leader_id.map(EmployeeId::new),
            employee_ids,
        )
    }
}

impl PostgresProjectStore {
    async fn get_memberships(
        &self,
        project_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, HashSet<EmployeeId>>, ProjectStoreError> {
        if project_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let links = sqlx::query_as::<_, LinkRow>(
            r#"
                SELECT project_id, employee_id
                FROM project_employees
                WHERE project_id = ANY($1)
            "#,
        )
        .bind(project_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?;

        let mut memberships: HashMap<Uuid, HashSet<EmployeeId>> =
            HashMap::new();
        for link in links {
            memberships
                .entry(link.project_id)
                .or_default()
                .insert(EmployeeId::new(link.employee_id));
        }
        Ok(memberships)
    }

    async fn rows_into_projects(
        &self,
        rows: Vec<ProjectRow>,
    ) -> Result<Vec<Project>, ProjectStoreError> {
        let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
        let mut memberships = self.get_memberships(&ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let employee_ids =
                    memberships.remove(&row.id).unwrap_or_default();
                row.into_domain(employee_ids)
            })
            .collect())
    }
}

#[async_trait::async_trait]
impl ProjectStore for PostgresProjectStore {
    #[tracing::instrument(name = "Adding project to PostgreSQL", skip_all)]
    async fn add_project(
        &mut self,
        project: &Project,
    ) -> Result<(), ProjectStoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?;

        sqlx::query(
            r#"
            INSERT INTO projects (id, title, customer_company_name,
                contractor_company_name, priority, start_date, end_date,
                leader_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(project.id().as_ref())
        .bind(project.title())
        .bind(project.customer_company_name())
        .bind(project.contractor_company_name())
        .bind(project.priority())
        .bind(project.start_date())
        .bind(project.end_date())
        .bind(project.leader_id().map(|id| *id.as_ref()))
        .execute(&mut *tx)
        .await
        .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?;

        for employee_id in project.employee_ids() {
            sqlx::query(
                r#"
                INSERT INTO project_employees (project_id, employee_id)
                VALUES ($1, $2)
                "#,
            )
            .bind(project.id().as_ref())
            .bind(employee_id.as_ref())
            .execute(&mut *tx)
            .await
            .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?;
        }

        tx.commit()
            .await
            .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?;
        Ok(())
    }

    #[tracing::instrument(name = "Getting project from PostgreSQL", skip_all)]
    async fn get_project(
        &self,
        project_id: &ProjectId,
    ) -> Result<Project, ProjectStoreError> {
        let row = sqlx::query_as::<_, ProjectRow>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1"
        ))
        .bind(project_id.as_ref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => ProjectStoreError::ProjectNotFound,
            e => ProjectStoreError::UnexpectedError(eyre!(e)),
        })?;

        let memberships = self.get_memberships(&[row.id]).await?;
        let employee_ids =
            memberships.into_values().next().unwrap_or_default();
        Ok(row.into_domain(employee_ids))
    }

    #[tracing::instrument(
        name = "Getting all projects from PostgreSQL",
        skip_all
    )]
    async fn get_all(&self) -> Result<Vec<Project>, ProjectStoreError> {
        self.get_by_filter(None, None).await
    }

    #[tracing::instrument(
        name = "Getting projects by filter from PostgreSQL",
        skip_all
    )]
    async fn get_by_filter(
        &self,
        page: Option<&PageQuery>,
        filter: Option<&ProjectFilter>,
    ) -> Result<Vec<Project>, ProjectStoreError> {
        let mut query = QueryBuilder::new(format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE TRUE"
        ));

        if let Some(filter) = filter {
            if let Some(search_text) = &filter.search_text {
                if !search_text.trim().is_empty() {
                    let pattern =
                        format!("%{}%", search_text.trim().to_lowercase());
                    query
                        .push(" AND (LOWER(title) LIKE ")
                        .push_bind(pattern.clone())
                        .push(" OR LOWER(customer_company_name) LIKE ")
                        .push_bind(pattern.clone())
                        .push(" OR LOWER(contractor_company_name) LIKE ")
                        .push_bind(pattern)
                        .push(")");
                }
            }
            if let Some(from) = filter.start_date_from {
                query.push(" AND start_date >= ").push_bind(from);
            }
            if let Some(to) = filter.start_date_to {
                query.push(" AND start_date <= ").push_bind(to);
            }
            if let Some(from) = filter.priority_from {
                query.push(" AND priority >= ").push_bind(from);
            }
            if let Some(to) = filter.priority_to {
                query.push(" AND priority <= ").push_bind(to);
            }
        }

        query.push(order_by_clause(filter));

        if let Some(page) = page {
            // Widen before multiplying; both factors are caller-supplied.
            let offset = i64::from(page.page_num.saturating_sub(1))
                * i64::from(page.page_size);
            query
                .push(" LIMIT ")
                .push_bind(i64::from(page.page_size))
                .push(" OFFSET ")
                .push_bind(offset);
        }

        let rows = query
            .build_query_as::<ProjectRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?;

        self.rows_into_projects(rows).await
    }

    #[tracing::instrument(name = "Counting projects in PostgreSQL", skip_all)]
    async fn count(&self) -> Result<i64, ProjectStoreError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM projects")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))
    }

    /// Buffered-delta reconciliation: scalar fields, link removals and link
    /// additions are applied in one transaction; the aggregate's buffers
    /// are drained only after the commit succeeds.
    #[tracing::instrument(name = "Saving project to PostgreSQL", skip_all)]
    async fn save_project(
        &mut self,
        project: &mut Project,
    ) -> Result<(), ProjectStoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?;

        let result = sqlx::query(
            r#"
            UPDATE projects
            SET title = $2, customer_company_name = $3,
                contractor_company_name = $4, priority = $5,
                start_date = $6, end_date = $7, leader_id = $8
            WHERE id = $1
            "#,
        )
        .bind(project.id().as_ref())
        .bind(project.title())
        .bind(project.customer_company_name())
        .bind(project.contractor_company_name())
        .bind(project.priority())
        .bind(project.start_date())
        .bind(project.end_date())
        .bind(project.leader_id().map(|id| *id.as_ref()))
        .execute(&mut *tx)
        .await
        .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?;

        if result.rows_affected() == 0 {
            return Err(ProjectStoreError::ProjectNotFound);
        }

        if project.has_employee_changes() {
            let to_remove: Vec<Uuid> = project
                .employees_to_remove()
                .iter()
                .map(|id| *id.as_ref())
                .collect();
            if !to_remove.is_empty() {
                sqlx::query(
                    r#"
                    DELETE FROM project_employees
                    WHERE project_id = $1 AND employee_id = ANY($2)
                    "#,
                )
                .bind(project.id().as_ref())
                .bind(&to_remove)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    ProjectStoreError::UnexpectedError(eyre!(e))
                })?;
            }

            for employee_id in project.employees_to_add() {
                sqlx::query(
                    r#"
                    INSERT INTO project_employees (project_id, employee_id)
                    VALUES ($1, $2)
                    ON CONFLICT DO NOTHING
                    "#,
                )
                .bind(project.id().as_ref())
                .bind(employee_id.as_ref())
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    ProjectStoreError::UnexpectedError(eyre!(e))
                })?;
            }
        }

        tx.commit()
            .await
            .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?;

        project.clear_employee_buffers();
        Ok(())
    }

    #[tracing::instrument(
        name = "Deleting project from PostgreSQL",
        skip_all
    )]
    async fn delete_project(
        &mut self,
        project_id: &ProjectId,
    ) -> Result<(), ProjectStoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?;

        sqlx::query("DELETE FROM project_employees WHERE project_id = $1")
            .bind(project_id.as_ref())
            .execute(&mut *tx)
            .await
            .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?;

        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(project_id.as_ref())
            .execute(&mut *tx)
            .await
            .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?;

        if result.rows_affected() == 0 {
            return Err(ProjectStoreError::ProjectNotFound);
        }

        tx.commit()
            .await
            .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?;
        Ok(())
    }
}

fn order_by_clause(filter: Option<&ProjectFilter>) -> &'static str {
    let Some(filter) = filter else {
        return " ORDER BY priority DESC, start_date DESC";
    };

    match (filter.sort_by, filter.sort_descending) {
        (Some(SortBy::Title), false) => " ORDER BY title ASC",
        (Some(SortBy::Title), true) => " ORDER BY title DESC",
        (Some(SortBy::Priority), false) => " ORDER BY priority ASC",
        (Some(SortBy::Priority), true) => " ORDER BY priority DESC",
        (Some(SortBy::StartDate), false) => " ORDER BY start_date ASC",
        (Some(SortBy::StartDate), true) => " ORDER BY start_date DESC",
        (Some(SortBy::EndDate), false) => " ORDER BY end_date ASC",
        (Some(SortBy::EndDate), true) => " ORDER BY end_date DESC",
        (Some(SortBy::CustomerCompany), false) => {
            " ORDER BY customer_company_name ASC"
        }
        (Some(SortBy::CustomerCompany), true) => {
            " ORDER BY customer_company_name DESC"
        }
        (Some(SortBy::ContractorCompany), false) => {
            " ORDER BY contractor_company_name ASC"
        }
        (Some(SortBy::ContractorCompany), true) => {
            " ORDER BY contractor_company_name DESC"
        }
        (None, _) => " ORDER BY priority DESC, start_date DESC",
    }
}
