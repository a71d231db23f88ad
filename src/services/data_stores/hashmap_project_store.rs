use std::collections::HashMap;

use crate::domain::{
    PageQuery, Project, ProjectFilter, ProjectId, ProjectStore,
    ProjectStoreError, SortBy,
};

#[derive(Default)]
pub struct HashmapProjectStore {
    projects: HashMap<ProjectId, Project>,
}

/// Clones `project` the way storage would hand it back: same fields and
/// membership, empty buffers.
fn persisted_copy(project: &Project) -> Project {
    Project::reconstruct(
        project.id(),
        project.title().to_owned(),
        project.customer_company_name().to_owned(),
        project.contractor_company_name().to_owned(),
        project.priority(),
        project.start_date(),
        project.end_date(),
        project.leader_id(),
        project.employee_ids().clone(),
    )
}

#[async_trait::async_trait]
impl ProjectStore for HashmapProjectStore {
    async fn add_project(
        &mut self,
        project: &Project,
    ) -> Result<(), ProjectStoreError> {
        self.projects.insert(project.id(), persisted_copy(project));
        Ok(())
    }

    async fn get_project(
        &self,
        project_id: &ProjectId,
    ) -> Result<Project, ProjectStoreError> {
        match self.projects.get(project_id) {
            Some(project) => Ok(project.clone()),
            None => Err(ProjectStoreError::ProjectNotFound),
        }
    }

    async fn get_all(&self) -> Result<Vec<Project>, ProjectStoreError> {
        self.get_by_filter(None, None).await
    }

    async fn get_by_filter(
        &self,
        page: Option<&PageQuery>,
        filter: Option<&ProjectFilter>,
    ) -> Result<Vec<Project>, ProjectStoreError> {
        let mut projects: Vec<Project> =
            self.projects.values().cloned().collect();

        if let Some(filter) = filter {
            if let Some(search_text) = &filter.search_text {
                let search_text = search_text.trim().to_lowercase();
                projects.retain(|p| {
                    p.title().to_lowercase().contains(&search_text)
                        || p.customer_company_name()
                            .to_lowercase()
                            .contains(&search_text)
                        || p.contractor_company_name()
                            .to_lowercase()
                            .contains(&search_text)
                });
            }
            if let Some(from) = filter.start_date_from {
                projects.retain(|p| p.start_date() >= from);
            }
            if let Some(to) = filter.start_date_to {
                projects.retain(|p| p.start_date() <= to);
            }
            if let Some(from) = filter.priority_from {
                projects.retain(|p| p.priority() >= from);
            }
            if let Some(to) = filter.priority_to {
                projects.retain(|p| p.priority() <= to);
            }
        }

        sort_projects(&mut projects, filter);

        if let Some(page) = page {
            // Widen before multiplying; both factors are caller-supplied.
            let skip = u64::from(page.page_num.saturating_sub(1))
                * u64::from(page.page_size);
            projects = projects
                .into_iter()
                .skip(usize::try_from(skip).unwrap_or(usize::MAX))
                .take(page.page_size as usize)
                .collect();
        }

        Ok(projects)
    }

    async fn count(&self) -> Result<i64, ProjectStoreError> {
        Ok(self.projects.len() as i64)
    }

    async fn save_project(
        &mut self,
        project: &mut Project,
    ) -> Result<(), ProjectStoreError> {
        let stored = self
            .projects
            .get(&project.id())
            .ok_or(ProjectStoreError::ProjectNotFound)?;

        // Reconcile the stored membership against the buffered delta;
        // scalar fields come from the aggregate as-is.
        let mut employee_ids = stored.employee_ids().clone();
        for employee_id in project.employees_to_remove() {
            employee_ids.remove(employee_id);
        }
        for employee_id in project.employees_to_add() {
            employee_ids.insert(*employee_id);
        }

        let reconciled = Project::reconstruct(
            project.id(),
            project.title().to_owned(),
            project.customer_company_name().to_owned(),
            project.contractor_company_name().to_owned(),
            project.priority(),
            project.start_date(),
            project.end_date(),
            project.leader_id(),
            employee_ids,
        );
        self.projects.insert(project.id(), reconciled);

        project.clear_employee_buffers();
        Ok(())
    }

    async fn delete_project(
        &mut self,
        project_id: &ProjectId,
    ) -> Result<(), ProjectStoreError> {
        match self.projects.remove(project_id) {
            Some(_) => Ok(()),
            None => Err(ProjectStoreError::ProjectNotFound),
        }
    }
}

fn sort_projects(projects: &mut [Project], filter: Option<&ProjectFilter>) {
    let (sort_by, descending) = match filter {
        Some(filter) => (filter.sort_by, filter.sort_descending),
        None => (None, false),
    };

    match sort_by {
        Some(SortBy::Title) => {
            projects.sort_by(|a, b| a.title().cmp(b.title()))
        }
        Some(SortBy::Priority) => {
            projects.sort_by_key(|p| p.priority());
        }
        Some(SortBy::StartDate) => {
            projects.sort_by_key(|p| p.start_date());
        }
        Some(SortBy::EndDate) => {
            projects.sort_by_key(|p| p.end_date());
        }
        Some(SortBy::CustomerCompany) => projects.sort_by(|a, b| {
            a.customer_company_name().cmp(b.customer_company_name())
        }),
        Some(SortBy::ContractorCompany) => projects.sort_by(|a, b| {
            a.contractor_company_name().cmp(b.contractor_company_name())
        }),
        None => {
            projects.sort_by(|a, b| {
                b.priority()
                    .cmp(&a.priority())
                    .then(b.start_date().cmp(&a.start_date()))
            });
            return;
        }
    }

    if descending {
        projects.reverse();
    }
}
