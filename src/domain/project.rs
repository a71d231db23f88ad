use std::collections::HashSet;

use chrono::NaiveDate;

use super::{EmployeeId, ProjectError, ProjectId, ValidationError};

/// Project aggregate. All invariants are enforced in-memory: the leader, if
/// set, is always a member; membership edits since the last persistence
/// flush are tracked in the `to_add`/`to_remove` buffers, drained by the
/// store after a confirmed write.
///
/// Fields are private so the aggregate cannot be driven into an
/// inconsistent state from outside.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    id: ProjectId,
    title: String,
    customer_company_name: String,
    contractor_company_name: String,
    priority: i32,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    leader_id: Option<EmployeeId>,
    employee_ids: HashSet<EmployeeId>,
    to_add: Vec<EmployeeId>,
    to_remove: Vec<EmployeeId>,
}

/// Partial update applied by `Project::apply_patch`. Absent fields keep
/// their current values. `remove_leader` and `leader_id` are mutually
/// exclusive; `remove_leader` wins when both are supplied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectPatch {
    pub title: Option<String>,
    pub customer_company_name: Option<String>,
    pub contractor_company_name: Option<String>,
    pub priority: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub remove_leader: Option<bool>,
    pub leader_id: Option<EmployeeId>,
}

impl Project {
    /// Validating factory. Mints a new identity. Supplied employee ids seed
    /// the membership set directly, without buffer entries; a supplied
    /// leader joins the seed as well.
    pub fn create(
        title: &str,
        customer_company_name: &str,
        contractor_company_name: &str,
        priority: i32,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
        leader_id: Option<EmployeeId>,
        employee_ids: Option<HashSet<EmployeeId>>,
    ) -> Result<Self, ValidationError> {
        let title = parse_required(title, "Title")?;
        let customer_company_name =
            parse_required(customer_company_name, "CustomerCompanyName")?;
        let contractor_company_name =
            parse_required(contractor_company_name, "ContractorCompanyName")?;
        validate_dates(start_date, end_date)?;

        let mut employee_ids = employee_ids.unwrap_or_default();
        if let Some(leader_id) = leader_id {
            employee_ids.insert(leader_id);
        }

        Ok(Self {
            id: ProjectId::default(),
            title,
            customer_company_name,
            contractor_company_name,
            priority,
            start_date,
            end_date,
            leader_id,
            employee_ids,
            to_add: Vec::new(),
            to_remove: Vec::new(),
        })
    }

    /// Trusted storage round-trip; no validation, empty buffers.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstruct(
        id: ProjectId,
        title: String,
        customer_company_name: String,
        contractor_company_name: String,
        priority: i32,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
        leader_id: Option<EmployeeId>,
        employee_ids: HashSet<EmployeeId>,
    ) -> Self {
        Self {
            id,
            title,
            customer_company_name,
            contractor_company_name,
            priority,
            start_date,
            end_date,
            leader_id,
            employee_ids,
            to_add: Vec::new(),
            to_remove: Vec::new(),
        }
    }

    pub fn id(&self) -> ProjectId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn customer_company_name(&self) -> &str {
        &self.customer_company_name
    }

    pub fn contractor_company_name(&self) -> &str {
        &self.contractor_company_name
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    pub fn leader_id(&self) -> Option<EmployeeId> {
        self.leader_id
    }

    pub fn employee_ids(&self) -> &HashSet<EmployeeId> {
        &self.employee_ids
    }

    pub fn employees_to_add(&self) -> &[EmployeeId] {
        &self.to_add
    }

    pub fn employees_to_remove(&self) -> &[EmployeeId] {
        &self.to_remove
    }

    pub fn has_employee_changes(&self) -> bool {
        !self.to_add.is_empty() || !self.to_remove.is_empty()
    }

    /// Adds an employee to the membership set and records the pending
    /// change. A pending removal of the same id is cancelled first
    /// (last-write-wins per id within a session).
    pub fn assign_employee(
        &mut self,
        employee_id: EmployeeId,
    ) -> Result<(), ProjectError> {
        if self.employee_ids.contains(&employee_id) {
            return Err(ProjectError::AlreadyAssigned(*employee_id.as_ref()));
        }

        self.employee_ids.insert(employee_id);
        self.to_remove.retain(|id| id != &employee_id);
        self.to_add.push(employee_id);
        Ok(())
    }

    /// Removes an employee from the membership set and records the pending
    /// change. Removing the current leader clears leadership.
    pub fn remove_employee(
        &mut self,
        employee_id: EmployeeId,
    ) -> Result<(), ProjectError> {
        if !self.employee_ids.remove(&employee_id) {
            return Err(ProjectError::NotAssigned(*employee_id.as_ref()));
        }

        self.to_add.retain(|id| id != &employee_id);
        self.to_remove.push(employee_id);

        if self.leader_id == Some(employee_id) {
            self.leader_id = None;
        }
        Ok(())
    }

    /// Makes `leader_id` the project leader, implicitly assigning them as a
    /// member first when necessary.
    pub fn assign_leader(
        &mut self,
        leader_id: EmployeeId,
    ) -> Result<(), ProjectError> {
        if self.leader_id == Some(leader_id) {
            return Err(ProjectError::AlreadyLeader(*leader_id.as_ref()));
        }

        if !self.employee_ids.contains(&leader_id) {
            self.assign_employee(leader_id)?;
        }

        self.leader_id = Some(leader_id);
        Ok(())
    }

    pub fn update_basic_info(
        &mut self,
        title: &str,
        customer_company_name: &str,
        contractor_company_name: &str,
        priority: i32,
    ) -> Result<(), ValidationError> {
        let title = parse_required(title, "Title")?;
        let customer_company_name =
            parse_required(customer_company_name, "CustomerCompanyName")?;
        let contractor_company_name =
            parse_required(contractor_company_name, "ContractorCompanyName")?;

        self.title = title;
        self.customer_company_name = customer_company_name;
        self.contractor_company_name = contractor_company_name;
        self.priority = priority;
        Ok(())
    }

    pub fn update_dates(
        &mut self,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
    ) -> Result<(), ValidationError> {
        validate_dates(start_date, end_date)?;

        self.start_date = start_date;
        self.end_date = end_date;
        Ok(())
    }

    /// Applies the fields present in `patch` in a fixed order: basic info,
    /// then dates, then leader removal or assignment. Each step
    /// short-circuits the remaining ones on failure; steps already applied
    /// are NOT rolled back. Callers observe the partial state and must not
    /// persist it when the call reports failure.
    pub fn apply_patch(
        &mut self,
        patch: &ProjectPatch,
    ) -> Result<(), ProjectError> {
        if patch.title.is_some()
            || patch.customer_company_name.is_some()
            || patch.contractor_company_name.is_some()
            || patch.priority.is_some()
        {
            let title =
                patch.title.clone().unwrap_or_else(|| self.title.clone());
            let customer = patch
                .customer_company_name
                .clone()
                .unwrap_or_else(|| self.customer_company_name.clone());
            let contractor = patch
                .contractor_company_name
                .clone()
                .unwrap_or_else(|| self.contractor_company_name.clone());
            let priority = patch.priority.unwrap_or(self.priority);

            self.update_basic_info(&title, &customer, &contractor, priority)?;
        }

        if patch.start_date.is_some() || patch.end_date.is_some() {
            let start_date = patch.start_date.unwrap_or(self.start_date);
            let end_date = patch.end_date.or(self.end_date);

            self.update_dates(start_date, end_date)?;
        }

        if patch.remove_leader == Some(true) {
            self.leader_id = None;
        } else if let Some(leader_id) = patch.leader_id {
            self.assign_leader(leader_id)?;
        }

        Ok(())
    }

    /// Drains the pending-change buffers. Called by the store only after a
    /// confirmed successful write.
    pub fn clear_employee_buffers(&mut self) {
        self.to_add.clear();
        self.to_remove.clear();
    }
}

fn parse_required(
    value: &str,
    field: &str,
) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(format!("{field} cannot be empty")));
    }
    Ok(trimmed.to_owned())
}

fn validate_dates(
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
) -> Result<(), ValidationError> {
    match end_date {
        Some(end) if start_date > end => Err(ValidationError::new(
            "StartDate must be before EndDate".to_string(),
        )),
        _ => Ok(()),
    }
}
