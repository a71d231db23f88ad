use projects_manager::{
    app_state::{AppState, EmployeeStoreType, ProjectStoreType},
    services::data_stores::{HashmapEmployeeStore, HashmapProjectStore},
    utils::constants::test,
    Application,
};
use reqwest::Response;
use serde_json::Value;
use std::sync::Arc;
use test_context::AsyncTestContext;
use tokio::sync::RwLock;
use uuid::Uuid;

pub struct TestApp {
    pub address: String,
    pub http_client: reqwest::Client,
    pub project_store: ProjectStoreType,
    pub employee_store: EmployeeStoreType,
}

impl TestApp {
    pub async fn new() -> Self {
        let project_store =
            Arc::new(RwLock::new(HashmapProjectStore::default()));
        let employee_store =
            Arc::new(RwLock::new(HashmapEmployeeStore::default()));

        let app_state =
            AppState::new(project_store.clone(), employee_store.clone());

        let app = Application::build(app_state, test::APP_ADDRESS)
            .await
            .expect("Failed to build app");
        let address = format!("http://{}", app.address.clone());

        #[allow(clippy::let_underscore_future)]
        let _ = tokio::spawn(app.run());

        let http_client = reqwest::Client::new();

        Self {
            address,
            http_client,
            project_store,
            employee_store,
        }
    }

    pub async fn post_projects_new<Body>(
        &self,
        body: &Body,
    ) -> reqwest::Response
    where
        Body: serde::Serialize,
    {
        self.http_client
            .post(format!("{}/projects/new", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_projects_list(
        &self,
        query: &[(&str, &str)],
    ) -> reqwest::Response {
        self.http_client
            .get(format!("{}/projects/list", &self.address))
            .query(query)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_project(&self, project_id: &str) -> reqwest::Response {
        self.http_client
            .get(format!("{}/projects/project", &self.address))
            .query(&[("projectId", project_id)])
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn delete_project(&self, project_id: &str) -> reqwest::Response {
        self.http_client
            .delete(format!("{}/projects/project", &self.address))
            .query(&[("projectId", project_id)])
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_project_employees(
        &self,
        project_id: &str,
    ) -> reqwest::Response {
        self.http_client
            .get(format!("{}/projects/employees", &self.address))
            .query(&[("projectId", project_id)])
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn patch_projects_update<Body>(
        &self,
        body: &Body,
    ) -> reqwest::Response
    where
        Body: serde::Serialize,
    {
        self.http_client
            .patch(format!("{}/projects/update", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn patch_projects_leader<Body>(
        &self,
        body: &Body,
    ) -> reqwest::Response
    where
        Body: serde::Serialize,
    {
        self.http_client
            .patch(format!("{}/projects/leader", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn patch_assign_employees<Body>(
        &self,
        body: &Body,
    ) -> reqwest::Response
    where
        Body: serde::Serialize,
    {
        self.http_client
            .patch(format!("{}/projects/assign-employees", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_employees_new<Body>(
        &self,
        body: &Body,
    ) -> reqwest::Response
    where
        Body: serde::Serialize,
    {
        self.http_client
            .post(format!("{}/employees/new", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_employees_list(
        &self,
        query: &[(&str, &str)],
    ) -> reqwest::Response {
        self.http_client
            .get(format!("{}/employees/list", &self.address))
            .query(query)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_employee(&self, employee_id: &str) -> reqwest::Response {
        self.http_client
            .get(format!("{}/employees/employee", &self.address))
            .query(&[("employeeId", employee_id)])
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn put_employees_update<Body>(
        &self,
        body: &Body,
    ) -> reqwest::Response
    where
        Body: serde::Serialize,
    {
        self.http_client
            .put(format!("{}/employees/update", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn delete_employee(
        &self,
        employee_id: &str,
    ) -> reqwest::Response {
        self.http_client
            .delete(format!("{}/employees/employee", &self.address))
            .query(&[("employeeId", employee_id)])
            .send()
            .await
            .expect("Failed to execute request")
    }
}

impl AsyncTestContext for TestApp {
    async fn setup() -> TestApp {
        TestApp::new().await
    }

    async fn teardown(self) {}
}

pub fn get_random_email() -> String {
    format!("{}@example.com", Uuid::new_v4())
}

pub async fn get_json_response_body(response: Response) -> Value {
    let body: Value = response
        .json()
        .await
        .expect("failed to parse response body JSON");
    body
}

pub async fn add_new_employee(
    app: &mut TestApp,
    firstname: &str,
    lastname: &str,
) -> String {
    let response = app
        .post_employees_new(&serde_json::json!({
            "firstname": firstname,
            "lastname": lastname,
            "email": get_random_email()
        }))
        .await;

    assert_eq!(
        response.status().as_u16(),
        201,
        "Failed to add new employee: {firstname} {lastname}"
    );

    let body = get_json_response_body(response).await;
    body.get("id")
        .expect("No ID in response")
        .as_str()
        .expect("Failed to create str from id field")
        .to_owned()
}

pub async fn add_new_project(app: &mut TestApp, title: &str) -> String {
    let response = app
        .post_projects_new(&serde_json::json!({
            "title": title,
            "customerCompanyName": "Acme Ltd",
            "contractorCompanyName": "Contoso Ltd",
            "priority": 3,
            "startDate": "2024-03-01"
        }))
        .await;

    assert_eq!(
        response.status().as_u16(),
        201,
        "Failed to add new project with title: {title}"
    );

    let body = get_json_response_body(response).await;
    body.get("id")
        .expect("No ID in response")
        .as_str()
        .expect("Failed to create str from id field")
        .to_owned()
}

pub async fn assign_employee(
    app: &mut TestApp,
    project_id: &str,
    employee_id: &str,
) {
    let response = app
        .patch_assign_employees(&serde_json::json!({
            "projectId": project_id,
            "employeesToAdd": [employee_id]
        }))
        .await;

    assert_eq!(
        response.status().as_u16(),
        200,
        "Failed to assign employee {employee_id} to project {project_id}"
    );
}
