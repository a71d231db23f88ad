use crate::helpers::{add_new_employee, get_random_email, TestApp};
use serde_json::json;
use test_context::test_context;

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_200_and_remove_the_employee(app: &mut TestApp) {
    let employee_id = add_new_employee(app, "Grace", "Hopper").await;

    let response = app.delete_employee(&employee_id).await;
    assert_eq!(response.status().as_u16(), 200);

    let response = app.get_employee(&employee_id).await;
    assert_eq!(response.status().as_u16(), 404);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_free_the_email_for_reuse(app: &mut TestApp) {
    let email = get_random_email();
    let request = json!({
        "firstname": "Grace",
        "lastname": "Hopper",
        "email": email
    });

    let response = app.post_employees_new(&request).await;
    assert_eq!(response.status().as_u16(), 201);
    let body: serde_json::Value =
        response.json().await.expect("Failed to parse JSON");
    let employee_id = body.get("id").unwrap().as_str().unwrap().to_owned();

    assert_eq!(app.delete_employee(&employee_id).await.status().as_u16(), 200);
    assert_eq!(app.post_employees_new(&request).await.status().as_u16(), 201);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_404_for_unknown_employee(app: &mut TestApp) {
    let response =
        app.delete_employee(&uuid::Uuid::new_v4().to_string()).await;
    assert_eq!(response.status().as_u16(), 404);
}
