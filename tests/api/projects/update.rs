use crate::helpers::{
    add_new_employee, add_new_project, get_json_response_body, TestApp,
};
use serde_json::json;
use test_context::test_context;

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_200_and_report_changes(app: &mut TestApp) {
    let project_id = add_new_project(app, "Site Migration").await;

    let response = app
        .patch_projects_update(&json!({
            "projectId": project_id,
            "title": "Renamed",
            "priority": 7
        }))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let body = get_json_response_body(response).await;
    assert_eq!(body.get("id").unwrap(), project_id.as_str());

    let changes = body.get("changes").unwrap().as_array().unwrap();
    assert_eq!(changes.len(), 2);
    assert_eq!(changes[0].get("property").unwrap(), "title");
    assert_eq!(changes[0].get("oldValue").unwrap(), "Site Migration");
    assert_eq!(changes[0].get("newValue").unwrap(), "Renamed");
    assert_eq!(changes[1].get("property").unwrap(), "priority");
    assert_eq!(changes[1].get("newValue").unwrap(), 7);

    let response = app.get_project(&project_id).await;
    let body = get_json_response_body(response).await;
    assert_eq!(body.get("title").unwrap(), "Renamed");
    assert_eq!(body.get("priority").unwrap(), 7);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_report_no_changes_for_empty_patch(app: &mut TestApp) {
    let project_id = add_new_project(app, "Site Migration").await;

    let response = app
        .patch_projects_update(&json!({
            "projectId": project_id
        }))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let body = get_json_response_body(response).await;
    assert_eq!(body.get("changes").unwrap(), &json!([]));
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_assign_and_remove_leader(app: &mut TestApp) {
    let project_id = add_new_project(app, "Site Migration").await;
    let leader_id = add_new_employee(app, "Grace", "Hopper").await;

    let response = app
        .patch_projects_update(&json!({
            "projectId": project_id,
            "leaderId": leader_id
        }))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let body = get_json_response_body(response).await;
    let changes = body.get("changes").unwrap().as_array().unwrap();
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].get("property").unwrap(), "leaderId");
    assert_eq!(changes[0].get("newValue").unwrap(), leader_id.as_str());

    let response = app
        .patch_projects_update(&json!({
            "projectId": project_id,
            "removeLeader": true
        }))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let response = app.get_project_employees(&project_id).await;
    let body = get_json_response_body(response).await;
    assert!(body.get("leaderId").unwrap().is_null());
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_400_and_leave_project_untouched_on_invalid_dates(
    app: &mut TestApp,
) {
    let project_id = add_new_project(app, "Site Migration").await;

    let response = app
        .patch_projects_update(&json!({
            "projectId": project_id,
            "title": "Renamed",
            "startDate": "2024-09-01",
            "endDate": "2024-03-01"
        }))
        .await;
    assert_eq!(response.status().as_u16(), 400);

    let response = app.get_project(&project_id).await;
    let body = get_json_response_body(response).await;
    assert_eq!(
        body.get("title").unwrap(),
        "Site Migration",
        "a rejected patch must not be persisted"
    );
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_404_for_unknown_project_or_leader(app: &mut TestApp) {
    let response = app
        .patch_projects_update(&json!({
            "projectId": uuid::Uuid::new_v4().to_string(),
            "title": "Renamed"
        }))
        .await;
    assert_eq!(response.status().as_u16(), 404);

    let project_id = add_new_project(app, "Site Migration").await;
    let response = app
        .patch_projects_update(&json!({
            "projectId": project_id,
            "leaderId": uuid::Uuid::new_v4().to_string()
        }))
        .await;
    assert_eq!(response.status().as_u16(), 404);
}
