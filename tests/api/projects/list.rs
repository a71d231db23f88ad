use crate::helpers::{get_json_response_body, TestApp};
use serde_json::json;
use test_context::test_context;

async fn seed_project(
    app: &mut TestApp,
    title: &str,
    priority: i32,
    start_date: &str,
) {
    let response = app
        .post_projects_new(&json!({
            "title": title,
            "customerCompanyName": "Acme Ltd",
            "contractorCompanyName": "Contoso Ltd",
            "priority": priority,
            "startDate": start_date
        }))
        .await;
    assert_eq!(
        response.status().as_u16(),
        201,
        "Failed to seed project: {title}"
    );
}

fn titles(body: &serde_json::Value) -> Vec<String> {
    body.get("items")
        .expect("No items in response")
        .as_array()
        .expect("items should be an array")
        .iter()
        .map(|item| {
            item.get("title").unwrap().as_str().unwrap().to_owned()
        })
        .collect()
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_204_when_no_projects_exist(app: &mut TestApp) {
    let response = app.get_projects_list(&[]).await;
    assert_eq!(response.status().as_u16(), 204);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_all_projects_sorted_by_default_order(
    app: &mut TestApp,
) {
    seed_project(app, "Low priority", 1, "2024-01-01").await;
    seed_project(app, "High priority", 9, "2024-01-01").await;
    seed_project(app, "Mid priority", 5, "2024-01-01").await;

    let response = app.get_projects_list(&[]).await;
    assert_eq!(response.status().as_u16(), 200);

    let body = get_json_response_body(response).await;
    assert_eq!(body.get("total").unwrap(), 3);
    assert_eq!(
        titles(&body),
        vec!["High priority", "Mid priority", "Low priority"]
    );
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_filter_by_search_text(app: &mut TestApp) {
    seed_project(app, "Warehouse migration", 1, "2024-01-01").await;
    seed_project(app, "Mobile app", 1, "2024-01-01").await;

    let response = app.get_projects_list(&[("searchText", "warehouse")]).await;
    assert_eq!(response.status().as_u16(), 200);

    let body = get_json_response_body(response).await;
    assert_eq!(titles(&body), vec!["Warehouse migration"]);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_filter_by_priority_and_date_ranges(app: &mut TestApp) {
    seed_project(app, "Old and minor", 1, "2023-01-01").await;
    seed_project(app, "Recent and major", 8, "2024-06-01").await;
    seed_project(app, "Recent and minor", 2, "2024-06-01").await;

    let response = app
        .get_projects_list(&[
            ("priorityFrom", "5"),
            ("startDateFrom", "2024-01-01"),
        ])
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let body = get_json_response_body(response).await;
    assert_eq!(titles(&body), vec!["Recent and major"]);

    let response = app.get_projects_list(&[("priorityTo", "3")]).await;
    let body = get_json_response_body(response).await;
    assert_eq!(
        titles(&body).len(),
        2,
        "priorityTo should keep both minor projects"
    );
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_sort_by_requested_field(app: &mut TestApp) {
    seed_project(app, "Banana", 1, "2024-01-01").await;
    seed_project(app, "Apple", 2, "2024-01-01").await;
    seed_project(app, "Cherry", 3, "2024-01-01").await;

    let response = app.get_projects_list(&[("sortBy", "title")]).await;
    let body = get_json_response_body(response).await;
    assert_eq!(titles(&body), vec!["Apple", "Banana", "Cherry"]);

    let response = app
        .get_projects_list(&[("sortBy", "title"), ("sortDescending", "true")])
        .await;
    let body = get_json_response_body(response).await;
    assert_eq!(titles(&body), vec!["Cherry", "Banana", "Apple"]);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_page_results(app: &mut TestApp) {
    for n in 1..=5 {
        seed_project(app, &format!("Project {n}"), n, "2024-01-01").await;
    }

    let response = app
        .get_projects_list(&[
            ("pageNum", "2"),
            ("pageSize", "2"),
            ("sortBy", "title"),
        ])
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let body = get_json_response_body(response).await;
    assert_eq!(titles(&body), vec!["Project 3", "Project 4"]);
    assert_eq!(body.get("total").unwrap(), 5);
    assert_eq!(body.get("totalPages").unwrap(), 3);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_204_when_page_is_past_the_end(app: &mut TestApp) {
    seed_project(app, "Only project", 1, "2024-01-01").await;

    let response = app
        .get_projects_list(&[("pageNum", "4"), ("pageSize", "10")])
        .await;
    assert_eq!(response.status().as_u16(), 204);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_tolerate_extreme_page_numbers(app: &mut TestApp) {
    seed_project(app, "Only project", 1, "2024-01-01").await;

    let response = app
        .get_projects_list(&[("pageNum", "4294967295"), ("pageSize", "2")])
        .await;
    assert_eq!(response.status().as_u16(), 204);
}
