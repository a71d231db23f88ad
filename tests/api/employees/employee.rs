use crate::helpers::{get_json_response_body, get_random_email, TestApp};
use serde_json::json;
use test_context::test_context;

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_200_and_employee_details(app: &mut TestApp) {
    let email = get_random_email();
    let response = app
        .post_employees_new(&json!({
            "firstname": "Ivan",
            "lastname": "Petrov",
            "patronymic": "Sergeevich",
            "email": email
        }))
        .await;
    assert_eq!(response.status().as_u16(), 201);
    let body = get_json_response_body(response).await;
    let employee_id = body.get("id").unwrap().as_str().unwrap().to_owned();

    let schema = json!({
      "$schema": "http://json-schema.org/draft-04/schema#",
      "description": "",
      "type": "object",
      "properties": {
        "id": { "type": "string" },
        "firstname": { "type": "string" },
        "lastname": { "type": "string" },
        "patronymic": { "type": ["string", "null"] },
        "email": { "type": "string" },
        "projectIds": {
          "type": "array",
          "items": { "type": "string" }
        }
      },
      "required": [
        "id",
        "firstname",
        "lastname",
        "email",
        "projectIds"
      ]
    });

    let response = app.get_employee(&employee_id).await;
    assert_eq!(response.status().as_u16(), 200);

    let body = get_json_response_body(response).await;
    assert!(
        jsonschema::is_valid(&schema, &body),
        "response does not match schema"
    );
    assert_eq!(body.get("id").unwrap(), employee_id.as_str());
    assert_eq!(body.get("firstname").unwrap(), "Ivan");
    assert_eq!(body.get("lastname").unwrap(), "Petrov");
    assert_eq!(body.get("patronymic").unwrap(), "Sergeevich");
    assert_eq!(body.get("email").unwrap(), email.as_str());
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_400_for_invalid_id(app: &mut TestApp) {
    let response = app.get_employee("not-a-uuid").await;
    assert_eq!(response.status().as_u16(), 400);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_404_for_unknown_id(app: &mut TestApp) {
    let response = app.get_employee(&uuid::Uuid::new_v4().to_string()).await;
    assert_eq!(response.status().as_u16(), 404);
}
