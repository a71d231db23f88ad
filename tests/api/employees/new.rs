use crate::helpers::{get_json_response_body, get_random_email, TestApp};
use projects_manager::ErrorResponse;
use serde_json::json;
use test_context::test_context;

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_201_for_valid_requests(app: &mut TestApp) {
    let schema = json!({
      "$schema": "http://json-schema.org/draft-04/schema#",
      "description": "",
      "type": "object",
      "properties": {
        "id": {
          "type": "string",
          "minLength": 36,
          "maxLength": 36
        }
      },
      "required": [
        "id"
      ]
    });

    let test_cases = [
        json!({
            "firstname": "Grace",
            "lastname": "Hopper",
            "email": get_random_email()
        }),
        json!({
            "firstname": "Ivan",
            "lastname": "Petrov",
            "patronymic": "Sergeevich",
            "email": get_random_email()
        }),
    ];

    for test_case in test_cases.iter() {
        let response = app.post_employees_new(test_case).await;
        assert_eq!(
            response.status().as_u16(),
            201,
            "Failed for input: {:?}",
            test_case
        );

        let body = get_json_response_body(response).await;
        assert!(
            jsonschema::is_valid(&schema, &body),
            "response does not match schema"
        );
    }
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_409_for_duplicate_email(app: &mut TestApp) {
    let email = get_random_email();
    let request = json!({
        "firstname": "Grace",
        "lastname": "Hopper",
        "email": email
    });

    assert_eq!(app.post_employees_new(&request).await.status().as_u16(), 201);

    let response = app.post_employees_new(&request).await;
    assert_eq!(response.status().as_u16(), 409);
    assert_eq!(
        response
            .json::<ErrorResponse>()
            .await
            .expect("Could not deserialise response body to ErrorResponse")
            .error,
        format!("Employee with this email already exists: {email}")
    );
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_400_if_invalid_input(app: &mut TestApp) {
    let test_cases = [
        json!({
            "firstname": "",
            "lastname": "Hopper",
            "email": get_random_email()
        }),
        json!({
            "firstname": "Grace",
            "lastname": "   ",
            "email": get_random_email()
        }),
        json!({
            "firstname": "Grace",
            "lastname": "Hopper",
            "email": "not-an-email"
        }),
    ];

    for test_case in test_cases.iter() {
        let response = app.post_employees_new(test_case).await;
        assert_eq!(
            response.status().as_u16(),
            400,
            "Should fail with HTTP400 for input: {}",
            test_case
        );
    }
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_422_if_malformed_request(app: &mut TestApp) {
    let test_cases = [
        json!({
            "firstname": "Grace",
            "email": get_random_email()
        }),
        json!({
            "firstname": "Grace",
            "lastname": 42,
            "email": get_random_email()
        }),
    ];

    for test_case in test_cases.iter() {
        let response = app.post_employees_new(test_case).await;
        assert_eq!(
            response.status().as_u16(),
            422,
            "Failed for input: {:?}",
            test_case
        );
    }
}
