mod common;

use chrono::Duration;
use chrono::Utc;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/users")
        .json(&json!({
            "display_name": "Ana",
            "email": "ana@x.com",
            "password": "s3cret!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status_code"], 201);
    assert_eq!(body["data"]["display_name"], "Ana");
    assert_eq!(body["data"]["email"], "ana@x.com");
    assert!(body["data"]["id"].is_string());
    assert!(body["data"]["created_at"].is_string());
    assert!(body["data"].get("password_hash").is_none());
    assert!(!body.to_string().contains("s3cret!"));
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::spawn().await;

    app.register("Ana", "ana@x.com", "s3cret!").await;

    let response = app
        .post("/api/users")
        .json(&json!({
            "display_name": "Bruno",
            "email": "ana@x.com",
            "password": "other-pass"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("already exists"));

    // The first credentials still work, the rejected ones do not
    app.login("ana@x.com", "s3cret!").await;
    let response = app
        .post("/api/auth/login")
        .json(&json!({ "email": "ana@x.com", "password": "other-pass" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_concurrent_registration_single_winner() {
    let app = TestApp::spawn().await;

    let requests = (0..8).map(|i| {
        app.post("/api/users")
            .json(&json!({
                "display_name": format!("User {}", i),
                "email": "race@x.com",
                "password": "pass_word!"
            }))
            .send()
    });

    let mut created = 0;
    let mut conflicts = 0;
    for handle in requests.map(tokio::spawn).collect::<Vec<_>>() {
        let response = handle.await.unwrap().expect("Failed to execute request");
        match response.status() {
            StatusCode::CREATED => created += 1,
            StatusCode::CONFLICT => conflicts += 1,
            other => panic!("unexpected status {}", other),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(conflicts, 7);
}

#[tokio::test]
async fn test_register_invalid_input() {
    let app = TestApp::spawn().await;

    for body in [
        json!({ "display_name": "  ", "email": "ana@x.com", "password": "s3cret!" }),
        json!({ "display_name": "Ana", "email": "not-an-email", "password": "s3cret!" }),
        json!({ "display_name": "Ana", "email": "ana@x.com", "password": "12345" }),
    ] {
        let response = app
            .post("/api/users")
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        assert!(body["data"]["message"].is_string());
    }
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::spawn().await;
    app.register("Ana", "ana@x.com", "s3cret!").await;

    let response = app
        .post("/api/auth/login")
        .json(&json!({ "email": "ana@x.com", "password": "s3cret!" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["token_type"], "Bearer");
    assert!(body["data"]["expires_at"]
        .as_str()
        .unwrap()
        .ends_with("-03:00"));

    let token = body["data"]["token"].as_str().unwrap();
    assert_eq!(token.split('.').count(), 3);
    assert_eq!(
        app.authenticator.validate_token(token).unwrap(),
        "ana@x.com"
    );
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::spawn().await;
    app.register("Ana", "ana@x.com", "s3cret!").await;

    let wrong_password = app
        .post("/api/auth/login")
        .json(&json!({ "email": "ana@x.com", "password": "wrong-pass" }))
        .send()
        .await
        .expect("Failed to execute request");
    let unknown_email = app
        .post("/api/auth/login")
        .json(&json!({ "email": "ghost@x.com", "password": "s3cret!" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);

    let wrong_password: serde_json::Value = wrong_password.json().await.unwrap();
    let unknown_email: serde_json::Value = unknown_email.json().await.unwrap();
    assert_eq!(wrong_password, unknown_email);
}

#[tokio::test]
async fn test_protected_route_requires_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/users")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status_code"], 401);
    assert!(body["data"]["message"].is_string());

    let response = app
        .get("/api/users")
        .header("Authorization", "Basic YW5hOnNlY3JldA==")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_rejects_invalid_tokens() {
    let app = TestApp::spawn().await;

    let expired = app
        .authenticator
        .issue_token_at("ana@x.com", Utc::now() - Duration::hours(3))
        .unwrap();

    let foreign = auth::TokenIssuer::new(
        &auth::SigningSecret::new("a-completely-different-secret").unwrap(),
    )
    .issue("ana@x.com")
    .unwrap();

    for token in ["garbage", expired.as_str(), foreign.as_str()] {
        let response = app
            .get_authenticated("/api/topics", token)
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}

#[tokio::test]
async fn test_get_identity() {
    let app = TestApp::spawn().await;
    let (id, token) = app.signed_in("Ana", "ana@x.com").await;

    let response = app
        .get_authenticated(&format!("/api/users/{}", id), &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["id"], id.as_str());
    assert_eq!(body["data"]["email"], "ana@x.com");

    let response = app
        .get_authenticated(&format!("/api/users/{}", uuid::Uuid::new_v4()), &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .get_authenticated("/api/users/not-a-uuid", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_identities_paginated() {
    let app = TestApp::spawn().await;
    app.register("Caio", "caio@x.com", "pass_word!").await;
    app.register("Bia", "bia@x.com", "pass_word!").await;
    let (_, token) = app.signed_in("Ana", "ana@x.com").await;

    let response = app
        .get_authenticated("/api/users?page=0&size=2", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    let names: Vec<_> = body["data"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["display_name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Ana", "Bia"]);
    assert_eq!(body["data"]["total_items"], 3);
    assert_eq!(body["data"]["total_pages"], 2);

    let response = app
        .get_authenticated("/api/users?page=1&size=2", &token)
        .send()
        .await
        .expect("Failed to execute request");
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["items"][0]["display_name"], "Caio");
}

#[tokio::test]
async fn test_update_identity() {
    let app = TestApp::spawn().await;
    let (id, token) = app.signed_in("Ana", "ana@x.com").await;

    let response = app
        .patch_authenticated(&format!("/api/users/{}", id), &token)
        .json(&json!({ "display_name": "Ana Maria" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["display_name"], "Ana Maria");
    assert_eq!(body["data"]["email"], "ana@x.com");

    // Blank name is ignored, new password takes effect
    let response = app
        .patch_authenticated(&format!("/api/users/{}", id), &token)
        .json(&json!({ "display_name": "   ", "password": "brand-new" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["display_name"], "Ana Maria");

    app.login("ana@x.com", "brand-new").await;
    let response = app
        .post("/api/auth/login")
        .json(&json!({ "email": "ana@x.com", "password": "pass_word!" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_delete_identity() {
    let app = TestApp::spawn().await;
    let (id, token) = app.signed_in("Ana", "ana@x.com").await;

    let response = app
        .delete_authenticated(&format!("/api/users/{}", id), &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Tokens are stateless: still valid after the identity is gone
    let response = app
        .get_authenticated(&format!("/api/users/{}", id), &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .delete_authenticated(&format!("/api/users/{}", id), &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_topic_lifecycle() {
    let app = TestApp::spawn().await;
    let (_, token) = app.signed_in("Ana", "ana@x.com").await;

    let response = app
        .post_authenticated("/api/topics", &token)
        .json(&json!({
            "title": "Lifetimes",
            "message": "Why does this borrow outlive the function?",
            "course": "Rust"
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["status"], "UNANSWERED");
    assert_eq!(body["data"]["author"], "ana@x.com");
    let topic_id = body["data"]["id"].as_str().unwrap().to_string();

    let response = app
        .get_authenticated(&format!("/api/topics/{}", topic_id), &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .patch_authenticated(&format!("/api/topics/{}", topic_id), &token)
        .json(&json!({ "status": "SOLVED" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["status"], "SOLVED");
    assert_eq!(body["data"]["title"], "Lifetimes");

    let response = app
        .patch_authenticated(&format!("/api/topics/{}", topic_id), &token)
        .json(&json!({ "status": "ARCHIVED" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = app
        .delete_authenticated(&format!("/api/topics/{}", topic_id), &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .get_authenticated(&format!("/api/topics/{}", topic_id), &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_duplicate_topic_rejected() {
    let app = TestApp::spawn().await;
    let (_, token) = app.signed_in("Ana", "ana@x.com").await;

    let topic = json!({
        "title": "Traits",
        "message": "Static or dynamic dispatch?",
        "author": "Ana",
        "course": "Rust"
    });

    let response = app
        .post_authenticated("/api/topics", &token)
        .json(&topic)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .post_authenticated("/api/topics", &token)
        .json(&topic)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_topics_oldest_first() {
    let app = TestApp::spawn().await;
    let (_, token) = app.signed_in("Ana", "ana@x.com").await;

    for title in ["First", "Second", "Third"] {
        let response = app
            .post_authenticated("/api/topics", &token)
            .json(&json!({ "title": title, "message": "Body", "course": "Rust" }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .get_authenticated("/api/topics", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    let titles: Vec<_> = body["data"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles, vec!["First", "Second", "Third"]);
    assert_eq!(body["data"]["size"], 10);
}
