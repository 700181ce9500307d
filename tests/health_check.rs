//! Integration tests for the public and admin surface

mod common;

use common::{spawn_app, spawn_app_on_platform};

#[tokio::test]
async fn health_check_works() {
    let app = spawn_app();

    let response = app
        .client
        .get(&format!("{}/api/healthz", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());
    assert_eq!(response.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn static_files_are_served_and_counted() {
    let app = spawn_app();

    for _ in 0..2 {
        let response = app
            .client
            .get(&format!("{}/app/", app.address))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(200, response.status().as_u16());
        assert!(response.text().await.unwrap().contains("Welcome to Chirpy"));
    }

    assert_eq!(app.hits.get(), 2);

    let metrics = app
        .client
        .get(&format!("{}/admin/metrics", app.address))
        .send()
        .await
        .expect("Failed to execute request")
        .text()
        .await
        .unwrap();
    assert!(metrics.contains("Chirpy has been visited 2 times!"));
}

#[tokio::test]
async fn api_requests_do_not_count_as_hits() {
    let app = spawn_app();

    app.client
        .get(&format!("{}/api/healthz", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(app.hits.get(), 0);
}

#[tokio::test]
async fn reset_clears_hits_and_users_on_dev() {
    let app = spawn_app();
    app.create_user("walt@breakingbad.com", "secret123").await;
    app.client
        .get(&format!("{}/app/", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    let response = app
        .client
        .post(&format!("{}/admin/reset", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(200, response.status().as_u16());
    assert_eq!(app.hits.get(), 0);
    assert_eq!(
        201,
        app.create_user("walt@breakingbad.com", "secret123")
            .await
            .status()
            .as_u16(),
        "Email should be free again after reset"
    );
}

#[tokio::test]
async fn reset_is_forbidden_outside_dev() {
    let app = spawn_app_on_platform("production");
    app.create_user("walt@breakingbad.com", "secret123").await;

    let response = app
        .client
        .post(&format!("{}/admin/reset", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(403, response.status().as_u16());
    assert_eq!(
        409,
        app.create_user("walt@breakingbad.com", "secret123")
            .await
            .status()
            .as_u16()
    );
}
