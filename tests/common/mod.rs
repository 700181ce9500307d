#![allow(dead_code)]

use std::net::TcpListener;
use std::sync::Arc;

use chirpy::configuration::{ApplicationSettings, DatabaseSettings, JwtSettings, Settings, StorageBackend};
use chirpy::middleware::FileServerHits;
use chirpy::startup::run;
use chirpy::store::MemoryStore;
use serde_json::{json, Value};

pub const TEST_SECRET: &str = "test-secret-key-at-least-32-characters-long";

pub struct TestApp {
    pub address: String,
    pub hits: Arc<FileServerHits>,
    pub client: reqwest::Client,
}

pub fn spawn_app() -> TestApp {
    spawn_app_on_platform("dev")
}

pub fn spawn_app_on_platform(platform: &str) -> TestApp {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    let settings = Settings {
        application: ApplicationSettings {
            platform: platform.to_string(),
            storage: StorageBackend::Memory,
            ..ApplicationSettings::default()
        },
        database: DatabaseSettings::default(),
        jwt: JwtSettings::new(TEST_SECRET),
    };
    let hits = Arc::new(FileServerHits::new());

    let server = run(listener, Arc::new(MemoryStore::new()), settings, hits.clone())
        .expect("Failed to bind address");
    let _ = tokio::spawn(server);

    TestApp {
        address: format!("http://127.0.0.1:{}", port),
        hits,
        client: reqwest::Client::new(),
    }
}

impl TestApp {
    pub async fn create_user(&self, email: &str, password: &str) -> reqwest::Response {
        self.client
            .post(&format!("{}/api/users", &self.address))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.client
            .post(&format!("{}/api/login", &self.address))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// Registers a user and logs in, returning `(access_token, refresh_token)`
    pub async fn signed_in_user(&self, email: &str, password: &str) -> (String, String) {
        assert_eq!(201, self.create_user(email, password).await.status().as_u16());
        let body: Value = self
            .login(email, password)
            .await
            .json()
            .await
            .expect("Failed to parse login response");
        (
            body["token"].as_str().unwrap().to_string(),
            body["refresh_token"].as_str().unwrap().to_string(),
        )
    }

    pub async fn post_chirp(&self, bearer: Option<&str>, body: &str) -> reqwest::Response {
        let mut request = self
            .client
            .post(&format!("{}/api/chirps", &self.address))
            .json(&json!({ "body": body }));
        if let Some(token) = bearer {
            request = request.header("Authorization", format!("Bearer {}", token));
        }
        request.send().await.expect("Failed to execute request.")
    }

    pub async fn post_with_bearer(&self, path: &str, token: &str) -> reqwest::Response {
        self.client
            .post(&format!("{}{}", &self.address, path))
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await
            .expect("Failed to execute request.")
    }
}
