use std::sync::Arc;

use auth::Authenticator;
use auth::PasswordCost;
use auth::PasswordHasher;
use auth::SigningSecret;
use forum_service::domain::identity::gateway::AuthenticationGateway;
use forum_service::domain::identity::service::IdentityService;
use forum_service::domain::topic::service::TopicService;
use forum_service::inbound::http::router::create_router;
use forum_service::outbound::repositories::memory::InMemoryCredentialStore;
use forum_service::outbound::repositories::memory::InMemoryTopicRepository;
use serde_json::json;

pub const TEST_SECRET: &str = "test-secret-key-for-token-signing-at-least-32-bytes";

/// Test application that spawns a real server over in-memory stores
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub authenticator: Arc<Authenticator>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        // Cheapest Argon2 cost keeps the suite fast
        let hasher = PasswordHasher::with_cost(PasswordCost {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        })
        .expect("Failed to build password hasher");
        let secret = SigningSecret::new(TEST_SECRET).expect("Failed to build signing secret");
        let authenticator = Arc::new(Authenticator::with_password_hasher(&secret, hasher));

        let credential_store = Arc::new(InMemoryCredentialStore::new());
        let topic_repository = Arc::new(InMemoryTopicRepository::new());

        let router = create_router(
            Arc::new(IdentityService::new(
                Arc::clone(&credential_store),
                Arc::clone(&authenticator),
            )),
            Arc::new(AuthenticationGateway::new(
                credential_store,
                Arc::clone(&authenticator),
            )),
            Arc::new(TopicService::new(topic_repository)),
        );

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            authenticator,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PATCH request with Bearer token
    pub fn patch_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .patch(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Register an identity and return the response body
    pub async fn register(&self, display_name: &str, email: &str, password: &str) -> serde_json::Value {
        let response = self
            .post("/api/users")
            .json(&json!({
                "display_name": display_name,
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        response.json().await.expect("Failed to parse response")
    }

    /// Log in and return the bearer token
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .post("/api/auth/login")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["token"]
            .as_str()
            .expect("Missing token")
            .to_string()
    }

    /// Register a fresh identity and return its id and a valid token
    pub async fn signed_in(&self, display_name: &str, email: &str) -> (String, String) {
        let body = self.register(display_name, email, "pass_word!").await;
        let id = body["data"]["id"].as_str().unwrap().to_string();
        let token = self.login(email, "pass_word!").await;
        (id, token)
    }
}
