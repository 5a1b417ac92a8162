use std::path::PathBuf;
use std::sync::Arc;

use account_service::domain::account::credentials::CredentialPool;
use account_service::domain::account::service::AccountService;
use account_service::inbound::http::router::create_router;
use account_service::outbound::repositories::InMemoryAccountRepository;
use account_service::outbound::storage::LocalImageStore;
use auth::Authenticator;
use auth::HashCost;
use auth::PasswordHasher;
use auth::SigningKey;
use serde_json::json;
use serde_json::Value;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-token-signing";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub repository: Arc<InMemoryAccountRepository>,
    pub upload_dir: PathBuf,
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

        // Cheap hashing keeps the suite fast
        let hasher = PasswordHasher::new(HashCost {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        })
        .expect("Failed to create password hasher");
        let signing_key = SigningKey::from_secret(TEST_SECRET).expect("Invalid test secret");
        let authenticator = Arc::new(Authenticator::new(signing_key, hasher));

        let upload_dir = std::env::temp_dir().join(format!("uploads-{}", uuid::Uuid::new_v4()));
        let image_store = Arc::new(
            LocalImageStore::open(&upload_dir)
                .await
                .expect("Failed to create upload directory"),
        );

        let repository = Arc::new(InMemoryAccountRepository::new());
        let account_service = Arc::new(AccountService::new(
            Arc::clone(&repository),
            image_store,
            CredentialPool::new(Arc::clone(&authenticator), 4),
        ));

        let router = create_router(account_service, authenticator);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            repository,
            upload_dir,
        }
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make PUT request with the raw token in the authorization header
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .put(format!("{}{}", self.address, path))
            .header("authorization", token)
    }

    /// Helper to make DELETE request with the raw token in the authorization header
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .header("authorization", token)
    }

    /// Sign up through the API and return the raw response.
    pub async fn signup(&self, body: &Value) -> reqwest::Response {
        self.post("/signup")
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Log in through the API and return the raw response.
    pub async fn login(&self, email: &str, password: &str, role: &str) -> reqwest::Response {
        self.post("/login")
            .json(&json!({ "email": email, "password": password, "role": role }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Sign up and return the issued token.
    pub async fn signup_token(&self, body: &Value) -> String {
        let response = self.signup(body).await;
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"]["token"]
            .as_str()
            .expect("Missing token")
            .to_string()
    }

    /// Paths of all files currently in the upload directory.
    pub fn stored_images(&self) -> Vec<PathBuf> {
        std::fs::read_dir(&self.upload_dir)
            .expect("Upload directory missing")
            .map(|entry| entry.expect("Failed to read upload entry").path())
            .collect()
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.upload_dir);
    }
}

/// Signup body for a regular user.
pub fn user_signup(email: &str, phone: &str) -> Value {
    json!({
        "email": email,
        "phone": phone,
        "name": "Test User",
        "password": "secret123",
    })
}
