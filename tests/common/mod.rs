#![allow(dead_code)]

use axum::Router;
use axum_test::TestServer;
use chrono::{DateTime, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use slug_shortener::application::services::auth_service::Claims;
use slug_shortener::application::services::{
    IdentityProvider, JwtIdentityProvider, LinkService, LinkServiceSettings, StatsService,
};
use slug_shortener::domain::click_worker::run_click_worker;
use slug_shortener::domain::entities::Link;
use slug_shortener::domain::repositories::{LinkRepository, StatsRepository};
use slug_shortener::infrastructure::persistence::MemoryLinkRepository;
use slug_shortener::routes::router;
use slug_shortener::state::AppState;

pub const TEST_SECRET: &str = "test-signing-secret";
pub const BASE_URL: &str = "https://s.example.com";

/// Application wired to an in-memory store, with a running click worker.
pub struct TestApp {
    pub state: AppState,
    pub store: Arc<MemoryLinkRepository>,
    pub worker: JoinHandle<()>,
}

impl TestApp {
    pub fn server(&self) -> TestServer {
        TestServer::new(self.router()).unwrap()
    }

    pub fn router(&self) -> Router {
        router(self.state.clone())
    }

    /// Waits until the stored click count of `slug` reaches `expected`.
    pub async fn wait_for_clicks(&self, slug: &str, expected: i64) -> i64 {
        let mut clicks = 0;
        for _ in 0..200 {
            clicks = self.store.get(slug).unwrap().map(|l| l.click_count).unwrap_or(0);
            if clicks >= expected {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        clicks
    }
}

/// Builds an app with JWT authentication enabled.
pub fn create_test_app() -> TestApp {
    build_app(Some(Arc::new(JwtIdentityProvider::new(TEST_SECRET))), 100)
}

/// Builds an app with authentication disabled.
pub fn create_open_test_app() -> TestApp {
    build_app(None, 100)
}

pub fn build_app(identity: Option<Arc<dyn IdentityProvider>>, queue_capacity: usize) -> TestApp {
    let store = Arc::new(MemoryLinkRepository::new());
    let (tx, rx) = mpsc::channel(queue_capacity);

    let worker = tokio::spawn(run_click_worker(rx, store.clone(), 4, Duration::from_secs(5)));

    let link_repository: Arc<dyn LinkRepository> = store.clone();
    let stats_repository: Arc<dyn StatsRepository> = store.clone();

    let link_service = Arc::new(LinkService::new(
        link_repository,
        tx,
        LinkServiceSettings::default(),
    ));
    let stats_service = Arc::new(StatsService::new(stats_repository, Duration::from_secs(5)));

    let state = AppState::new(link_service, stats_service, identity, BASE_URL);

    TestApp {
        state,
        store,
        worker,
    }
}

/// Mints an HS256 access token for `subject`, valid for an hour.
pub fn token_for(subject: &str) -> String {
    let claims = Claims {
        sub: subject.to_string(),
        exp: Utc::now().timestamp() + 3600,
        email: Some(format!("{subject}@example.com")),
        name: None,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap()
}

pub fn bearer(subject: &str) -> String {
    format!("Bearer {}", token_for(subject))
}

pub fn stored_link(
    slug: &str,
    destination: &str,
    owner: Option<&str>,
    clicks: i64,
    created_at: DateTime<Utc>,
) -> Link {
    Link::new(
        slug.to_string(),
        destination.to_string(),
        owner.map(str::to_string),
        clicks,
        created_at,
    )
}
