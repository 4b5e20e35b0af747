use axum::body::Body;
use axum::Router;
use factcheck_results::server::{router, AppState};
use factcheck_results::store::{MemoryStore, SessionStore, LAST_ANALYSIS_KEY};
use std::sync::Arc;
use tower::ServiceExt; // for `oneshot`

pub struct TestApp {
    pub store: Arc<MemoryStore>,
    pub app: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::default());
        let app = router(AppState { store: store.clone() as Arc<dyn SessionStore>, key: LAST_ANALYSIS_KEY.into() });
        Self { store, app }
    }

    pub async fn send(&self, method: &str, uri: &str, body: &str) -> (http::StatusCode, serde_json::Value) {
        self.send_bytes(method, uri, body.as_bytes().to_vec()).await
    }

    pub async fn send_bytes(&self, method: &str, uri: &str, body: Vec<u8>) -> (http::StatusCode, serde_json::Value) {
        let req = http::Request::builder()
            .method(method)
            .uri(uri)
            .header(http::header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();
        let resp = self.app.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() { serde_json::Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
        (status, json)
    }
}
