//! Mock auth helpers for integration tests.
//!
//! Services behind the gateway receive an `x-cierre-user-id` header injected
//! by the gateway. In tests, `MockAuth` injects the header directly so no
//! real gateway or session provider is needed.

use axum::http::{HeaderMap, HeaderName, HeaderValue};
use uuid::Uuid;

/// Configurable identity injected into test requests.
pub struct MockAuth {
    pub user_id: Uuid,
}

impl MockAuth {
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }

    /// Return headers as if the gateway injected them.
    pub fn headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(
            HeaderName::from_static("x-cierre-user-id"),
            HeaderValue::from_str(&self.user_id.to_string()).unwrap(),
        );
        map
    }
}
