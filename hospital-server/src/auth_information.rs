use serde::{Deserialize, Serialize};

/// Identity resolved from the bearer token, placed into request extensions
/// by the auth middleware for downstream handlers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AuthInformation {
    pub user_id: i64,
}
