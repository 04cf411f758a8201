use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// 已失效的 JWT（登出或吊销后写入黑名单）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockedToken {
    pub id: i64,
    pub jwt_token: String,
    pub created_at: DateTime<Utc>,
}

impl std::fmt::Display for BlockedToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Expired Token: {}", self.jwt_token)
    }
}
