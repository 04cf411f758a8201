use super::entities::UserRole;
use serde::Deserialize;

// 用户创建请求（明文密码，存储层负责哈希）
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: Option<String>,
    pub password: String,
    pub role: UserRole,
}
