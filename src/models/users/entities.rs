use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::utils::password::{hash_password, verify_password};

// 用户角色
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,    // 管理员
    Owner,    // 学校所有者
    Educator, // 教师
    Student,  // 学生
}

impl UserRole {
    pub const ADMIN: &'static str = "admin";
    pub const OWNER: &'static str = "owner";
    pub const EDUCATOR: &'static str = "educator";
    pub const STUDENT: &'static str = "student";
}

impl<'de> Deserialize<'de> for UserRole {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<UserRole>().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的用户角色: '{s}'. 支持的角色: admin, owner, educator, student"
            ))
        })
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Admin => write!(f, "{}", UserRole::ADMIN),
            UserRole::Owner => write!(f, "{}", UserRole::OWNER),
            UserRole::Educator => write!(f, "{}", UserRole::EDUCATOR),
            UserRole::Student => write!(f, "{}", UserRole::STUDENT),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            UserRole::ADMIN => Ok(UserRole::Admin),
            UserRole::OWNER => Ok(UserRole::Owner),
            UserRole::EDUCATOR => Ok(UserRole::Educator),
            UserRole::STUDENT => Ok(UserRole::Student),
            _ => Err(format!("Invalid user role: {s}")),
        }
    }
}

// 用户实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64, // 0 表示尚未持久化
    pub username: String,
    pub email: Option<String>,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    pub password_hash: Option<String>,
    pub role: UserRole,
    pub jwt_auth_active: bool,
    pub date_joined: DateTime<Utc>,
}

/// 用户的精简字典表示
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDict {
    #[serde(rename = "_id")]
    pub id: i64,
    pub username: String,
    pub email: Option<String>,
}

impl User {
    /// 构造一个尚未保存的用户
    pub fn new(username: impl Into<String>, email: Option<String>, role: UserRole) -> Self {
        User {
            id: 0,
            username: username.into(),
            email,
            password_hash: None,
            role,
            jwt_auth_active: false,
            date_joined: Utc::now(),
        }
    }

    /// 是否尚未写入数据库
    pub fn is_new(&self) -> bool {
        self.id == 0
    }

    pub fn set_password(&mut self, password: &str) -> Result<()> {
        self.password_hash = Some(hash_password(password)?);
        Ok(())
    }

    /// 未设置密码时一律返回 false
    pub fn check_password(&self, password: &str) -> bool {
        self.password_hash
            .as_deref()
            .is_some_and(|hash| verify_password(password, hash))
    }

    pub fn update_email(&mut self, new_email: impl Into<String>) {
        self.email = Some(new_email.into());
    }

    pub fn update_username(&mut self, new_username: impl Into<String>) {
        self.username = new_username.into();
    }

    pub fn check_jwt_auth_active(&self) -> bool {
        self.jwt_auth_active
    }

    pub fn set_jwt_auth_active(&mut self, status: bool) {
        self.jwt_auth_active = status;
    }

    pub fn to_dict(&self) -> UserDict {
        UserDict {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_dict())?)
    }
}

impl std::fmt::Display for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "User {}", self.username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> User {
        let mut user = User::new("alice", Some("a@x.com".into()), UserRole::Student);
        user.id = 7;
        user
    }

    #[test]
    fn test_password_round_trip() {
        let mut user = alice();
        user.set_password("s3cret-pass").unwrap();
        assert!(user.check_password("s3cret-pass"));
        assert!(!user.check_password("wrong-pass"));
    }

    #[test]
    fn test_check_password_without_hash() {
        let user = alice();
        assert!(!user.check_password(""));
        assert!(!user.check_password("anything"));
    }

    #[test]
    fn test_to_dict_and_json() {
        let user = alice();
        assert_eq!(
            user.to_dict(),
            UserDict {
                id: 7,
                username: "alice".into(),
                email: Some("a@x.com".into()),
            }
        );
        assert_eq!(
            user.to_json().unwrap(),
            r#"{"_id":7,"username":"alice","email":"a@x.com"}"#
        );
    }

    #[test]
    fn test_to_json_without_email() {
        let mut user = alice();
        user.email = None;
        assert_eq!(
            user.to_json().unwrap(),
            r#"{"_id":7,"username":"alice","email":null}"#
        );
    }

    #[test]
    fn test_mutators() {
        let mut user = alice();
        user.update_email("alice@school.edu");
        user.update_username("alice2");
        assert_eq!(user.email.as_deref(), Some("alice@school.edu"));
        assert_eq!(user.username, "alice2");
        assert_eq!(user.to_string(), "User alice2");

        assert!(!user.check_jwt_auth_active());
        user.set_jwt_auth_active(true);
        assert!(user.check_jwt_auth_active());
    }

    #[test]
    fn test_role_parse_and_display() {
        for role in [
            UserRole::Admin,
            UserRole::Owner,
            UserRole::Educator,
            UserRole::Student,
        ] {
            assert_eq!(role.to_string().parse::<UserRole>().unwrap(), role);
        }
        assert!("principal".parse::<UserRole>().is_err());
        let role: UserRole = serde_json::from_str("\"educator\"").unwrap();
        assert_eq!(role, UserRole::Educator);
        assert!(serde_json::from_str::<UserRole>("\"janitor\"").is_err());
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let mut user = alice();
        user.set_password("pw").unwrap();
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["role"], "student");
    }
}
