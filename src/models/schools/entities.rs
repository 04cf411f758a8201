use serde::{Deserialize, Serialize};

use crate::models::common::Credentials;

// 学校所有者
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Owner {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
}

// 学校
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct School {
    pub id: i64,
    pub name: String,
    pub owner_id: i64,
}

// 教师
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Educator {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub school_id: i64,
}

// 学生，通过班级间接归属学校
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub classroom_id: i64,
}

// 班级
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classroom {
    pub id: i64,
    pub name: String,
    pub school_id: i64,
    pub educator_id: Option<i64>,
    pub chatroom_id: Option<i64>,
}

impl Credentials for Owner {
    fn username(&self) -> &str {
        &self.username
    }

    fn password_hash(&self) -> &str {
        &self.password_hash
    }
}

impl Credentials for Educator {
    fn username(&self) -> &str {
        &self.username
    }

    fn password_hash(&self) -> &str {
        &self.password_hash
    }
}

impl Credentials for Student {
    fn username(&self) -> &str {
        &self.username
    }

    fn password_hash(&self) -> &str {
        &self.password_hash
    }
}
