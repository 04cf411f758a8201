use serde::Deserialize;

// 以下请求中的 password 均为明文，存储层负责哈希

#[derive(Debug, Clone, Deserialize)]
pub struct CreateOwnerRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSchoolRequest {
    pub name: String,
    pub owner_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateEducatorRequest {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub school_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateStudentRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub classroom_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateClassroomRequest {
    pub name: String,
    pub school_id: i64,
    pub educator_id: Option<i64>,
}
