//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。

pub mod prelude;

pub mod assessments;
pub mod chatrooms;
pub mod chats;
pub mod classroom_materials;
pub mod classrooms;
pub mod drives;
pub mod educators;
pub mod gradebook_students;
pub mod gradebooks;
pub mod grades;
pub mod jwt_token_blocklist;
pub mod materials;
pub mod owners;
pub mod questions;
pub mod schools;
pub mod students;
pub mod submissions;
pub mod user_materials;
pub mod users;

/// 秒级时间戳转 UTC 时间
pub(crate) fn from_timestamp(ts: i64) -> chrono::DateTime<chrono::Utc> {
    chrono::DateTime::<chrono::Utc>::from_timestamp(ts, 0).unwrap_or_default()
}
