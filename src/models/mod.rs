//! 业务数据模型
//!
//! 与 `entity` 中的数据库行结构分离：时间戳转换为 chrono 类型，
//! 枚举字段解析为强类型，JSON 列解码为具体结构。

pub mod assessments;
pub mod auth;
pub mod chats;
pub mod common;
pub mod drives;
pub mod grades;
pub mod schools;
pub mod users;
