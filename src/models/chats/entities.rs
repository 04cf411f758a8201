use serde::{Deserialize, Serialize};

// 聊天室：一个聊天频道 + 一名教师 + 若干班级
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chatroom {
    pub id: i64,
    pub educator_id: i64,
    pub chat_id: i64,
}
