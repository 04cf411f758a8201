use serde::{Deserialize, Serialize};

// 网盘：教师个人网盘（classroom_id 为空）或班级网盘
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drive {
    pub id: i64,
    pub educator_id: i64,
    pub classroom_id: Option<i64>,
}

impl Drive {
    pub fn is_classroom_drive(&self) -> bool {
        self.classroom_id.is_some()
    }
}

// 学习资料
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub id: i64,
    pub name: String,
    pub drive_id: i64,
}
