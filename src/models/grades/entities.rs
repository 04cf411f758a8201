use serde::{Deserialize, Serialize};

// 成绩册：某位教师针对某次测验的成绩汇总
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gradebook {
    pub id: i64,
    pub educator_id: i64,
    pub assessment_id: i64,
}

// 成绩（百分制）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grade {
    pub id: i64,
    pub percentage: f64,
    pub gradebook_id: i64,
    pub assessment_id: i64,
    pub student_id: i64,
}
