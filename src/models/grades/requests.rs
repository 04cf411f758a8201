use serde::Deserialize;

use crate::errors::{Result, SchoolHubError};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateGradebookRequest {
    pub educator_id: i64,
    pub assessment_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateGradeRequest {
    pub gradebook_id: i64,
    pub assessment_id: i64,
    pub student_id: i64,
    pub percentage: f64,
}

impl CreateGradeRequest {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=100.0).contains(&self.percentage) {
            return Err(SchoolHubError::validation(format!(
                "成绩百分比必须在 0 到 100 之间: {}",
                self.percentage
            )));
        }
        Ok(())
    }
}
