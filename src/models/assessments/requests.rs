use serde::Deserialize;

use super::entities::SubmissionAnswers;
use crate::errors::{Result, SchoolHubError};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAssessmentRequest {
    pub title: String,
    pub description: Option<String>,
    pub drive_id: i64,
    pub educator_id: i64,
    pub classroom_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateQuestionRequest {
    pub assessment_id: i64,
    pub text: String,
    pub choices: Vec<String>,
    pub correct_choice: i32,
    pub points: i32,
}

impl CreateQuestionRequest {
    pub fn validate(&self) -> Result<()> {
        if self.choices.is_empty() {
            return Err(SchoolHubError::validation("题目至少需要一个选项"));
        }
        let in_range = usize::try_from(self.correct_choice)
            .map(|idx| idx < self.choices.len())
            .unwrap_or(false);
        if !in_range {
            return Err(SchoolHubError::validation(format!(
                "正确选项下标越界: {} (共 {} 个选项)",
                self.correct_choice,
                self.choices.len()
            )));
        }
        if self.points < 0 {
            return Err(SchoolHubError::validation("题目分值不能为负数"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSubmissionRequest {
    pub assessment_id: i64,
    pub student_id: i64,
    pub answers: SubmissionAnswers,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(choices: usize, correct_choice: i32, points: i32) -> CreateQuestionRequest {
        CreateQuestionRequest {
            assessment_id: 1,
            text: "2 + 2 = ?".into(),
            choices: (0..choices).map(|i| i.to_string()).collect(),
            correct_choice,
            points,
        }
    }

    #[test]
    fn test_valid_question() {
        assert!(request(4, 0, 1).validate().is_ok());
        assert!(request(4, 3, 0).validate().is_ok());
    }

    #[test]
    fn test_correct_choice_out_of_range() {
        assert!(request(4, 4, 1).validate().is_err());
        assert!(request(4, -1, 1).validate().is_err());
        assert!(request(0, 0, 1).validate().is_err());
    }

    #[test]
    fn test_negative_points() {
        let err = request(2, 0, -3).validate().unwrap_err();
        assert_eq!(err.code(), "E005");
    }
}
