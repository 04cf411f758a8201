use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 答案：题目 ID -> 所选选项下标
pub type SubmissionAnswers = BTreeMap<i64, i32>;

// 测验
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub active: bool,
    pub drive_id: i64,
    pub educator_id: i64,
    pub classroom_id: Option<i64>,
}

// 单选题
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub assessment_id: i64,
    pub text: String,
    pub choices: Vec<String>,
    pub correct_choice: i32,
    pub points: i32,
}

impl Question {
    pub fn is_correct(&self, choice: i32) -> bool {
        choice == self.correct_choice
    }
}

/// 按题目计算得分，未作答或题目不存在的答案不计分
pub fn score_answers(questions: &[Question], answers: &SubmissionAnswers) -> f64 {
    questions
        .iter()
        .filter(|q| answers.get(&q.id).is_some_and(|&choice| q.is_correct(choice)))
        .map(|q| f64::from(q.points))
        .sum()
}

// 答卷状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Submitted, // 已提交
    Graded,    // 已评分
    Returned,  // 已退回
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionStatus::Submitted => write!(f, "submitted"),
            SubmissionStatus::Graded => write!(f, "graded"),
            SubmissionStatus::Returned => write!(f, "returned"),
        }
    }
}

impl std::str::FromStr for SubmissionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "submitted" => Ok(SubmissionStatus::Submitted),
            "graded" => Ok(SubmissionStatus::Graded),
            "returned" => Ok(SubmissionStatus::Returned),
            _ => Err(format!("Invalid submission status: {s}")),
        }
    }
}

// 答卷
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: i64,
    pub assessment_id: i64,
    pub student_id: i64,
    pub answers: SubmissionAnswers,
    pub points_earned: f64,
    pub submission_time: DateTime<Utc>,
    pub status: SubmissionStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: i64, correct_choice: i32, points: i32) -> Question {
        Question {
            id,
            assessment_id: 1,
            text: format!("Q{id}"),
            choices: vec!["a".into(), "b".into(), "c".into()],
            correct_choice,
            points,
        }
    }

    #[test]
    fn test_score_answers() {
        let questions = vec![question(1, 0, 2), question(2, 2, 3), question(3, 1, 5)];
        let answers = SubmissionAnswers::from([(1, 0), (2, 1), (3, 1), (99, 0)]);

        assert_eq!(score_answers(&questions, &answers), 7.0);
    }

    #[test]
    fn test_score_empty_answers() {
        let questions = vec![question(1, 0, 2)];
        assert_eq!(score_answers(&questions, &SubmissionAnswers::new()), 0.0);
    }

    #[test]
    fn test_answers_json_shape() {
        let answers = SubmissionAnswers::from([(4, 1), (12, 0)]);
        let value = serde_json::to_value(&answers).unwrap();
        assert_eq!(value, serde_json::json!({"4": 1, "12": 0}));

        let back: SubmissionAnswers = serde_json::from_value(value).unwrap();
        assert_eq!(back, answers);
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(
            "graded".parse::<SubmissionStatus>().unwrap(),
            SubmissionStatus::Graded
        );
        assert_eq!(SubmissionStatus::Returned.to_string(), "returned");
        assert!("lost".parse::<SubmissionStatus>().is_err());
    }
}
