//! 答卷实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "submissions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub answers: Json,
    #[sea_orm(column_type = "Double")]
    pub points_earned: f64,
    pub submission_time: i64,
    pub status: String,
    pub assessment_id: i64,
    pub student_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assessments::Entity",
        from = "Column::AssessmentId",
        to = "super::assessments::Column::Id"
    )]
    Assessment,
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id"
    )]
    Student,
}

impl Related<super::assessments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assessment.def()
    }
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_submission(self) -> crate::models::assessments::entities::Submission {
        use crate::models::assessments::entities::{Submission, SubmissionStatus};

        Submission {
            id: self.id,
            assessment_id: self.assessment_id,
            student_id: self.student_id,
            answers: serde_json::from_value(self.answers).unwrap_or_else(|e| {
                tracing::warn!("答卷作答数据损坏 (ID: {}): {}", self.id, e);
                Default::default()
            }),
            points_earned: self.points_earned,
            submission_time: super::from_timestamp(self.submission_time),
            status: self
                .status
                .parse::<SubmissionStatus>()
                .unwrap_or(SubmissionStatus::Submitted),
        }
    }
}
