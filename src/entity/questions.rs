//! 题目实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "questions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub assessment_id: i64,
    #[sea_orm(column_type = "Text")]
    pub question_text: String,
    pub question_choices: Json,
    pub correct_choice: i32,
    pub question_points: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assessments::Entity",
        from = "Column::AssessmentId",
        to = "super::assessments::Column::Id"
    )]
    Assessment,
}

impl Related<super::assessments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assessment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_question(self) -> crate::models::assessments::entities::Question {
        crate::models::assessments::entities::Question {
            id: self.id,
            assessment_id: self.assessment_id,
            text: self.question_text,
            choices: serde_json::from_value(self.question_choices).unwrap_or_else(|e| {
                tracing::warn!("题目选项数据损坏 (ID: {}): {}", self.id, e);
                Vec::new()
            }),
            correct_choice: self.correct_choice,
            points: self.question_points,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corrupt_choices_become_empty() {
        let model = Model {
            id: 3,
            assessment_id: 1,
            question_text: "2 + 2 = ?".into(),
            question_choices: serde_json::json!({"a": "4"}),
            correct_choice: 0,
            question_points: 1,
        };

        let question = model.into_question();
        assert!(question.choices.is_empty());
    }
}
