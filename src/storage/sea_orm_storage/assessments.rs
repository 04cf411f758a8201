//! 测验与题目存储操作

use super::SeaOrmStorage;
use crate::entity::assessments::{ActiveModel, Entity as Assessments};
use crate::entity::questions::{
    ActiveModel as QuestionActiveModel, Column as QuestionColumn, Entity as Questions,
};
use crate::errors::{Result, SchoolHubError};
use crate::models::assessments::{
    entities::{Assessment, Question},
    requests::{CreateAssessmentRequest, CreateQuestionRequest},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建测验（默认开放作答）
    pub async fn create_assessment_impl(&self, req: CreateAssessmentRequest) -> Result<Assessment> {
        if req.title.trim().is_empty() {
            return Err(SchoolHubError::validation("测验标题不能为空"));
        }

        let model = ActiveModel {
            title: Set(req.title),
            description: Set(req.description),
            active: Set(true),
            drive_id: Set(req.drive_id),
            educator_id: Set(req.educator_id),
            classroom_id: Set(req.classroom_id),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolHubError::from_db("创建测验失败", e))?;

        Ok(result.into_assessment())
    }

    pub async fn get_assessment_by_id_impl(&self, id: i64) -> Result<Assessment> {
        Assessments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolHubError::from_db("查询测验失败", e))?
            .map(|m| m.into_assessment())
            .ok_or_else(|| SchoolHubError::not_found(format!("测验不存在 (ID: {id})")))
    }

    /// 开放或关闭测验
    pub async fn set_assessment_active_impl(&self, id: i64, active: bool) -> Result<Assessment> {
        let model = ActiveModel {
            id: Set(id),
            active: Set(active),
            ..Default::default()
        };

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| SchoolHubError::from_db(format!("更新测验状态失败 (ID: {id})"), e))?;

        Ok(updated.into_assessment())
    }

    /// 添加题目
    pub async fn add_question_impl(&self, req: CreateQuestionRequest) -> Result<Question> {
        req.validate()?;

        let model = QuestionActiveModel {
            assessment_id: Set(req.assessment_id),
            question_text: Set(req.text),
            question_choices: Set(serde_json::to_value(&req.choices)?),
            correct_choice: Set(req.correct_choice),
            question_points: Set(req.points),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolHubError::from_db("添加题目失败", e))?;

        Ok(result.into_question())
    }

    pub async fn list_assessment_questions_impl(&self, assessment_id: i64) -> Result<Vec<Question>> {
        let questions = Questions::find()
            .filter(QuestionColumn::AssessmentId.eq(assessment_id))
            .order_by_asc(QuestionColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolHubError::from_db("查询题目失败", e))?;

        Ok(questions.into_iter().map(|m| m.into_question()).collect())
    }
}
