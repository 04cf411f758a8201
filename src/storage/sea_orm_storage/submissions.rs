//! 答卷存储操作

use super::SeaOrmStorage;
use crate::entity::assessments::Entity as Assessments;
use crate::entity::questions::{Column as QuestionColumn, Entity as Questions};
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions};
use crate::errors::{Result, SchoolHubError};
use crate::models::assessments::{
    entities::{Question, Submission, SubmissionStatus, score_answers},
    requests::CreateSubmissionRequest,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::debug;

impl SeaOrmStorage {
    /// 提交答卷：校验测验开放状态，并按题目自动计分
    pub async fn create_submission_impl(&self, req: CreateSubmissionRequest) -> Result<Submission> {
        let assessment = Assessments::find_by_id(req.assessment_id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolHubError::from_db("查询测验失败", e))?
            .ok_or_else(|| {
                SchoolHubError::not_found(format!("测验不存在 (ID: {})", req.assessment_id))
            })?;

        if !assessment.active {
            return Err(SchoolHubError::validation(format!(
                "测验已关闭，无法提交 (ID: {})",
                assessment.id
            )));
        }

        let questions: Vec<Question> = Questions::find()
            .filter(QuestionColumn::AssessmentId.eq(assessment.id))
            .all(&self.db)
            .await
            .map_err(|e| SchoolHubError::from_db("查询题目失败", e))?
            .into_iter()
            .map(|m| m.into_question())
            .collect();

        let points_earned = score_answers(&questions, &req.answers);

        let model = ActiveModel {
            answers: Set(serde_json::to_value(&req.answers)?),
            points_earned: Set(points_earned),
            submission_time: Set(chrono::Utc::now().timestamp()),
            status: Set(SubmissionStatus::Submitted.to_string()),
            assessment_id: Set(req.assessment_id),
            student_id: Set(req.student_id),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolHubError::from_db("提交答卷失败", e))?;

        debug!(
            "答卷已提交 (ID: {}, 得分: {})",
            result.id, result.points_earned
        );

        Ok(result.into_submission())
    }

    pub async fn get_submission_by_id_impl(&self, id: i64) -> Result<Submission> {
        Submissions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolHubError::from_db("查询答卷失败", e))?
            .map(|m| m.into_submission())
            .ok_or_else(|| SchoolHubError::not_found(format!("答卷不存在 (ID: {id})")))
    }

    pub async fn update_submission_status_impl(
        &self,
        id: i64,
        status: SubmissionStatus,
    ) -> Result<Submission> {
        let model = ActiveModel {
            id: Set(id),
            status: Set(status.to_string()),
            ..Default::default()
        };

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| SchoolHubError::from_db(format!("更新答卷状态失败 (ID: {id})"), e))?;

        Ok(updated.into_submission())
    }

    pub async fn list_assessment_submissions_impl(
        &self,
        assessment_id: i64,
    ) -> Result<Vec<Submission>> {
        let submissions = Submissions::find()
            .filter(Column::AssessmentId.eq(assessment_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolHubError::from_db("查询测验答卷失败", e))?;

        Ok(submissions.into_iter().map(|m| m.into_submission()).collect())
    }

    pub async fn list_student_submissions_impl(&self, student_id: i64) -> Result<Vec<Submission>> {
        let submissions = Submissions::find()
            .filter(Column::StudentId.eq(student_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolHubError::from_db("查询学生答卷失败", e))?;

        Ok(submissions.into_iter().map(|m| m.into_submission()).collect())
    }
}
