//! 成绩册与成绩存储操作

use super::SeaOrmStorage;
use crate::entity::gradebook_students::{
    ActiveModel as GradebookStudentActiveModel, Entity as GradebookStudents,
};
use crate::entity::gradebooks::{ActiveModel as GradebookActiveModel, Entity as Gradebooks};
use crate::entity::grades::{ActiveModel, Column, Entity as Grades};
use crate::entity::students::{Column as StudentColumn, Entity as Students};
use crate::errors::{Result, SchoolHubError};
use crate::models::{
    grades::{
        entities::{Grade, Gradebook},
        requests::{CreateGradeRequest, CreateGradebookRequest},
    },
    schools::entities::Student,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建成绩册
    pub async fn create_gradebook_impl(&self, req: CreateGradebookRequest) -> Result<Gradebook> {
        let model = GradebookActiveModel {
            educator_id: Set(req.educator_id),
            assessment_id: Set(req.assessment_id),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolHubError::from_db("创建成绩册失败", e))?;

        Ok(result.into_gradebook())
    }

    /// 将学生加入成绩册
    pub async fn add_student_to_gradebook_impl(
        &self,
        gradebook_id: i64,
        student_id: i64,
    ) -> Result<()> {
        let model = GradebookStudentActiveModel {
            gradebook_id: Set(gradebook_id),
            student_id: Set(student_id),
        };

        GradebookStudents::insert(model)
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| SchoolHubError::from_db("加入成绩册失败", e))?;

        Ok(())
    }

    pub async fn list_gradebook_students_impl(&self, gradebook_id: i64) -> Result<Vec<Student>> {
        let gradebook = Gradebooks::find_by_id(gradebook_id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolHubError::from_db("查询成绩册失败", e))?
            .ok_or_else(|| {
                SchoolHubError::not_found(format!("成绩册不存在 (ID: {gradebook_id})"))
            })?;

        let students = gradebook
            .find_related(Students)
            .order_by_asc(StudentColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolHubError::from_db("查询成绩册学生失败", e))?;

        Ok(students.into_iter().map(|m| m.into_student()).collect())
    }

    /// 记录成绩
    pub async fn record_grade_impl(&self, req: CreateGradeRequest) -> Result<Grade> {
        req.validate()?;

        let model = ActiveModel {
            percentage: Set(req.percentage),
            gradebook_id: Set(req.gradebook_id),
            assessment_id: Set(req.assessment_id),
            student_id: Set(req.student_id),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolHubError::from_db("记录成绩失败", e))?;

        Ok(result.into_grade())
    }

    pub async fn list_gradebook_grades_impl(&self, gradebook_id: i64) -> Result<Vec<Grade>> {
        let grades = Grades::find()
            .filter(Column::GradebookId.eq(gradebook_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolHubError::from_db("查询成绩册成绩失败", e))?;

        Ok(grades.into_iter().map(|m| m.into_grade()).collect())
    }

    pub async fn list_student_grades_impl(&self, student_id: i64) -> Result<Vec<Grade>> {
        let grades = Grades::find()
            .filter(Column::StudentId.eq(student_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolHubError::from_db("查询学生成绩失败", e))?;

        Ok(grades.into_iter().map(|m| m.into_grade()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::super::{fixtures, memory_storage};
    use crate::models::grades::requests::{CreateGradeRequest, CreateGradebookRequest};
    use crate::storage::Storage;

    #[tokio::test]
    async fn test_gradebook_roster_and_grades() {
        let storage = memory_storage().await;
        let school = fixtures::seed_school(&storage).await;
        let educator = fixtures::seed_educator(&storage, school.id, "hoover").await;
        let room = fixtures::seed_classroom(&storage, school.id, Some(educator.id), "2B").await;
        let ralph = fixtures::seed_student(&storage, room.id, "ralph").await;
        let lisa = fixtures::seed_student(&storage, room.id, "lisa").await;
        let quiz = fixtures::seed_assessment(&storage, educator.id, Some(room.id), "Quiz").await;

        let gradebook = storage
            .create_gradebook(CreateGradebookRequest {
                educator_id: educator.id,
                assessment_id: quiz.id,
            })
            .await
            .unwrap();

        storage
            .add_student_to_gradebook(gradebook.id, ralph.id)
            .await
            .unwrap();
        storage
            .add_student_to_gradebook(gradebook.id, lisa.id)
            .await
            .unwrap();
        let err = storage
            .add_student_to_gradebook(gradebook.id, lisa.id)
            .await
            .unwrap_err();
        assert!(err.is_integrity());

        let roster: Vec<i64> = storage
            .list_gradebook_students(gradebook.id)
            .await
            .unwrap()
            .iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(roster, vec![ralph.id, lisa.id]);

        let grade = storage
            .record_grade(CreateGradeRequest {
                gradebook_id: gradebook.id,
                assessment_id: quiz.id,
                student_id: lisa.id,
                percentage: 98.5,
            })
            .await
            .unwrap();
        assert_eq!(grade.percentage, 98.5);

        assert_eq!(
            storage.list_gradebook_grades(gradebook.id).await.unwrap(),
            vec![grade.clone()]
        );
        assert_eq!(storage.list_student_grades(lisa.id).await.unwrap(), vec![grade]);
        assert!(storage.list_student_grades(ralph.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_grade_out_of_range_rejected() {
        let storage = memory_storage().await;
        let err = storage
            .record_grade(CreateGradeRequest {
                gradebook_id: 1,
                assessment_id: 1,
                student_id: 1,
                percentage: 120.0,
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E005");
    }

    #[tokio::test]
    async fn test_grade_with_unknown_references_violates_foreign_key() {
        let storage = memory_storage().await;
        let err = storage
            .record_grade(CreateGradeRequest {
                gradebook_id: 1,
                assessment_id: 1,
                student_id: 1,
                percentage: 50.0,
            })
            .await
            .unwrap_err();
        assert!(err.is_integrity());
    }

    #[tokio::test]
    async fn test_missing_gradebook_roster_is_not_found() {
        let storage = memory_storage().await;
        let err = storage.list_gradebook_students(3).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
