//! 班级存储操作

use super::SeaOrmStorage;
use crate::entity::assessments::{Column as AssessmentColumn, Entity as Assessments};
use crate::entity::classrooms::{ActiveModel, Entity as Classrooms};
use crate::entity::drives::{
    ActiveModel as DriveActiveModel, Column as DriveColumn, Entity as Drives,
};
use crate::entity::materials::{Column as MaterialColumn, Entity as Materials};
use crate::entity::students::{Column as StudentColumn, Entity as Students};
use crate::errors::{Result, SchoolHubError};
use crate::models::{
    assessments::entities::Assessment,
    drives::entities::{Drive, Material},
    schools::{
        entities::{Classroom, Student},
        requests::CreateClassroomRequest,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建班级；指定教师时同一事务内创建班级网盘
    pub async fn create_classroom_impl(&self, req: CreateClassroomRequest) -> Result<Classroom> {
        if req.name.trim().is_empty() {
            return Err(SchoolHubError::validation("班级名称不能为空"));
        }

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolHubError::from_db("开启事务失败", e))?;

        let classroom = ActiveModel {
            name: Set(req.name),
            school_id: Set(req.school_id),
            educator_id: Set(req.educator_id),
            chatroom_id: Set(None),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| SchoolHubError::from_db("创建班级失败", e))?;

        if let Some(educator_id) = req.educator_id {
            DriveActiveModel {
                educator_id: Set(educator_id),
                classroom_id: Set(Some(classroom.id)),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(|e| SchoolHubError::from_db("创建班级网盘失败", e))?;
        }

        txn.commit()
            .await
            .map_err(|e| SchoolHubError::from_db("提交事务失败", e))?;

        Ok(classroom.into_classroom())
    }

    pub async fn get_classroom_by_id_impl(&self, id: i64) -> Result<Classroom> {
        Classrooms::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolHubError::from_db("查询班级失败", e))?
            .map(|m| m.into_classroom())
            .ok_or_else(|| SchoolHubError::not_found(format!("班级不存在 (ID: {id})")))
    }

    pub async fn get_classroom_drive_impl(&self, classroom_id: i64) -> Result<Option<Drive>> {
        let result = Drives::find()
            .filter(DriveColumn::ClassroomId.eq(classroom_id))
            .one(&self.db)
            .await
            .map_err(|e| SchoolHubError::from_db("查询班级网盘失败", e))?;

        Ok(result.map(|m| m.into_drive()))
    }

    /// 绑定或解绑班级聊天室
    pub async fn assign_classroom_chatroom_impl(
        &self,
        classroom_id: i64,
        chatroom_id: Option<i64>,
    ) -> Result<Classroom> {
        let existing = Classrooms::find_by_id(classroom_id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolHubError::from_db("查询班级失败", e))?
            .ok_or_else(|| {
                SchoolHubError::not_found(format!("班级不存在 (ID: {classroom_id})"))
            })?;

        let mut model: ActiveModel = existing.into();
        model.chatroom_id = Set(chatroom_id);

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| SchoolHubError::from_db("更新班级聊天室失败", e))?;

        Ok(updated.into_classroom())
    }

    pub async fn list_classroom_students_impl(&self, classroom_id: i64) -> Result<Vec<Student>> {
        let students = Students::find()
            .filter(StudentColumn::ClassroomId.eq(classroom_id))
            .order_by_asc(StudentColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolHubError::from_db("查询班级学生失败", e))?;

        Ok(students.into_iter().map(|m| m.into_student()).collect())
    }

    pub async fn list_classroom_assessments_impl(
        &self,
        classroom_id: i64,
    ) -> Result<Vec<Assessment>> {
        let assessments = Assessments::find()
            .filter(AssessmentColumn::ClassroomId.eq(classroom_id))
            .order_by_asc(AssessmentColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolHubError::from_db("查询班级测验失败", e))?;

        Ok(assessments.into_iter().map(|m| m.into_assessment()).collect())
    }

    /// 列出共享给班级的资料
    pub async fn list_classroom_materials_impl(&self, classroom_id: i64) -> Result<Vec<Material>> {
        let classroom = Classrooms::find_by_id(classroom_id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolHubError::from_db("查询班级失败", e))?
            .ok_or_else(|| {
                SchoolHubError::not_found(format!("班级不存在 (ID: {classroom_id})"))
            })?;

        let materials = classroom
            .find_related(Materials)
            .order_by_asc(MaterialColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolHubError::from_db("查询班级资料失败", e))?;

        Ok(materials.into_iter().map(|m| m.into_material()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::super::{fixtures, memory_storage};
    use crate::models::schools::requests::CreateClassroomRequest;
    use crate::storage::Storage;

    #[tokio::test]
    async fn test_classroom_with_educator_gets_drive() {
        let storage = memory_storage().await;
        let school = fixtures::seed_school(&storage).await;
        let educator = fixtures::seed_educator(&storage, school.id, "largo").await;

        let room = fixtures::seed_classroom(&storage, school.id, Some(educator.id), "Music").await;
        let drive = storage.get_classroom_drive(room.id).await.unwrap().unwrap();
        assert!(drive.is_classroom_drive());
        assert_eq!(drive.educator_id, educator.id);
        assert_eq!(drive.classroom_id, Some(room.id));

        // 个人网盘不受影响
        let personal = storage.get_educator_drive(educator.id).await.unwrap();
        assert_ne!(personal.id, drive.id);

        assert_eq!(
            storage.list_educator_classrooms(educator.id).await.unwrap(),
            vec![room]
        );
    }

    #[tokio::test]
    async fn test_classroom_without_educator_has_no_drive() {
        let storage = memory_storage().await;
        let school = fixtures::seed_school(&storage).await;
        let room = fixtures::seed_classroom(&storage, school.id, None, "Study Hall").await;

        assert!(storage.get_classroom_drive(room.id).await.unwrap().is_none());
        assert_eq!(storage.get_classroom_by_id(room.id).await.unwrap(), room);
    }

    #[tokio::test]
    async fn test_classroom_with_unknown_educator_rolls_back() {
        let storage = memory_storage().await;
        let school = fixtures::seed_school(&storage).await;

        let err = storage
            .create_classroom(CreateClassroomRequest {
                name: "Ghost Class".into(),
                school_id: school.id,
                educator_id: Some(404),
            })
            .await
            .unwrap_err();
        assert!(err.is_integrity());
        assert!(storage.list_school_classrooms(school.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_classroom_in_unknown_school_rejected() {
        let storage = memory_storage().await;
        let err = storage
            .create_classroom(CreateClassroomRequest {
                name: "Orphan".into(),
                school_id: 77,
                educator_id: None,
            })
            .await
            .unwrap_err();
        assert!(err.is_integrity());
    }

    #[tokio::test]
    async fn test_list_classroom_students() {
        let storage = memory_storage().await;
        let school = fixtures::seed_school(&storage).await;
        let room = fixtures::seed_classroom(&storage, school.id, None, "4A").await;
        let other = fixtures::seed_classroom(&storage, school.id, None, "4B").await;
        let bart = fixtures::seed_student(&storage, room.id, "bart").await;
        fixtures::seed_student(&storage, other.id, "martin").await;

        let students = storage.list_classroom_students(room.id).await.unwrap();
        assert_eq!(students.len(), 1);
        assert_eq!(students[0].id, bart.id);
    }

    #[tokio::test]
    async fn test_assign_and_clear_chatroom() {
        let storage = memory_storage().await;
        let school = fixtures::seed_school(&storage).await;
        let educator = fixtures::seed_educator(&storage, school.id, "hoover").await;
        let room = fixtures::seed_classroom(&storage, school.id, Some(educator.id), "2B").await;
        let chatroom = storage.create_chatroom(educator.id).await.unwrap();

        let linked = storage
            .assign_classroom_chatroom(room.id, Some(chatroom.id))
            .await
            .unwrap();
        assert_eq!(linked.chatroom_id, Some(chatroom.id));

        let cleared = storage.assign_classroom_chatroom(room.id, None).await.unwrap();
        assert_eq!(cleared.chatroom_id, None);

        let err = storage
            .assign_classroom_chatroom(room.id, Some(999))
            .await
            .unwrap_err();
        assert!(err.is_integrity());

        let err = storage.assign_classroom_chatroom(999, None).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
