//! 学校、所有者、教师与学生存储操作

use super::SeaOrmStorage;
use crate::entity::assessments::{Column as AssessmentColumn, Entity as Assessments};
use crate::entity::classrooms::{Column as ClassroomColumn, Entity as Classrooms};
use crate::entity::drives::{
    ActiveModel as DriveActiveModel, Column as DriveColumn, Entity as Drives,
};
use crate::entity::educators::{
    ActiveModel as EducatorActiveModel, Column as EducatorColumn, Entity as Educators,
};
use crate::entity::owners::{ActiveModel as OwnerActiveModel, Entity as Owners};
use crate::entity::schools::{
    ActiveModel as SchoolActiveModel, Column as SchoolColumn, Entity as Schools,
};
use crate::entity::students::{
    ActiveModel as StudentActiveModel, Column as StudentColumn, Entity as Students,
};
use crate::errors::{Result, SchoolHubError};
use crate::models::{
    assessments::entities::Assessment,
    drives::entities::Drive,
    schools::{
        entities::{Classroom, Educator, Owner, School, Student},
        requests::{
            CreateEducatorRequest, CreateOwnerRequest, CreateSchoolRequest, CreateStudentRequest,
        },
    },
};
use crate::utils::{hash_password, validate_email, validate_username};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::debug;

const ACCOUNT_FIELD_MAX_LEN: usize = 120;

fn validate_account(username: &str, email: &str) -> Result<()> {
    validate_username(username, ACCOUNT_FIELD_MAX_LEN).map_err(SchoolHubError::validation)?;
    validate_email(email, ACCOUNT_FIELD_MAX_LEN).map_err(SchoolHubError::validation)?;
    Ok(())
}

impl SeaOrmStorage {
    // ==================== 所有者 ====================

    /// 创建学校所有者
    pub async fn create_owner_impl(&self, req: CreateOwnerRequest) -> Result<Owner> {
        validate_account(&req.username, &req.email)?;

        let model = OwnerActiveModel {
            username: Set(req.username),
            email: Set(req.email),
            password: Set(hash_password(&req.password)?),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolHubError::from_db("创建所有者失败", e))?;

        Ok(result.into_owner())
    }

    pub async fn get_owner_by_id_impl(&self, id: i64) -> Result<Owner> {
        Owners::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolHubError::from_db("查询所有者失败", e))?
            .map(|m| m.into_owner())
            .ok_or_else(|| SchoolHubError::not_found(format!("所有者不存在 (ID: {id})")))
    }

    // ==================== 学校 ====================

    /// 创建学校，每个所有者最多拥有一所学校
    pub async fn create_school_impl(&self, req: CreateSchoolRequest) -> Result<School> {
        if req.name.trim().is_empty() {
            return Err(SchoolHubError::validation("学校名称不能为空"));
        }

        let model = SchoolActiveModel {
            name: Set(req.name),
            owner_id: Set(req.owner_id),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolHubError::from_db("创建学校失败", e))?;

        Ok(result.into_school())
    }

    pub async fn get_school_by_id_impl(&self, id: i64) -> Result<School> {
        Schools::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolHubError::from_db("查询学校失败", e))?
            .map(|m| m.into_school())
            .ok_or_else(|| SchoolHubError::not_found(format!("学校不存在 (ID: {id})")))
    }

    pub async fn get_school_by_owner_impl(&self, owner_id: i64) -> Result<Option<School>> {
        let result = Schools::find()
            .filter(SchoolColumn::OwnerId.eq(owner_id))
            .one(&self.db)
            .await
            .map_err(|e| SchoolHubError::from_db("查询学校失败", e))?;

        Ok(result.map(|m| m.into_school()))
    }

    pub async fn list_school_classrooms_impl(&self, school_id: i64) -> Result<Vec<Classroom>> {
        let classrooms = Classrooms::find()
            .filter(ClassroomColumn::SchoolId.eq(school_id))
            .order_by_asc(ClassroomColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolHubError::from_db("查询学校班级失败", e))?;

        Ok(classrooms.into_iter().map(|m| m.into_classroom()).collect())
    }

    pub async fn list_school_educators_impl(&self, school_id: i64) -> Result<Vec<Educator>> {
        let educators = Educators::find()
            .filter(EducatorColumn::SchoolId.eq(school_id))
            .order_by_asc(EducatorColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolHubError::from_db("查询学校教师失败", e))?;

        Ok(educators.into_iter().map(|m| m.into_educator()).collect())
    }

    /// 学校的学生 = 学校下所有班级的学生
    pub async fn list_school_students_impl(&self, school_id: i64) -> Result<Vec<Student>> {
        let students = Students::find()
            .inner_join(Classrooms)
            .filter(ClassroomColumn::SchoolId.eq(school_id))
            .order_by_asc(StudentColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolHubError::from_db("查询学校学生失败", e))?;

        Ok(students.into_iter().map(|m| m.into_student()).collect())
    }

    // ==================== 教师 ====================

    /// 创建教师，并在同一事务中创建其个人网盘
    pub async fn create_educator_impl(&self, req: CreateEducatorRequest) -> Result<Educator> {
        validate_account(&req.username, &req.email)?;
        if req.name.trim().is_empty() {
            return Err(SchoolHubError::validation("教师姓名不能为空"));
        }
        let password = hash_password(&req.password)?;

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolHubError::from_db("开启事务失败", e))?;

        let educator = EducatorActiveModel {
            name: Set(req.name),
            username: Set(req.username),
            email: Set(req.email),
            password: Set(password),
            school_id: Set(req.school_id),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| SchoolHubError::from_db("创建教师失败", e))?;

        let drive = DriveActiveModel {
            educator_id: Set(educator.id),
            classroom_id: Set(None),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| SchoolHubError::from_db("创建教师网盘失败", e))?;

        txn.commit()
            .await
            .map_err(|e| SchoolHubError::from_db("提交事务失败", e))?;

        debug!("教师已创建 (ID: {}, 网盘 ID: {})", educator.id, drive.id);

        Ok(educator.into_educator())
    }

    pub async fn get_educator_by_id_impl(&self, id: i64) -> Result<Educator> {
        Educators::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolHubError::from_db("查询教师失败", e))?
            .map(|m| m.into_educator())
            .ok_or_else(|| SchoolHubError::not_found(format!("教师不存在 (ID: {id})")))
    }

    pub async fn get_educator_by_username_impl(&self, username: &str) -> Result<Option<Educator>> {
        let result = Educators::find()
            .filter(EducatorColumn::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| SchoolHubError::from_db("查询教师失败", e))?;

        Ok(result.map(|m| m.into_educator()))
    }

    /// 教师个人网盘：classroom_id 为空的那个网盘
    pub async fn get_educator_drive_impl(&self, educator_id: i64) -> Result<Drive> {
        Drives::find()
            .filter(DriveColumn::EducatorId.eq(educator_id))
            .filter(DriveColumn::ClassroomId.is_null())
            .order_by_asc(DriveColumn::Id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolHubError::from_db("查询教师网盘失败", e))?
            .map(|m| m.into_drive())
            .ok_or_else(|| {
                SchoolHubError::not_found(format!("教师网盘不存在 (教师 ID: {educator_id})"))
            })
    }

    pub async fn list_educator_classrooms_impl(&self, educator_id: i64) -> Result<Vec<Classroom>> {
        let classrooms = Classrooms::find()
            .filter(ClassroomColumn::EducatorId.eq(educator_id))
            .order_by_asc(ClassroomColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolHubError::from_db("查询教师班级失败", e))?;

        Ok(classrooms.into_iter().map(|m| m.into_classroom()).collect())
    }

    pub async fn list_educator_assessments_impl(
        &self,
        educator_id: i64,
    ) -> Result<Vec<Assessment>> {
        let assessments = Assessments::find()
            .filter(AssessmentColumn::EducatorId.eq(educator_id))
            .order_by_asc(AssessmentColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolHubError::from_db("查询教师测验失败", e))?;

        Ok(assessments.into_iter().map(|m| m.into_assessment()).collect())
    }

    // ==================== 学生 ====================

    /// 创建学生，所属班级必须存在
    pub async fn create_student_impl(&self, req: CreateStudentRequest) -> Result<Student> {
        validate_account(&req.username, &req.email)?;

        let model = StudentActiveModel {
            username: Set(req.username),
            email: Set(req.email),
            password: Set(hash_password(&req.password)?),
            classroom_id: Set(req.classroom_id),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolHubError::from_db("创建学生失败", e))?;

        Ok(result.into_student())
    }

    pub async fn get_student_by_id_impl(&self, id: i64) -> Result<Student> {
        Students::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolHubError::from_db("查询学生失败", e))?
            .map(|m| m.into_student())
            .ok_or_else(|| SchoolHubError::not_found(format!("学生不存在 (ID: {id})")))
    }

    pub async fn get_student_by_username_impl(&self, username: &str) -> Result<Option<Student>> {
        let result = Students::find()
            .filter(StudentColumn::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| SchoolHubError::from_db("查询学生失败", e))?;

        Ok(result.map(|m| m.into_student()))
    }
}

#[cfg(test)]
mod tests {
    use super::super::{fixtures, memory_storage};
    use crate::entity::drives::Entity as Drives;
    use crate::entity::educators::Entity as Educators;
    use crate::models::common::Credentials;
    use crate::models::schools::requests::{
        CreateOwnerRequest, CreateSchoolRequest, CreateStudentRequest,
    };
    use crate::storage::Storage;
    use sea_orm::{EntityTrait, PaginatorTrait};

    #[tokio::test]
    async fn test_student_with_unknown_classroom_violates_foreign_key() {
        let storage = memory_storage().await;
        let err = storage
            .create_student(CreateStudentRequest {
                username: "lisa".into(),
                email: "lisa@students.edu".into(),
                password: "pw".into(),
                classroom_id: 999,
            })
            .await
            .unwrap_err();

        assert!(err.is_integrity());
        assert_eq!(err.code(), "E004");
        assert!(storage.get_student_by_username("lisa").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_owner_has_at_most_one_school() {
        let storage = memory_storage().await;
        let school = fixtures::seed_school(&storage).await;

        let owner = storage.get_owner_by_id(school.owner_id).await.unwrap();
        assert!(owner.check_password("owner-pw"));
        assert_eq!(
            storage.get_school_by_owner(owner.id).await.unwrap(),
            Some(school.clone())
        );

        let err = storage
            .create_school(CreateSchoolRequest {
                name: "Second Campus".into(),
                owner_id: owner.id,
            })
            .await
            .unwrap_err();
        assert!(err.is_integrity());
    }

    #[tokio::test]
    async fn test_duplicate_owner_email_rejected() {
        let storage = memory_storage().await;
        fixtures::seed_school(&storage).await;

        let err = storage
            .create_owner(CreateOwnerRequest {
                username: "vice".into(),
                email: "principal@school.edu".into(),
                password: "pw".into(),
            })
            .await
            .unwrap_err();
        assert!(err.is_integrity());
    }

    #[tokio::test]
    async fn test_school_with_unknown_owner_violates_foreign_key() {
        let storage = memory_storage().await;
        let err = storage
            .create_school(CreateSchoolRequest {
                name: "Nowhere High".into(),
                owner_id: 404,
            })
            .await
            .unwrap_err();
        assert!(err.is_integrity());
    }

    #[tokio::test]
    async fn test_missing_lookups_are_not_found() {
        let storage = memory_storage().await;
        assert!(storage.get_owner_by_id(1).await.unwrap_err().is_not_found());
        assert!(storage.get_school_by_id(1).await.unwrap_err().is_not_found());
        assert!(storage.get_educator_by_id(1).await.unwrap_err().is_not_found());
        assert!(storage.get_student_by_id(1).await.unwrap_err().is_not_found());
        assert!(storage.get_educator_drive(1).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_educator_gets_personal_drive() {
        let storage = memory_storage().await;
        let school = fixtures::seed_school(&storage).await;
        let educator = fixtures::seed_educator(&storage, school.id, "krabappel").await;

        assert!(educator.check_password("educator-pw"));
        let drive = storage.get_educator_drive(educator.id).await.unwrap();
        assert_eq!(drive.educator_id, educator.id);
        assert!(!drive.is_classroom_drive());

        let found = storage
            .get_educator_by_username("krabappel")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, educator.id);
        assert_eq!(
            storage
                .list_school_educators(school.id)
                .await
                .unwrap()
                .len(),
            1
        );
    }

    #[tokio::test]
    async fn test_duplicate_educator_creates_no_drive() {
        let storage = memory_storage().await;
        let school = fixtures::seed_school(&storage).await;
        fixtures::seed_educator(&storage, school.id, "hoover").await;
        assert_eq!(Drives::find().count(&storage.db).await.unwrap(), 1);

        // 同名教师违反唯一约束，事务中不应写入网盘
        let err = storage
            .create_educator(crate::models::schools::requests::CreateEducatorRequest {
                name: "Another Hoover".into(),
                username: "hoover".into(),
                email: "other@school.edu".into(),
                password: "pw".into(),
                school_id: school.id,
            })
            .await
            .unwrap_err();
        assert!(err.is_integrity());
        assert_eq!(storage.list_school_educators(school.id).await.unwrap().len(), 1);
        assert_eq!(Drives::find().count(&storage.db).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_educator_in_unknown_school_creates_no_drive() {
        let storage = memory_storage().await;
        let err = storage
            .create_educator(crate::models::schools::requests::CreateEducatorRequest {
                name: "Drifter".into(),
                username: "drifter".into(),
                email: "drifter@school.edu".into(),
                password: "pw".into(),
                school_id: 55,
            })
            .await
            .unwrap_err();
        assert!(err.is_integrity());
        assert_eq!(Drives::find().count(&storage.db).await.unwrap(), 0);
        assert_eq!(Educators::find().count(&storage.db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_school_students_span_classrooms() {
        let storage = memory_storage().await;
        let school = fixtures::seed_school(&storage).await;
        let room_a = fixtures::seed_classroom(&storage, school.id, None, "4A").await;
        let room_b = fixtures::seed_classroom(&storage, school.id, None, "4B").await;

        let bart = fixtures::seed_student(&storage, room_a.id, "bart").await;
        let milhouse = fixtures::seed_student(&storage, room_b.id, "milhouse").await;
        assert!(bart.check_password("student-pw"));

        let students = storage.list_school_students(school.id).await.unwrap();
        let ids: Vec<i64> = students.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![bart.id, milhouse.id]);

        let classrooms = storage.list_school_classrooms(school.id).await.unwrap();
        assert_eq!(classrooms, vec![room_a, room_b]);
    }

    #[tokio::test]
    async fn test_duplicate_student_username_rejected() {
        let storage = memory_storage().await;
        let school = fixtures::seed_school(&storage).await;
        let room = fixtures::seed_classroom(&storage, school.id, None, "4A").await;
        fixtures::seed_student(&storage, room.id, "nelson").await;

        let err = storage
            .create_student(CreateStudentRequest {
                username: "nelson".into(),
                email: "haw-haw@students.edu".into(),
                password: "pw".into(),
                classroom_id: room.id,
            })
            .await
            .unwrap_err();
        assert!(err.is_integrity());
    }
}
