use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::models::{
    assessments::{
        entities::{Assessment, Question, Submission, SubmissionStatus},
        requests::{CreateAssessmentRequest, CreateQuestionRequest, CreateSubmissionRequest},
    },
    auth::entities::BlockedToken,
    chats::entities::Chatroom,
    drives::{
        entities::{Drive, Material},
        requests::CreateMaterialRequest,
    },
    grades::{
        entities::{Grade, Gradebook},
        requests::{CreateGradeRequest, CreateGradebookRequest},
    },
    schools::{
        entities::{Classroom, Educator, Owner, School, Student},
        requests::{
            CreateClassroomRequest, CreateEducatorRequest, CreateOwnerRequest,
            CreateSchoolRequest, CreateStudentRequest,
        },
    },
    users::{entities::User, requests::CreateUserRequest},
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户（明文密码在此哈希）
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 保存用户：id 为 0 时插入，否则整行更新
    async fn save_user(&self, user: User) -> Result<User>;
    // 通过ID获取用户信息，不存在时返回 NotFound
    async fn get_user_by_id(&self, id: i64) -> Result<User>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 删除用户
    async fn delete_user(&self, id: i64) -> Result<bool>;
    // 统计用户数量
    async fn count_users(&self) -> Result<u64>;
    // 授予用户访问资料
    async fn grant_material_to_user(&self, user_id: i64, material_id: i64) -> Result<()>;
    // 撤销用户访问资料
    async fn revoke_material_from_user(&self, user_id: i64, material_id: i64) -> Result<bool>;
    // 列出用户可访问的资料
    async fn list_user_materials(&self, user_id: i64) -> Result<Vec<Material>>;

    /// JWT 黑名单方法
    // 将令牌加入黑名单
    async fn block_token(&self, token: &str) -> Result<BlockedToken>;
    // 令牌是否已被拉黑
    async fn is_token_blocked(&self, token: &str) -> Result<bool>;
    // 清理早于指定时间的黑名单记录
    async fn purge_blocked_tokens(&self, before: DateTime<Utc>) -> Result<u64>;

    /// 学校管理方法
    async fn create_owner(&self, owner: CreateOwnerRequest) -> Result<Owner>;
    async fn get_owner_by_id(&self, id: i64) -> Result<Owner>;
    async fn create_school(&self, school: CreateSchoolRequest) -> Result<School>;
    async fn get_school_by_id(&self, id: i64) -> Result<School>;
    async fn get_school_by_owner(&self, owner_id: i64) -> Result<Option<School>>;
    async fn list_school_classrooms(&self, school_id: i64) -> Result<Vec<Classroom>>;
    async fn list_school_educators(&self, school_id: i64) -> Result<Vec<Educator>>;
    // 学生通过班级间接归属学校
    async fn list_school_students(&self, school_id: i64) -> Result<Vec<Student>>;

    /// 教师管理方法
    // 创建教师并同时创建其个人网盘
    async fn create_educator(&self, educator: CreateEducatorRequest) -> Result<Educator>;
    async fn get_educator_by_id(&self, id: i64) -> Result<Educator>;
    async fn get_educator_by_username(&self, username: &str) -> Result<Option<Educator>>;
    // 获取教师个人网盘
    async fn get_educator_drive(&self, educator_id: i64) -> Result<Drive>;
    async fn list_educator_classrooms(&self, educator_id: i64) -> Result<Vec<Classroom>>;
    async fn list_educator_assessments(&self, educator_id: i64) -> Result<Vec<Assessment>>;

    /// 学生管理方法
    async fn create_student(&self, student: CreateStudentRequest) -> Result<Student>;
    async fn get_student_by_id(&self, id: i64) -> Result<Student>;
    async fn get_student_by_username(&self, username: &str) -> Result<Option<Student>>;

    /// 班级管理方法
    // 创建班级；指定教师时同时创建班级网盘
    async fn create_classroom(&self, classroom: CreateClassroomRequest) -> Result<Classroom>;
    async fn get_classroom_by_id(&self, id: i64) -> Result<Classroom>;
    async fn get_classroom_drive(&self, classroom_id: i64) -> Result<Option<Drive>>;
    async fn assign_classroom_chatroom(
        &self,
        classroom_id: i64,
        chatroom_id: Option<i64>,
    ) -> Result<Classroom>;
    async fn list_classroom_students(&self, classroom_id: i64) -> Result<Vec<Student>>;
    async fn list_classroom_assessments(&self, classroom_id: i64) -> Result<Vec<Assessment>>;
    async fn list_classroom_materials(&self, classroom_id: i64) -> Result<Vec<Material>>;

    /// 网盘与资料方法
    async fn get_drive_by_id(&self, id: i64) -> Result<Drive>;
    async fn create_material(&self, material: CreateMaterialRequest) -> Result<Material>;
    async fn list_drive_materials(&self, drive_id: i64) -> Result<Vec<Material>>;
    async fn share_material_with_classroom(&self, material_id: i64, classroom_id: i64)
    -> Result<()>;
    async fn delete_material(&self, id: i64) -> Result<bool>;

    /// 测验与题目方法
    async fn create_assessment(&self, assessment: CreateAssessmentRequest) -> Result<Assessment>;
    async fn get_assessment_by_id(&self, id: i64) -> Result<Assessment>;
    async fn set_assessment_active(&self, id: i64, active: bool) -> Result<Assessment>;
    async fn add_question(&self, question: CreateQuestionRequest) -> Result<Question>;
    async fn list_assessment_questions(&self, assessment_id: i64) -> Result<Vec<Question>>;

    /// 答卷方法
    // 提交答卷，按题目自动计分
    async fn create_submission(&self, submission: CreateSubmissionRequest) -> Result<Submission>;
    async fn get_submission_by_id(&self, id: i64) -> Result<Submission>;
    async fn update_submission_status(
        &self,
        id: i64,
        status: SubmissionStatus,
    ) -> Result<Submission>;
    async fn list_assessment_submissions(&self, assessment_id: i64) -> Result<Vec<Submission>>;
    async fn list_student_submissions(&self, student_id: i64) -> Result<Vec<Submission>>;

    /// 成绩方法
    async fn create_gradebook(&self, gradebook: CreateGradebookRequest) -> Result<Gradebook>;
    async fn add_student_to_gradebook(&self, gradebook_id: i64, student_id: i64) -> Result<()>;
    async fn list_gradebook_students(&self, gradebook_id: i64) -> Result<Vec<Student>>;
    async fn record_grade(&self, grade: CreateGradeRequest) -> Result<Grade>;
    async fn list_gradebook_grades(&self, gradebook_id: i64) -> Result<Vec<Grade>>;
    async fn list_student_grades(&self, student_id: i64) -> Result<Vec<Grade>>;

    /// 聊天室方法
    // 创建聊天频道与聊天室
    async fn create_chatroom(&self, educator_id: i64) -> Result<Chatroom>;
    async fn get_chatroom_by_id(&self, id: i64) -> Result<Chatroom>;
    async fn list_chatroom_classrooms(&self, chatroom_id: i64) -> Result<Vec<Classroom>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
