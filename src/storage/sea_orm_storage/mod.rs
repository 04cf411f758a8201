//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod assessments;
mod chats;
mod classrooms;
mod drives;
#[cfg(test)]
mod fixtures;
mod grades;
mod schools;
mod submissions;
mod token_blocklist;
mod users;

use crate::config::{AppConfig, DatabaseConfig};
use crate::errors::{Result, SchoolHubError};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 使用全局配置创建存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        Self::connect(&config.database).await
    }

    /// 按给定数据库配置连接并运行迁移
    pub async fn connect(database: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(&database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, database).await?
        } else {
            Self::connect_generic(&db_url, database).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化，强制开启外键约束）
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| SchoolHubError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.pool_size.max(1))
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| SchoolHubError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.timeout))
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| SchoolHubError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(SchoolHubError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, :memory: 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

/// 测试用内存数据库（单连接，保证所有查询落在同一个库上）
#[cfg(test)]
pub(crate) async fn memory_storage() -> SeaOrmStorage {
    let config = DatabaseConfig {
        url: ":memory:".to_string(),
        pool_size: 1,
        timeout: 5,
    };
    SeaOrmStorage::connect(&config)
        .await
        .expect("in-memory sqlite should migrate")
}

// Storage trait 实现
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
use crate::storage::Storage;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn save_user(&self, user: User) -> Result<User> {
        self.save_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<User> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    async fn grant_material_to_user(&self, user_id: i64, material_id: i64) -> Result<()> {
        self.grant_material_to_user_impl(user_id, material_id).await
    }

    async fn revoke_material_from_user(&self, user_id: i64, material_id: i64) -> Result<bool> {
        self.revoke_material_from_user_impl(user_id, material_id)
            .await
    }

    async fn list_user_materials(&self, user_id: i64) -> Result<Vec<Material>> {
        self.list_user_materials_impl(user_id).await
    }

    // 黑名单模块
    async fn block_token(&self, token: &str) -> Result<BlockedToken> {
        self.block_token_impl(token).await
    }

    async fn is_token_blocked(&self, token: &str) -> Result<bool> {
        self.is_token_blocked_impl(token).await
    }

    async fn purge_blocked_tokens(&self, before: DateTime<Utc>) -> Result<u64> {
        self.purge_blocked_tokens_impl(before).await
    }

    // 学校模块
    async fn create_owner(&self, owner: CreateOwnerRequest) -> Result<Owner> {
        self.create_owner_impl(owner).await
    }

    async fn get_owner_by_id(&self, id: i64) -> Result<Owner> {
        self.get_owner_by_id_impl(id).await
    }

    async fn create_school(&self, school: CreateSchoolRequest) -> Result<School> {
        self.create_school_impl(school).await
    }

    async fn get_school_by_id(&self, id: i64) -> Result<School> {
        self.get_school_by_id_impl(id).await
    }

    async fn get_school_by_owner(&self, owner_id: i64) -> Result<Option<School>> {
        self.get_school_by_owner_impl(owner_id).await
    }

    async fn list_school_classrooms(&self, school_id: i64) -> Result<Vec<Classroom>> {
        self.list_school_classrooms_impl(school_id).await
    }

    async fn list_school_educators(&self, school_id: i64) -> Result<Vec<Educator>> {
        self.list_school_educators_impl(school_id).await
    }

    async fn list_school_students(&self, school_id: i64) -> Result<Vec<Student>> {
        self.list_school_students_impl(school_id).await
    }

    // 教师模块
    async fn create_educator(&self, educator: CreateEducatorRequest) -> Result<Educator> {
        self.create_educator_impl(educator).await
    }

    async fn get_educator_by_id(&self, id: i64) -> Result<Educator> {
        self.get_educator_by_id_impl(id).await
    }

    async fn get_educator_by_username(&self, username: &str) -> Result<Option<Educator>> {
        self.get_educator_by_username_impl(username).await
    }

    async fn get_educator_drive(&self, educator_id: i64) -> Result<Drive> {
        self.get_educator_drive_impl(educator_id).await
    }

    async fn list_educator_classrooms(&self, educator_id: i64) -> Result<Vec<Classroom>> {
        self.list_educator_classrooms_impl(educator_id).await
    }

    async fn list_educator_assessments(&self, educator_id: i64) -> Result<Vec<Assessment>> {
        self.list_educator_assessments_impl(educator_id).await
    }

    // 学生模块
    async fn create_student(&self, student: CreateStudentRequest) -> Result<Student> {
        self.create_student_impl(student).await
    }

    async fn get_student_by_id(&self, id: i64) -> Result<Student> {
        self.get_student_by_id_impl(id).await
    }

    async fn get_student_by_username(&self, username: &str) -> Result<Option<Student>> {
        self.get_student_by_username_impl(username).await
    }

    // 班级模块
    async fn create_classroom(&self, classroom: CreateClassroomRequest) -> Result<Classroom> {
        self.create_classroom_impl(classroom).await
    }

    async fn get_classroom_by_id(&self, id: i64) -> Result<Classroom> {
        self.get_classroom_by_id_impl(id).await
    }

    async fn get_classroom_drive(&self, classroom_id: i64) -> Result<Option<Drive>> {
        self.get_classroom_drive_impl(classroom_id).await
    }

    async fn assign_classroom_chatroom(
        &self,
        classroom_id: i64,
        chatroom_id: Option<i64>,
    ) -> Result<Classroom> {
        self.assign_classroom_chatroom_impl(classroom_id, chatroom_id)
            .await
    }

    async fn list_classroom_students(&self, classroom_id: i64) -> Result<Vec<Student>> {
        self.list_classroom_students_impl(classroom_id).await
    }

    async fn list_classroom_assessments(&self, classroom_id: i64) -> Result<Vec<Assessment>> {
        self.list_classroom_assessments_impl(classroom_id).await
    }

    async fn list_classroom_materials(&self, classroom_id: i64) -> Result<Vec<Material>> {
        self.list_classroom_materials_impl(classroom_id).await
    }

    // 网盘模块
    async fn get_drive_by_id(&self, id: i64) -> Result<Drive> {
        self.get_drive_by_id_impl(id).await
    }

    async fn create_material(&self, material: CreateMaterialRequest) -> Result<Material> {
        self.create_material_impl(material).await
    }

    async fn list_drive_materials(&self, drive_id: i64) -> Result<Vec<Material>> {
        self.list_drive_materials_impl(drive_id).await
    }

    async fn share_material_with_classroom(
        &self,
        material_id: i64,
        classroom_id: i64,
    ) -> Result<()> {
        self.share_material_with_classroom_impl(material_id, classroom_id)
            .await
    }

    async fn delete_material(&self, id: i64) -> Result<bool> {
        self.delete_material_impl(id).await
    }

    // 测验模块
    async fn create_assessment(&self, assessment: CreateAssessmentRequest) -> Result<Assessment> {
        self.create_assessment_impl(assessment).await
    }

    async fn get_assessment_by_id(&self, id: i64) -> Result<Assessment> {
        self.get_assessment_by_id_impl(id).await
    }

    async fn set_assessment_active(&self, id: i64, active: bool) -> Result<Assessment> {
        self.set_assessment_active_impl(id, active).await
    }

    async fn add_question(&self, question: CreateQuestionRequest) -> Result<Question> {
        self.add_question_impl(question).await
    }

    async fn list_assessment_questions(&self, assessment_id: i64) -> Result<Vec<Question>> {
        self.list_assessment_questions_impl(assessment_id).await
    }

    // 答卷模块
    async fn create_submission(&self, submission: CreateSubmissionRequest) -> Result<Submission> {
        self.create_submission_impl(submission).await
    }

    async fn get_submission_by_id(&self, id: i64) -> Result<Submission> {
        self.get_submission_by_id_impl(id).await
    }

    async fn update_submission_status(
        &self,
        id: i64,
        status: SubmissionStatus,
    ) -> Result<Submission> {
        self.update_submission_status_impl(id, status).await
    }

    async fn list_assessment_submissions(&self, assessment_id: i64) -> Result<Vec<Submission>> {
        self.list_assessment_submissions_impl(assessment_id).await
    }

    async fn list_student_submissions(&self, student_id: i64) -> Result<Vec<Submission>> {
        self.list_student_submissions_impl(student_id).await
    }

    // 成绩模块
    async fn create_gradebook(&self, gradebook: CreateGradebookRequest) -> Result<Gradebook> {
        self.create_gradebook_impl(gradebook).await
    }

    async fn add_student_to_gradebook(&self, gradebook_id: i64, student_id: i64) -> Result<()> {
        self.add_student_to_gradebook_impl(gradebook_id, student_id)
            .await
    }

    async fn list_gradebook_students(&self, gradebook_id: i64) -> Result<Vec<Student>> {
        self.list_gradebook_students_impl(gradebook_id).await
    }

    async fn record_grade(&self, grade: CreateGradeRequest) -> Result<Grade> {
        self.record_grade_impl(grade).await
    }

    async fn list_gradebook_grades(&self, gradebook_id: i64) -> Result<Vec<Grade>> {
        self.list_gradebook_grades_impl(gradebook_id).await
    }

    async fn list_student_grades(&self, student_id: i64) -> Result<Vec<Grade>> {
        self.list_student_grades_impl(student_id).await
    }

    // 聊天室模块
    async fn create_chatroom(&self, educator_id: i64) -> Result<Chatroom> {
        self.create_chatroom_impl(educator_id).await
    }

    async fn get_chatroom_by_id(&self, id: i64) -> Result<Chatroom> {
        self.get_chatroom_by_id_impl(id).await
    }

    async fn list_chatroom_classrooms(&self, chatroom_id: i64) -> Result<Vec<Classroom>> {
        self.list_chatroom_classrooms_impl(chatroom_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_database_url() {
        assert_eq!(
            SeaOrmStorage::build_database_url(":memory:").unwrap(),
            "sqlite::memory:"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url("data/school.db").unwrap(),
            "sqlite://data/school.db?mode=rwc"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url("postgres://u:p@localhost/school").unwrap(),
            "postgres://u:p@localhost/school"
        );
        let err = SeaOrmStorage::build_database_url("redis://localhost").unwrap_err();
        assert_eq!(err.code(), "E001");
    }

    #[tokio::test]
    async fn test_migrations_create_schema() {
        let storage = memory_storage().await;
        assert_eq!(storage.count_users().await.unwrap(), 0);
    }
}
