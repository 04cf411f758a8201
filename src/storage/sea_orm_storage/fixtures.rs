//! 测试数据构造

use super::SeaOrmStorage;
use crate::models::{
    assessments::{entities::Assessment, requests::CreateAssessmentRequest},
    drives::{entities::Material, requests::CreateMaterialRequest},
    schools::{
        entities::{Classroom, Educator, School, Student},
        requests::{
            CreateClassroomRequest, CreateEducatorRequest, CreateOwnerRequest,
            CreateSchoolRequest, CreateStudentRequest,
        },
    },
};
use crate::storage::Storage;

pub(crate) async fn seed_school(storage: &SeaOrmStorage) -> School {
    let owner = storage
        .create_owner(CreateOwnerRequest {
            username: "principal".into(),
            email: "principal@school.edu".into(),
            password: "owner-pw".into(),
        })
        .await
        .unwrap();

    storage
        .create_school(CreateSchoolRequest {
            name: "Springfield Elementary".into(),
            owner_id: owner.id,
        })
        .await
        .unwrap()
}

pub(crate) async fn seed_educator(
    storage: &SeaOrmStorage,
    school_id: i64,
    username: &str,
) -> Educator {
    storage
        .create_educator(CreateEducatorRequest {
            name: format!("Educator {username}"),
            username: username.into(),
            email: format!("{username}@school.edu"),
            password: "educator-pw".into(),
            school_id,
        })
        .await
        .unwrap()
}

pub(crate) async fn seed_classroom(
    storage: &SeaOrmStorage,
    school_id: i64,
    educator_id: Option<i64>,
    name: &str,
) -> Classroom {
    storage
        .create_classroom(CreateClassroomRequest {
            name: name.into(),
            school_id,
            educator_id,
        })
        .await
        .unwrap()
}

pub(crate) async fn seed_student(
    storage: &SeaOrmStorage,
    classroom_id: i64,
    username: &str,
) -> Student {
    storage
        .create_student(CreateStudentRequest {
            username: username.into(),
            email: format!("{username}@students.edu"),
            password: "student-pw".into(),
            classroom_id,
        })
        .await
        .unwrap()
}

pub(crate) async fn seed_material(storage: &SeaOrmStorage, drive_id: i64, name: &str) -> Material {
    storage
        .create_material(CreateMaterialRequest {
            name: name.into(),
            drive_id,
        })
        .await
        .unwrap()
}

/// 在教师个人网盘中创建测验
pub(crate) async fn seed_assessment(
    storage: &SeaOrmStorage,
    educator_id: i64,
    classroom_id: Option<i64>,
    title: &str,
) -> Assessment {
    let drive = storage.get_educator_drive(educator_id).await.unwrap();
    storage
        .create_assessment(CreateAssessmentRequest {
            title: title.into(),
            description: None,
            drive_id: drive.id,
            educator_id,
            classroom_id,
        })
        .await
        .unwrap()
}
