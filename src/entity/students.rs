//! 学生实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password: String,
    pub classroom_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::classrooms::Entity",
        from = "Column::ClassroomId",
        to = "super::classrooms::Column::Id"
    )]
    Classroom,
    #[sea_orm(has_many = "super::submissions::Entity")]
    Submissions,
    #[sea_orm(has_many = "super::grades::Entity")]
    Grades,
    #[sea_orm(has_many = "super::gradebook_students::Entity")]
    GradebookStudents,
}

impl Related<super::classrooms::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Classroom.def()
    }
}

impl Related<super::submissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submissions.def()
    }
}

impl Related<super::grades::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Grades.def()
    }
}

impl Related<super::gradebook_students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GradebookStudents.def()
    }
}

// 学生 <-> 成绩册（多对多，经 gradebook_students）
impl Related<super::gradebooks::Entity> for Entity {
    fn to() -> RelationDef {
        super::gradebook_students::Relation::Gradebook.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::gradebook_students::Relation::Student.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_student(self) -> crate::models::schools::entities::Student {
        crate::models::schools::entities::Student {
            id: self.id,
            username: self.username,
            email: self.email,
            password_hash: self.password,
            classroom_id: self.classroom_id,
        }
    }
}
