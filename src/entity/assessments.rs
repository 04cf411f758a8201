//! 测验实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "assessments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub active: bool,
    pub drive_id: i64,
    pub educator_id: i64,
    pub classroom_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::drives::Entity",
        from = "Column::DriveId",
        to = "super::drives::Column::Id"
    )]
    Drive,
    #[sea_orm(
        belongs_to = "super::educators::Entity",
        from = "Column::EducatorId",
        to = "super::educators::Column::Id"
    )]
    Educator,
    #[sea_orm(
        belongs_to = "super::classrooms::Entity",
        from = "Column::ClassroomId",
        to = "super::classrooms::Column::Id"
    )]
    Classroom,
    #[sea_orm(has_many = "super::questions::Entity")]
    Questions,
    #[sea_orm(has_many = "super::submissions::Entity")]
    Submissions,
    #[sea_orm(has_many = "super::gradebooks::Entity")]
    Gradebooks,
    #[sea_orm(has_many = "super::grades::Entity")]
    Grades,
}

impl Related<super::drives::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Drive.def()
    }
}

impl Related<super::educators::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Educator.def()
    }
}

impl Related<super::classrooms::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Classroom.def()
    }
}

impl Related<super::questions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Questions.def()
    }
}

impl Related<super::submissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submissions.def()
    }
}

impl Related<super::gradebooks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Gradebooks.def()
    }
}

impl Related<super::grades::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Grades.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_assessment(self) -> crate::models::assessments::entities::Assessment {
        crate::models::assessments::entities::Assessment {
            id: self.id,
            title: self.title,
            description: self.description,
            active: self.active,
            drive_id: self.drive_id,
            educator_id: self.educator_id,
            classroom_id: self.classroom_id,
        }
    }
}
