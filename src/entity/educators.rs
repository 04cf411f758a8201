//! 教师实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "educators")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password: String,
    pub school_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::schools::Entity",
        from = "Column::SchoolId",
        to = "super::schools::Column::Id"
    )]
    School,
    #[sea_orm(has_many = "super::classrooms::Entity")]
    Classrooms,
    #[sea_orm(has_many = "super::assessments::Entity")]
    Assessments,
    #[sea_orm(has_many = "super::drives::Entity")]
    Drives,
    #[sea_orm(has_one = "super::chatrooms::Entity")]
    Chatroom,
    #[sea_orm(has_many = "super::gradebooks::Entity")]
    Gradebooks,
}

impl Related<super::schools::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::School.def()
    }
}

impl Related<super::classrooms::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Classrooms.def()
    }
}

impl Related<super::assessments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assessments.def()
    }
}

impl Related<super::drives::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Drives.def()
    }
}

impl Related<super::chatrooms::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Chatroom.def()
    }
}

impl Related<super::gradebooks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Gradebooks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_educator(self) -> crate::models::schools::entities::Educator {
        crate::models::schools::entities::Educator {
            id: self.id,
            name: self.name,
            username: self.username,
            email: self.email,
            password_hash: self.password,
            school_id: self.school_id,
        }
    }
}
