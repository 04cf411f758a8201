//! 班级实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "classrooms")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub school_id: i64,
    pub educator_id: Option<i64>,
    pub chatroom_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::schools::Entity",
        from = "Column::SchoolId",
        to = "super::schools::Column::Id"
    )]
    School,
    #[sea_orm(
        belongs_to = "super::educators::Entity",
        from = "Column::EducatorId",
        to = "super::educators::Column::Id"
    )]
    Educator,
    #[sea_orm(
        belongs_to = "super::chatrooms::Entity",
        from = "Column::ChatroomId",
        to = "super::chatrooms::Column::Id"
    )]
    Chatroom,
    #[sea_orm(has_many = "super::students::Entity")]
    Students,
    #[sea_orm(has_one = "super::drives::Entity")]
    Drive,
    #[sea_orm(has_many = "super::assessments::Entity")]
    Assessments,
    #[sea_orm(has_many = "super::classroom_materials::Entity")]
    ClassroomMaterials,
}

impl Related<super::schools::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::School.def()
    }
}

impl Related<super::educators::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Educator.def()
    }
}

impl Related<super::chatrooms::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Chatroom.def()
    }
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Students.def()
    }
}

impl Related<super::drives::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Drive.def()
    }
}

impl Related<super::assessments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assessments.def()
    }
}

impl Related<super::classroom_materials::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ClassroomMaterials.def()
    }
}

// 班级 <-> 资料（多对多，经 classroom_materials）
impl Related<super::materials::Entity> for Entity {
    fn to() -> RelationDef {
        super::classroom_materials::Relation::Material.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::classroom_materials::Relation::Classroom.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_classroom(self) -> crate::models::schools::entities::Classroom {
        crate::models::schools::entities::Classroom {
            id: self.id,
            name: self.name,
            school_id: self.school_id,
            educator_id: self.educator_id,
            chatroom_id: self.chatroom_id,
        }
    }
}
