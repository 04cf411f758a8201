//! 学习资料实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "materials")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub drive_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::drives::Entity",
        from = "Column::DriveId",
        to = "super::drives::Column::Id"
    )]
    Drive,
    #[sea_orm(has_many = "super::classroom_materials::Entity")]
    ClassroomMaterials,
    #[sea_orm(has_many = "super::user_materials::Entity")]
    UserMaterials,
}

impl Related<super::drives::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Drive.def()
    }
}

impl Related<super::classroom_materials::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ClassroomMaterials.def()
    }
}

impl Related<super::user_materials::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserMaterials.def()
    }
}

impl Related<super::classrooms::Entity> for Entity {
    fn to() -> RelationDef {
        super::classroom_materials::Relation::Classroom.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::classroom_materials::Relation::Material.def().rev())
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        super::user_materials::Relation::User.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::user_materials::Relation::Material.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_material(self) -> crate::models::drives::entities::Material {
        crate::models::drives::entities::Material {
            id: self.id,
            name: self.name,
            drive_id: self.drive_id,
        }
    }
}
