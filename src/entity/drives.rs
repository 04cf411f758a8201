//! 网盘实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "drives")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub educator_id: i64,
    #[sea_orm(unique)]
    pub classroom_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
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
    #[sea_orm(has_many = "super::materials::Entity")]
    Materials,
    #[sea_orm(has_many = "super::assessments::Entity")]
    Assessments,
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

impl Related<super::materials::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Materials.def()
    }
}

impl Related<super::assessments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assessments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_drive(self) -> crate::models::drives::entities::Drive {
        crate::models::drives::entities::Drive {
            id: self.id,
            educator_id: self.educator_id,
            classroom_id: self.classroom_id,
        }
    }
}
