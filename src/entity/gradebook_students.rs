//! 成绩册-学生 关联实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "gradebook_students")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub gradebook_id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub student_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::gradebooks::Entity",
        from = "Column::GradebookId",
        to = "super::gradebooks::Column::Id"
    )]
    Gradebook,
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id"
    )]
    Student,
}

impl Related<super::gradebooks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Gradebook.def()
    }
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
