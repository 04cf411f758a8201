//! 成绩册实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "gradebooks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub educator_id: i64,
    pub assessment_id: i64,
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
        belongs_to = "super::assessments::Entity",
        from = "Column::AssessmentId",
        to = "super::assessments::Column::Id"
    )]
    Assessment,
    #[sea_orm(has_many = "super::grades::Entity")]
    Grades,
    #[sea_orm(has_many = "super::gradebook_students::Entity")]
    GradebookStudents,
}

impl Related<super::educators::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Educator.def()
    }
}

impl Related<super::assessments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assessment.def()
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

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        super::gradebook_students::Relation::Student.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::gradebook_students::Relation::Gradebook.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_gradebook(self) -> crate::models::grades::entities::Gradebook {
        crate::models::grades::entities::Gradebook {
            id: self.id,
            educator_id: self.educator_id,
            assessment_id: self.assessment_id,
        }
    }
}
