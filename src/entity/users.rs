//! 用户实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub username: String,
    pub email: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub password: Option<String>,
    pub role: String,
    pub jwt_auth_active: bool,
    pub date_joined: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_materials::Entity")]
    UserMaterials,
}

impl Related<super::user_materials::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserMaterials.def()
    }
}

// 用户 <-> 资料（多对多，经 user_materials）
impl Related<super::materials::Entity> for Entity {
    fn to() -> RelationDef {
        super::user_materials::Relation::Material.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::user_materials::Relation::User.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_user(self) -> crate::models::users::entities::User {
        use crate::models::users::entities::{User, UserRole};

        User {
            id: self.id,
            username: self.username,
            email: self.email,
            password_hash: self.password,
            role: self.role.parse::<UserRole>().unwrap_or(UserRole::Student),
            jwt_auth_active: self.jwt_auth_active,
            date_joined: super::from_timestamp(self.date_joined),
        }
    }
}
