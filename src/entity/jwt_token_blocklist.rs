//! JWT 黑名单实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "jwt_token_blocklist")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub jwt_token: String,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_blocked_token(self) -> crate::models::auth::entities::BlockedToken {
        crate::models::auth::entities::BlockedToken {
            id: self.id,
            jwt_token: self.jwt_token,
            created_at: super::from_timestamp(self.created_at),
        }
    }
}
