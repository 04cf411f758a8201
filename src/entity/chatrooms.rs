//! 聊天室实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "chatrooms")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub educator_id: i64,
    #[sea_orm(unique)]
    pub chat_id: i64,
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
        belongs_to = "super::chats::Entity",
        from = "Column::ChatId",
        to = "super::chats::Column::Id"
    )]
    Chat,
    #[sea_orm(has_many = "super::classrooms::Entity")]
    Classrooms,
}

impl Related<super::educators::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Educator.def()
    }
}

impl Related<super::chats::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Chat.def()
    }
}

impl Related<super::classrooms::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Classrooms.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_chatroom(self) -> crate::models::chats::entities::Chatroom {
        crate::models::chats::entities::Chatroom {
            id: self.id,
            educator_id: self.educator_id,
            chat_id: self.chat_id,
        }
    }
}
