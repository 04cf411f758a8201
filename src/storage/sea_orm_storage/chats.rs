//! 聊天室存储操作

use super::SeaOrmStorage;
use crate::entity::chatrooms::{ActiveModel, Entity as Chatrooms};
use crate::entity::chats::ActiveModel as ChatActiveModel;
use crate::entity::classrooms::{Column as ClassroomColumn, Entity as Classrooms};
use crate::errors::{Result, SchoolHubError};
use crate::models::{chats::entities::Chatroom, schools::entities::Classroom};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建聊天频道并绑定为教师的聊天室（同一事务）
    pub async fn create_chatroom_impl(&self, educator_id: i64) -> Result<Chatroom> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolHubError::from_db("开启事务失败", e))?;

        let chat = ChatActiveModel {
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| SchoolHubError::from_db("创建聊天频道失败", e))?;

        let chatroom = ActiveModel {
            educator_id: Set(educator_id),
            chat_id: Set(chat.id),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| SchoolHubError::from_db("创建聊天室失败", e))?;

        txn.commit()
            .await
            .map_err(|e| SchoolHubError::from_db("提交事务失败", e))?;

        Ok(chatroom.into_chatroom())
    }

    pub async fn get_chatroom_by_id_impl(&self, id: i64) -> Result<Chatroom> {
        Chatrooms::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolHubError::from_db("查询聊天室失败", e))?
            .map(|m| m.into_chatroom())
            .ok_or_else(|| SchoolHubError::not_found(format!("聊天室不存在 (ID: {id})")))
    }

    pub async fn list_chatroom_classrooms_impl(&self, chatroom_id: i64) -> Result<Vec<Classroom>> {
        let classrooms = Classrooms::find()
            .filter(ClassroomColumn::ChatroomId.eq(chatroom_id))
            .order_by_asc(ClassroomColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolHubError::from_db("查询聊天室班级失败", e))?;

        Ok(classrooms.into_iter().map(|m| m.into_classroom()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::super::{fixtures, memory_storage};
    use crate::entity::chats::Entity as Chats;
    use crate::storage::Storage;
    use sea_orm::{EntityTrait, PaginatorTrait};

    #[tokio::test]
    async fn test_chatroom_per_educator() {
        let storage = memory_storage().await;
        let school = fixtures::seed_school(&storage).await;
        let educator = fixtures::seed_educator(&storage, school.id, "hoover").await;

        let chatroom = storage.create_chatroom(educator.id).await.unwrap();
        assert_eq!(chatroom.educator_id, educator.id);
        assert_eq!(storage.get_chatroom_by_id(chatroom.id).await.unwrap(), chatroom);

        // 每位教师只能有一个聊天室
        let err = storage.create_chatroom(educator.id).await.unwrap_err();
        assert!(err.is_integrity());
    }

    #[tokio::test]
    async fn test_chatroom_for_unknown_educator_rolls_back() {
        let storage = memory_storage().await;
        let err = storage.create_chatroom(321).await.unwrap_err();
        assert!(err.is_integrity());

        // 聊天频道已先行写入，回滚后不应残留
        assert_eq!(Chats::find().count(&storage.db).await.unwrap(), 0);

        let school = fixtures::seed_school(&storage).await;
        let educator = fixtures::seed_educator(&storage, school.id, "hoover").await;
        storage.create_chatroom(educator.id).await.unwrap();
        assert_eq!(Chats::find().count(&storage.db).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_chatroom_classrooms() {
        let storage = memory_storage().await;
        let school = fixtures::seed_school(&storage).await;
        let educator = fixtures::seed_educator(&storage, school.id, "hoover").await;
        let room_a = fixtures::seed_classroom(&storage, school.id, Some(educator.id), "2A").await;
        let room_b = fixtures::seed_classroom(&storage, school.id, Some(educator.id), "2B").await;
        fixtures::seed_classroom(&storage, school.id, None, "2C").await;
        let chatroom = storage.create_chatroom(educator.id).await.unwrap();

        let room_a = storage
            .assign_classroom_chatroom(room_a.id, Some(chatroom.id))
            .await
            .unwrap();
        let room_b = storage
            .assign_classroom_chatroom(room_b.id, Some(chatroom.id))
            .await
            .unwrap();

        assert_eq!(
            storage.list_chatroom_classrooms(chatroom.id).await.unwrap(),
            vec![room_a, room_b]
        );
    }
}
