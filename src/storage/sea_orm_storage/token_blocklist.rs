use super::SeaOrmStorage;
use crate::entity::jwt_token_blocklist::{ActiveModel, Column, Entity as TokenBlocklist};
use crate::errors::{Result, SchoolHubError};
use crate::models::auth::entities::BlockedToken;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};

impl SeaOrmStorage {
    /// 将令牌加入黑名单
    pub async fn block_token_impl(&self, token: &str) -> Result<BlockedToken> {
        if token.trim().is_empty() {
            return Err(SchoolHubError::validation("令牌不能为空"));
        }

        let model = ActiveModel {
            jwt_token: Set(token.to_string()),
            created_at: Set(Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolHubError::from_db("写入令牌黑名单失败", e))?;

        Ok(result.into_blocked_token())
    }

    /// 检查令牌是否已被拉黑
    pub async fn is_token_blocked_impl(&self, token: &str) -> Result<bool> {
        let count = TokenBlocklist::find()
            .filter(Column::JwtToken.eq(token))
            .count(&self.db)
            .await
            .map_err(|e| SchoolHubError::from_db("查询令牌黑名单失败", e))?;

        Ok(count > 0)
    }

    /// 清理早于指定时间的黑名单记录
    pub async fn purge_blocked_tokens_impl(&self, before: DateTime<Utc>) -> Result<u64> {
        let result = TokenBlocklist::delete_many()
            .filter(Column::CreatedAt.lt(before.timestamp()))
            .exec(&self.db)
            .await
            .map_err(|e| SchoolHubError::from_db("清理令牌黑名单失败", e))?;

        Ok(result.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use super::super::memory_storage;
    use crate::storage::Storage;
    use chrono::{Duration, Utc};

    #[tokio::test]
    async fn test_block_and_check_token() {
        let storage = memory_storage().await;
        assert!(!storage.is_token_blocked("abc.def.ghi").await.unwrap());

        let blocked = storage.block_token("abc.def.ghi").await.unwrap();
        assert!(blocked.id > 0);
        assert_eq!(blocked.to_string(), "Expired Token: abc.def.ghi");

        assert!(storage.is_token_blocked("abc.def.ghi").await.unwrap());
        assert!(!storage.is_token_blocked("other").await.unwrap());
    }

    #[tokio::test]
    async fn test_empty_token_rejected() {
        let storage = memory_storage().await;
        let err = storage.block_token("   ").await.unwrap_err();
        assert_eq!(err.code(), "E005");
    }

    #[tokio::test]
    async fn test_purge_only_removes_older_entries() {
        let storage = memory_storage().await;
        storage.block_token("first").await.unwrap();
        storage.block_token("second").await.unwrap();

        let purged = storage
            .purge_blocked_tokens(Utc::now() - Duration::days(1))
            .await
            .unwrap();
        assert_eq!(purged, 0);

        let purged = storage
            .purge_blocked_tokens(Utc::now() + Duration::seconds(5))
            .await
            .unwrap();
        assert_eq!(purged, 2);
        assert!(!storage.is_token_blocked("first").await.unwrap());
    }
}
