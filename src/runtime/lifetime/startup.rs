use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::users::entities::UserRole;
use crate::models::users::requests::CreateUserRequest;
use crate::storage::Storage;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
}

/// 生成随机密码
fn generate_random_password(length: usize) -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%";
    let mut rng = rand::rng();
    (0..length)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}

/// 数据库为空时创建默认管理员账号
async fn seed_admin(storage: &Arc<dyn Storage>) {
    match storage.count_users().await {
        Ok(count) if count > 0 => {
            debug!("Database already has {} user(s), skipping admin seed", count);
            return;
        }
        Ok(_) => {
            info!("No users found in database, creating default admin account...");
        }
        Err(e) => {
            warn!("Failed to count users: {}, skipping admin seed", e);
            return;
        }
    }

    let config = AppConfig::get();

    // 优先使用环境变量中的密码
    let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| {
        let pwd = generate_random_password(16);
        warn!("==========================================================");
        warn!("  ADMIN PASSWORD NOT SET - USING GENERATED PASSWORD");
        warn!("  Generated admin password: {}", pwd);
        warn!("  Please save this password or set ADMIN_PASSWORD env var");
        warn!("==========================================================");
        pwd
    });

    let admin_request = CreateUserRequest {
        username: config.auth.admin_username.clone(),
        email: Some(config.auth.admin_email.clone()),
        password,
        role: UserRole::Admin,
    };

    match storage.create_user(admin_request).await {
        Ok(user) => {
            info!(
                "Default admin account created successfully (ID: {}, username: {})",
                user.id, user.username
            );
        }
        Err(e) => {
            warn!("Failed to create admin account: {}", e);
        }
    }
}

/// 清理超过保留期的黑名单令牌
async fn purge_expired_tokens(storage: &Arc<dyn Storage>, retention_days: i64) {
    let Some(cutoff) = chrono::Duration::try_days(retention_days)
        .and_then(|retention| chrono::Utc::now().checked_sub_signed(retention))
    else {
        warn!(
            "Blocklist retention of {} day(s) is out of range, skipping purge",
            retention_days
        );
        return;
    };

    match storage.purge_blocked_tokens(cutoff).await {
        Ok(0) => debug!("No expired tokens in blocklist"),
        Ok(purged) => info!("Purged {} expired token(s) from blocklist", purged),
        Err(e) => warn!("Failed to purge token blocklist: {}", e),
    }
}

/// 准备启动上下文：连接数据库、运行迁移、初始化数据
pub async fn prepare_startup() -> Result<StartupContext> {
    let storage = crate::storage::create_storage().await?;
    info!("Storage backend initialized and migrations completed");

    seed_admin(&storage).await;

    let retention_days = AppConfig::get().auth.blocklist_retention_days;
    purge_expired_tokens(&storage, retention_days).await;

    Ok(StartupContext { storage })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::memory_storage;

    #[test]
    fn test_generated_password_uses_charset() {
        let pwd = generate_random_password(24);
        assert_eq!(pwd.len(), 24);
        assert!(pwd.chars().all(|c| c.is_ascii_graphic()));
    }

    #[tokio::test]
    async fn test_seed_admin_only_on_empty_database() {
        let storage: Arc<dyn Storage> = Arc::new(memory_storage().await);

        seed_admin(&storage).await;
        assert_eq!(storage.count_users().await.unwrap(), 1);

        let config = AppConfig::get();
        let admin = storage
            .get_user_by_username(&config.auth.admin_username)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(admin.role, UserRole::Admin);
        assert!(admin.password_hash.is_some());

        seed_admin(&storage).await;
        assert_eq!(storage.count_users().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_purge_keeps_recent_tokens() {
        let storage: Arc<dyn Storage> = Arc::new(memory_storage().await);
        storage.block_token("recent").await.unwrap();

        purge_expired_tokens(&storage, 30).await;
        assert!(storage.is_token_blocked("recent").await.unwrap());

        // 保留期为负数时，刚写入的令牌也已过期
        purge_expired_tokens(&storage, -1).await;
        assert!(!storage.is_token_blocked("recent").await.unwrap());
    }

    #[tokio::test]
    async fn test_out_of_range_retention_skips_purge() {
        let storage: Arc<dyn Storage> = Arc::new(memory_storage().await);
        storage.block_token("kept").await.unwrap();

        purge_expired_tokens(&storage, 1_000_000_000).await;
        purge_expired_tokens(&storage, i64::MIN).await;
        assert!(storage.is_token_blocked("kept").await.unwrap());
    }
}
