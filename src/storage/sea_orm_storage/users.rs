use super::SeaOrmStorage;
use crate::entity::materials::{Column as MaterialColumn, Entity as Materials};
use crate::entity::user_materials::{
    ActiveModel as UserMaterialActiveModel, Column as UserMaterialColumn,
    Entity as UserMaterials,
};
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{Result, SchoolHubError};
use crate::models::{
    drives::entities::Material,
    users::{entities::User, requests::CreateUserRequest},
};
use crate::utils::{hash_password, validate_email, validate_username};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::debug;

const USERNAME_MAX_LEN: usize = 32;
const EMAIL_MAX_LEN: usize = 64;

impl SeaOrmStorage {
    /// 创建用户
    pub async fn create_user_impl(&self, req: CreateUserRequest) -> Result<User> {
        validate_username(&req.username, USERNAME_MAX_LEN).map_err(SchoolHubError::validation)?;
        if let Some(ref email) = req.email {
            validate_email(email, EMAIL_MAX_LEN).map_err(SchoolHubError::validation)?;
        }

        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            username: Set(req.username),
            email: Set(req.email),
            password: Set(Some(hash_password(&req.password)?)),
            role: Set(req.role.to_string()),
            jwt_auth_active: Set(false),
            date_joined: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolHubError::from_db("创建用户失败", e))?;

        debug!("用户已创建 (ID: {}, username: {})", result.id, result.username);

        Ok(result.into_user())
    }

    /// 保存用户：新记录插入，已有记录整行更新
    pub async fn save_user_impl(&self, user: User) -> Result<User> {
        let id = user.id;
        let is_new = user.is_new();

        let mut model = ActiveModel {
            username: Set(user.username),
            email: Set(user.email),
            password: Set(user.password_hash),
            role: Set(user.role.to_string()),
            jwt_auth_active: Set(user.jwt_auth_active),
            date_joined: Set(user.date_joined.timestamp()),
            ..Default::default()
        };

        let saved = if is_new {
            model
                .insert(&self.db)
                .await
                .map_err(|e| SchoolHubError::from_db("创建用户失败", e))?
        } else {
            model.id = Set(id);
            model
                .update(&self.db)
                .await
                .map_err(|e| SchoolHubError::from_db(format!("更新用户失败 (ID: {id})"), e))?
        };

        Ok(saved.into_user())
    }

    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<User> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolHubError::from_db("查询用户失败", e))?;

        result
            .map(|m| m.into_user())
            .ok_or_else(|| SchoolHubError::not_found(format!("用户不存在 (ID: {id})")))
    }

    /// 通过邮箱获取用户
    pub async fn get_user_by_email_impl(&self, email: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Email.eq(email))
            .order_by_asc(Column::Id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolHubError::from_db("查询用户失败", e))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过用户名获取用户
    pub async fn get_user_by_username_impl(&self, username: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Username.eq(username))
            .order_by_asc(Column::Id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolHubError::from_db("查询用户失败", e))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 删除用户
    pub async fn delete_user_impl(&self, id: i64) -> Result<bool> {
        let result = Users::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolHubError::from_db("删除用户失败", e))?;

        Ok(result.rows_affected > 0)
    }

    /// 统计用户数量
    pub async fn count_users_impl(&self) -> Result<u64> {
        let count = Users::find()
            .count(&self.db)
            .await
            .map_err(|e| SchoolHubError::from_db("统计用户数量失败", e))?;

        Ok(count)
    }

    /// 授予用户访问资料
    pub async fn grant_material_to_user_impl(&self, user_id: i64, material_id: i64) -> Result<()> {
        let model = UserMaterialActiveModel {
            user_id: Set(user_id),
            material_id: Set(material_id),
        };

        UserMaterials::insert(model)
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| SchoolHubError::from_db("授予资料权限失败", e))?;

        Ok(())
    }

    /// 撤销用户访问资料
    pub async fn revoke_material_from_user_impl(
        &self,
        user_id: i64,
        material_id: i64,
    ) -> Result<bool> {
        let result = UserMaterials::delete_many()
            .filter(UserMaterialColumn::UserId.eq(user_id))
            .filter(UserMaterialColumn::MaterialId.eq(material_id))
            .exec(&self.db)
            .await
            .map_err(|e| SchoolHubError::from_db("撤销资料权限失败", e))?;

        Ok(result.rows_affected > 0)
    }

    /// 列出用户可访问的资料
    pub async fn list_user_materials_impl(&self, user_id: i64) -> Result<Vec<Material>> {
        let user = Users::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolHubError::from_db("查询用户失败", e))?
            .ok_or_else(|| SchoolHubError::not_found(format!("用户不存在 (ID: {user_id})")))?;

        let materials = user
            .find_related(Materials)
            .order_by_asc(MaterialColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolHubError::from_db("查询用户资料失败", e))?;

        Ok(materials.into_iter().map(|m| m.into_material()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures;
    use super::super::memory_storage;
    use crate::models::users::entities::{User, UserRole};
    use crate::models::users::requests::CreateUserRequest;
    use crate::storage::Storage;

    fn alice_request() -> CreateUserRequest {
        CreateUserRequest {
            username: "alice".into(),
            email: Some("a@x.com".into()),
            password: "plain-text-pw".into(),
            role: UserRole::Student,
        }
    }

    #[tokio::test]
    async fn test_created_user_checks_plaintext_password() {
        let storage = memory_storage().await;
        let created = storage.create_user(alice_request()).await.unwrap();

        let loaded = storage.get_user_by_id(created.id).await.unwrap();
        assert!(loaded.check_password("plain-text-pw"));
        assert!(!loaded.check_password("other-pw"));
        assert_ne!(loaded.password_hash.as_deref(), Some("plain-text-pw"));
    }

    #[tokio::test]
    async fn test_get_user_by_missing_id_is_not_found() {
        let storage = memory_storage().await;
        let err = storage.get_user_by_id(4242).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.code(), "E006");
    }

    #[tokio::test]
    async fn test_save_inserts_then_updates() {
        let storage = memory_storage().await;

        let mut user = User::new("bob", None, UserRole::Educator);
        user.set_password("hunter2").unwrap();
        assert!(user.is_new());
        let mut saved = storage.save_user(user).await.unwrap();
        assert!(saved.id > 0);
        assert!(!saved.is_new());
        assert!(!saved.check_jwt_auth_active());

        saved.update_email("bob@school.edu");
        saved.update_username("bobby");
        saved.set_jwt_auth_active(true);
        let updated = storage.save_user(saved.clone()).await.unwrap();
        assert_eq!(updated.id, saved.id);

        let loaded = storage.get_user_by_id(saved.id).await.unwrap();
        assert_eq!(loaded.username, "bobby");
        assert_eq!(loaded.email.as_deref(), Some("bob@school.edu"));
        assert!(loaded.check_jwt_auth_active());
        assert!(loaded.check_password("hunter2"));
        assert_eq!(loaded.role, UserRole::Educator);
        assert_eq!(storage.count_users().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_save_unknown_id_is_not_found() {
        let storage = memory_storage().await;
        let mut ghost = User::new("ghost", None, UserRole::Student);
        ghost.id = 999;
        let err = storage.save_user(ghost).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_lookup_by_email_and_username() {
        let storage = memory_storage().await;
        let created = storage.create_user(alice_request()).await.unwrap();

        let by_email = storage.get_user_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(by_email.id, created.id);
        let by_name = storage.get_user_by_username("alice").await.unwrap().unwrap();
        assert_eq!(by_name.id, created.id);

        assert!(storage.get_user_by_email("z@x.com").await.unwrap().is_none());
        assert!(storage.get_user_by_username("zed").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_to_json_of_stored_user() {
        let storage = memory_storage().await;
        let created = storage.create_user(alice_request()).await.unwrap();
        let expected = format!(
            r#"{{"_id":{},"username":"alice","email":"a@x.com"}}"#,
            created.id
        );
        assert_eq!(created.to_json().unwrap(), expected);
    }

    #[tokio::test]
    async fn test_create_user_rejects_bad_email() {
        let storage = memory_storage().await;
        let mut req = alice_request();
        req.email = Some("not-an-email".into());
        let err = storage.create_user(req).await.unwrap_err();
        assert_eq!(err.code(), "E005");
        assert_eq!(storage.count_users().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_user() {
        let storage = memory_storage().await;
        let created = storage.create_user(alice_request()).await.unwrap();
        assert!(storage.delete_user(created.id).await.unwrap());
        assert!(!storage.delete_user(created.id).await.unwrap());
        assert!(storage.get_user_by_id(created.id).await.is_err());
    }

    #[tokio::test]
    async fn test_user_material_grants() {
        let storage = memory_storage().await;
        let school = fixtures::seed_school(&storage).await;
        let educator = fixtures::seed_educator(&storage, school.id, "mrsmith").await;
        let drive = storage.get_educator_drive(educator.id).await.unwrap();
        let notes = fixtures::seed_material(&storage, drive.id, "notes.pdf").await;
        let slides = fixtures::seed_material(&storage, drive.id, "slides.pdf").await;
        let user = storage.create_user(alice_request()).await.unwrap();

        storage.grant_material_to_user(user.id, notes.id).await.unwrap();
        storage.grant_material_to_user(user.id, slides.id).await.unwrap();

        let duplicate = storage
            .grant_material_to_user(user.id, notes.id)
            .await
            .unwrap_err();
        assert!(duplicate.is_integrity());

        let materials = storage.list_user_materials(user.id).await.unwrap();
        assert_eq!(materials, vec![notes.clone(), slides.clone()]);

        assert!(storage.revoke_material_from_user(user.id, notes.id).await.unwrap());
        assert!(!storage.revoke_material_from_user(user.id, notes.id).await.unwrap());
        assert_eq!(storage.list_user_materials(user.id).await.unwrap(), vec![slides]);
    }

    #[tokio::test]
    async fn test_grant_unknown_material_violates_foreign_key() {
        let storage = memory_storage().await;
        let user = storage.create_user(alice_request()).await.unwrap();
        let err = storage.grant_material_to_user(user.id, 777).await.unwrap_err();
        assert!(err.is_integrity());
    }
}
