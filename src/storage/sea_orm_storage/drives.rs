//! 网盘与学习资料存储操作

use super::SeaOrmStorage;
use crate::entity::classroom_materials::{
    ActiveModel as ClassroomMaterialActiveModel, Entity as ClassroomMaterials,
};
use crate::entity::drives::Entity as Drives;
use crate::entity::materials::{ActiveModel, Column, Entity as Materials};
use crate::errors::{Result, SchoolHubError};
use crate::models::drives::{
    entities::{Drive, Material},
    requests::CreateMaterialRequest,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    pub async fn get_drive_by_id_impl(&self, id: i64) -> Result<Drive> {
        Drives::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolHubError::from_db("查询网盘失败", e))?
            .map(|m| m.into_drive())
            .ok_or_else(|| SchoolHubError::not_found(format!("网盘不存在 (ID: {id})")))
    }

    /// 在网盘中创建资料
    pub async fn create_material_impl(&self, req: CreateMaterialRequest) -> Result<Material> {
        if req.name.trim().is_empty() {
            return Err(SchoolHubError::validation("资料名称不能为空"));
        }

        let model = ActiveModel {
            name: Set(req.name),
            drive_id: Set(req.drive_id),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolHubError::from_db("创建资料失败", e))?;

        Ok(result.into_material())
    }

    pub async fn list_drive_materials_impl(&self, drive_id: i64) -> Result<Vec<Material>> {
        let materials = Materials::find()
            .filter(Column::DriveId.eq(drive_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolHubError::from_db("查询网盘资料失败", e))?;

        Ok(materials.into_iter().map(|m| m.into_material()).collect())
    }

    /// 将资料共享给班级
    pub async fn share_material_with_classroom_impl(
        &self,
        material_id: i64,
        classroom_id: i64,
    ) -> Result<()> {
        let model = ClassroomMaterialActiveModel {
            classroom_id: Set(classroom_id),
            material_id: Set(material_id),
        };

        ClassroomMaterials::insert(model)
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| SchoolHubError::from_db("共享资料失败", e))?;

        Ok(())
    }

    /// 删除资料，共享与授权记录随之级联删除
    pub async fn delete_material_impl(&self, id: i64) -> Result<bool> {
        let result = Materials::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolHubError::from_db("删除资料失败", e))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::{fixtures, memory_storage};
    use crate::models::drives::requests::CreateMaterialRequest;
    use crate::storage::Storage;

    #[tokio::test]
    async fn test_materials_live_in_drive() {
        let storage = memory_storage().await;
        let school = fixtures::seed_school(&storage).await;
        let educator = fixtures::seed_educator(&storage, school.id, "dewey").await;
        let drive = storage.get_educator_drive(educator.id).await.unwrap();

        let fetched = storage.get_drive_by_id(drive.id).await.unwrap();
        assert_eq!(fetched, drive);

        let syllabus = fixtures::seed_material(&storage, drive.id, "syllabus.pdf").await;
        assert_eq!(syllabus.drive_id, drive.id);
        assert_eq!(
            storage.list_drive_materials(drive.id).await.unwrap(),
            vec![syllabus]
        );
    }

    #[tokio::test]
    async fn test_material_in_unknown_drive_rejected() {
        let storage = memory_storage().await;
        let err = storage
            .create_material(CreateMaterialRequest {
                name: "lost.pdf".into(),
                drive_id: 31,
            })
            .await
            .unwrap_err();
        assert!(err.is_integrity());

        let err = storage.get_drive_by_id(31).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_share_material_with_classroom() {
        let storage = memory_storage().await;
        let school = fixtures::seed_school(&storage).await;
        let educator = fixtures::seed_educator(&storage, school.id, "dewey").await;
        let room = fixtures::seed_classroom(&storage, school.id, Some(educator.id), "5C").await;
        let drive = storage.get_educator_drive(educator.id).await.unwrap();
        let worksheet = fixtures::seed_material(&storage, drive.id, "worksheet.pdf").await;

        storage
            .share_material_with_classroom(worksheet.id, room.id)
            .await
            .unwrap();
        assert_eq!(
            storage.list_classroom_materials(room.id).await.unwrap(),
            vec![worksheet.clone()]
        );

        let err = storage
            .share_material_with_classroom(worksheet.id, room.id)
            .await
            .unwrap_err();
        assert!(err.is_integrity());

        // 删除资料后共享关系一并消失
        assert!(storage.delete_material(worksheet.id).await.unwrap());
        assert!(storage.list_classroom_materials(room.id).await.unwrap().is_empty());
        assert!(!storage.delete_material(worksheet.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_materials_of_missing_classroom_is_not_found() {
        let storage = memory_storage().await;
        let err = storage.list_classroom_materials(12).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
