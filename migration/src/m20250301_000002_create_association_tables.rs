use sea_orm_migration::prelude::*;

use super::m20250301_000001_create_school_tables::{
    Classrooms, Gradebooks, Materials, Students, Users,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ==================== 班级-资料 关联表 ====================
        manager
            .create_table(
                Table::create()
                    .table(ClassroomMaterials::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ClassroomMaterials::ClassroomId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ClassroomMaterials::MaterialId)
                            .big_integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(ClassroomMaterials::ClassroomId)
                            .col(ClassroomMaterials::MaterialId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ClassroomMaterials::Table, ClassroomMaterials::ClassroomId)
                            .to(Classrooms::Table, Classrooms::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ClassroomMaterials::Table, ClassroomMaterials::MaterialId)
                            .to(Materials::Table, Materials::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 用户-资料 关联表 ====================
        manager
            .create_table(
                Table::create()
                    .table(UserMaterials::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(UserMaterials::UserId).big_integer().not_null())
                    .col(
                        ColumnDef::new(UserMaterials::MaterialId)
                            .big_integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(UserMaterials::UserId)
                            .col(UserMaterials::MaterialId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(UserMaterials::Table, UserMaterials::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(UserMaterials::Table, UserMaterials::MaterialId)
                            .to(Materials::Table, Materials::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 成绩册-学生 关联表 ====================
        manager
            .create_table(
                Table::create()
                    .table(GradebookStudents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GradebookStudents::GradebookId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GradebookStudents::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(GradebookStudents::GradebookId)
                            .col(GradebookStudents::StudentId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(GradebookStudents::Table, GradebookStudents::GradebookId)
                            .to(Gradebooks::Table, Gradebooks::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(GradebookStudents::Table, GradebookStudents::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GradebookStudents::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UserMaterials::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ClassroomMaterials::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum ClassroomMaterials {
    #[sea_orm(iden = "classroom_materials")]
    Table,
    ClassroomId,
    MaterialId,
}

#[derive(DeriveIden)]
enum UserMaterials {
    #[sea_orm(iden = "user_materials")]
    Table,
    UserId,
    MaterialId,
}

#[derive(DeriveIden)]
enum GradebookStudents {
    #[sea_orm(iden = "gradebook_students")]
    Table,
    GradebookId,
    StudentId,
}
