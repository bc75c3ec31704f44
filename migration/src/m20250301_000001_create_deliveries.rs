use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ==================== 提交记录表 ====================
        manager
            .create_table(
                Table::create()
                    .table(Deliveries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Deliveries::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Deliveries::PostId).string().not_null())
                    .col(ColumnDef::new(Deliveries::StudentId).string().not_null())
                    .col(ColumnDef::new(Deliveries::StudentName).string().not_null())
                    .col(ColumnDef::new(Deliveries::ClassId).string().not_null())
                    .col(ColumnDef::new(Deliveries::Attachments).text().not_null())
                    .col(ColumnDef::new(Deliveries::Notes).text().null())
                    .col(
                        ColumnDef::new(Deliveries::SubmittedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Deliveries::ReviewStatus).string().not_null())
                    .col(ColumnDef::new(Deliveries::ReviewNote).text().null())
                    .col(ColumnDef::new(Deliveries::ReviewedAt).big_integer().null())
                    .col(
                        ColumnDef::new(Deliveries::IsLate)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await?;

        // 每个学生对同一内容只能有一条提交
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_deliveries_student_post")
                    .table(Deliveries::Table)
                    .col(Deliveries::StudentId)
                    .col(Deliveries::PostId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_deliveries_post_id")
                    .table(Deliveries::Table)
                    .col(Deliveries::PostId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_deliveries_class_id")
                    .table(Deliveries::Table)
                    .col(Deliveries::ClassId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Deliveries::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Deliveries {
    #[sea_orm(iden = "deliveries")]
    Table,
    Id,
    PostId,
    StudentId,
    StudentName,
    ClassId,
    Attachments,
    Notes,
    SubmittedAt,
    ReviewStatus,
    ReviewNote,
    ReviewedAt,
    IsLate,
}
