use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建评测流水日志表
        manager
            .create_table(
                Table::create()
                    .table(EvaluationLogs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EvaluationLogs::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(EvaluationLogs::SubmissionId).big_integer().null())
                    .col(ColumnDef::new(EvaluationLogs::Step).string_len(100).not_null())
                    .col(ColumnDef::new(EvaluationLogs::Status).string_len(50).not_null())
                    .col(ColumnDef::new(EvaluationLogs::Message).text().null())
                    .col(ColumnDef::new(EvaluationLogs::Details).text().null())
                    .col(
                        ColumnDef::new(EvaluationLogs::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(EvaluationLogs::Table, EvaluationLogs::SubmissionId)
                            .to(Submissions::Table, Submissions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_evaluation_logs_submission_id")
                    .table(EvaluationLogs::Table)
                    .col(EvaluationLogs::SubmissionId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EvaluationLogs::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum EvaluationLogs {
    #[sea_orm(iden = "evaluation_logs")]
    Table,
    Id,
    SubmissionId,
    Step,
    Status,
    Message,
    Details,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Submissions {
    #[sea_orm(iden = "submissions")]
    Table,
    Id,
}
