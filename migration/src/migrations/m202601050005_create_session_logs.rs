use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202601050005_create_session_logs"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("session_logs"))
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Alias::new("id"))
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Alias::new("user_id")).big_integer().not_null())
                    .col(ColumnDef::new(Alias::new("session_id")).string_len(36).not_null())
                    .col(ColumnDef::new(Alias::new("event")).string_len(16).not_null())
                    .col(ColumnDef::new(Alias::new("status")).string_len(16).not_null())
                    .col(ColumnDef::new(Alias::new("occurred_at")).timestamp().not_null())
                    .col(ColumnDef::new(Alias::new("duration_seconds")).big_integer().null())
                    .col(ColumnDef::new(Alias::new("ip_address")).string().null())
                    .col(ColumnDef::new(Alias::new("user_agent")).string().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_session_logs_user")
                            .from(Alias::new("session_logs"), Alias::new("user_id"))
                            .to(Alias::new("users"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_session_logs_event_status")
                    .table(Alias::new("session_logs"))
                    .col(Alias::new("event"))
                    .col(Alias::new("status"))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("session_logs")).to_owned())
            .await
    }
}
