use sea_orm_migration::prelude::*;

use crate::m20240101_000001_create_malaria::Malaria;

#[derive(DeriveMigrationName)]
pub struct Migration;

const INDEXES: [(&str, Malaria); 4] = [
    ("idx_malaria_iso", Malaria::Iso),
    ("idx_malaria_region", Malaria::Region),
    ("idx_malaria_year", Malaria::Year),
    ("idx_malaria_who_region", Malaria::WhoRegion),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Filter columns: iso, region, year, who_region
        for (name, col) in INDEXES {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(Malaria::Table)
                        .col(col)
                        .if_not_exists()
                        .to_owned(),
                )
                .await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, _) in INDEXES {
            manager
                .drop_index(Index::drop().name(name).table(Malaria::Table).to_owned())
                .await?;
        }
        Ok(())
    }
}
