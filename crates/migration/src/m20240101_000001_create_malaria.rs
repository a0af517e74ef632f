//! Create `malaria` table.
//! One row of estimated case/death statistics per region and year.
//! `cases`/`deaths` keep the raw imported text (e.g. `630308[495000-801000]`).
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Malaria::Table)
                    .if_not_exists()
                    // AUTOINCREMENT on sqlite / serial on postgres: ids are never reused
                    .col(pk_auto(Malaria::Id))
                    .col(string_len_null(Malaria::Region, 100))
                    .col(integer_null(Malaria::Year))
                    .col(string_len_null(Malaria::Cases, 100))
                    .col(string_len_null(Malaria::Deaths, 100))
                    .col(integer_null(Malaria::CasesMedian))
                    .col(integer_null(Malaria::CasesMin))
                    .col(integer_null(Malaria::CasesMax))
                    .col(integer_null(Malaria::DeathsMedian))
                    .col(integer_null(Malaria::DeathsMin))
                    .col(integer_null(Malaria::DeathsMax))
                    .col(string_len_null(Malaria::Fips, 2))
                    .col(string_len_null(Malaria::Iso, 3))
                    .col(string_len_null(Malaria::Iso2, 2))
                    .col(integer_null(Malaria::LandAreaKmsq2012))
                    .col(string_len_null(Malaria::LanguagesEn2012, 100))
                    .col(string_len_null(Malaria::WhoRegion, 100))
                    .col(string_len_null(Malaria::WorldBankIncomeGroup, 100))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Malaria::Table).if_exists().to_owned()).await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Malaria {
    Table,
    Id,
    Region,
    Year,
    Cases,
    Deaths,
    CasesMedian,
    CasesMin,
    CasesMax,
    DeathsMedian,
    DeathsMin,
    DeathsMax,
    Fips,
    Iso,
    Iso2,
    #[sea_orm(iden = "land_area_kmsq_2012")]
    LandAreaKmsq2012,
    #[sea_orm(iden = "languages_en_2012")]
    LanguagesEn2012,
    WhoRegion,
    WorldBankIncomeGroup,
}
