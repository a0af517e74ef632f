#![cfg(test)]
use std::path::Path;

use migration::MigratorTrait;
use models::db::connect_with_config;
use sea_orm::DatabaseConnection;
use tempfile::TempDir;

/// Rows written by [`write_fixture_csv`], one per line after the header.
const FIXTURE: &str = "\
region,year,cases,deaths,cases_median,cases_min,cases_max,deaths_median,deaths_min,deaths_max,fips,iso,iso2,land_area_kmsq_2012,languages_en_2012,who_region,world_bank_income_group
Afghanistan,2017,630308[495000-801000],298[110-510],630308,495000,801000,298,110,510,AF,AFG,AF,652230,\"Dari Persian, Pashto (official)\",Eastern Mediterranean,Low income
Algeria,2017,0,0,0,,,0,,,AG,DZA,DZ,2381740,\"Arabic (official), French\",Africa,Upper middle income
Angola,2017,4615605[3106000-6661000],13316[9970-16600],4615605,3106000,6661000,13316,9970,16600,AO,AGO,AO,1246700,Portuguese (official),Africa,Lower middle income
Afghanistan,2016,593519[437000-798000],273[100-480],593519,437000,798000,273,100,480,AF,AFG,AF,652230,\"Dari Persian, Pashto (official)\",Eastern Mediterranean,Low income
";

/// Fresh migrated SQLite database in its own temp dir.
/// The `TempDir` must outlive the connection.
pub async fn get_db() -> Result<(DatabaseConnection, TempDir), anyhow::Error> {
    let dir = tempfile::tempdir()?;
    let cfg = configs::DatabaseConfig {
        url: format!("sqlite://{}?mode=rwc", dir.path().join("service.db").display()),
        max_connections: 4,
        min_connections: 1,
        acquire_timeout_secs: 10,
        ..Default::default()
    };
    let db = connect_with_config(&cfg).await?;
    migration::Migrator::up(&db, None).await?;
    Ok((db, dir))
}

/// Write the fixture CSV to `path` and return its row count.
pub fn write_fixture_csv(path: &Path) -> Result<u64, anyhow::Error> {
    std::fs::write(path, FIXTURE)?;
    Ok(FIXTURE.lines().count() as u64 - 1)
}
