use sea_orm::{entity::prelude::*, ActiveValue, ActiveValue::NotSet, Set};
use serde::{Deserialize, Serialize};

use crate::coerce;

/// One row of malaria statistics for a region/year.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "malaria")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub region: Option<String>,
    pub year: Option<i32>,
    pub cases: Option<String>,
    pub deaths: Option<String>,
    pub cases_median: Option<i32>,
    pub cases_min: Option<i32>,
    pub cases_max: Option<i32>,
    pub deaths_median: Option<i32>,
    pub deaths_min: Option<i32>,
    pub deaths_max: Option<i32>,
    pub fips: Option<String>,
    pub iso: Option<String>,
    pub iso2: Option<String>,
    #[sea_orm(column_name = "land_area_kmsq_2012")]
    pub land_area_kmsq_2012: Option<i32>,
    #[sea_orm(column_name = "languages_en_2012")]
    pub languages_en_2012: Option<String>,
    pub who_region: Option<String>,
    pub world_bank_income_group: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// External shape of a record. Field order is part of the contract.
///
/// `cases`, `deaths`, the min/max estimates, `fips` and `iso2` are stored but
/// never exposed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MalariaView {
    pub malaria_id: i32,
    pub region: Option<String>,
    pub iso: Option<String>,
    pub year: Option<i32>,
    pub cases_median: Option<i32>,
    pub deaths_median: Option<i32>,
    pub land_area_kmsq_2012: Option<i32>,
    pub languages_en_2012: Option<String>,
    pub who_region: Option<String>,
    pub world_bank_income_group: Option<String>,
}

impl From<&Model> for MalariaView {
    fn from(m: &Model) -> Self {
        Self {
            malaria_id: m.id,
            region: m.region.clone(),
            iso: m.iso.clone(),
            year: m.year,
            cases_median: m.cases_median,
            deaths_median: m.deaths_median,
            land_area_kmsq_2012: m.land_area_kmsq_2012,
            languages_en_2012: m.languages_en_2012.clone(),
            who_region: m.who_region.clone(),
            world_bank_income_group: m.world_bank_income_group.clone(),
        }
    }
}

impl From<Model> for MalariaView {
    fn from(m: Model) -> Self {
        MalariaView::from(&m)
    }
}

/// Create payload. Every field is optional; missing ones are stored as null.
/// Client-supplied `id`/`malaria_id` keys are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct NewMalaria {
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default, deserialize_with = "coerce::opt_int")]
    pub year: Option<i32>,
    #[serde(default)]
    pub cases: Option<String>,
    #[serde(default)]
    pub deaths: Option<String>,
    #[serde(default, deserialize_with = "coerce::opt_int")]
    pub cases_median: Option<i32>,
    #[serde(default, deserialize_with = "coerce::opt_int")]
    pub cases_min: Option<i32>,
    #[serde(default, deserialize_with = "coerce::opt_int")]
    pub cases_max: Option<i32>,
    #[serde(default, deserialize_with = "coerce::opt_int")]
    pub deaths_median: Option<i32>,
    #[serde(default, deserialize_with = "coerce::opt_int")]
    pub deaths_min: Option<i32>,
    #[serde(default, deserialize_with = "coerce::opt_int")]
    pub deaths_max: Option<i32>,
    #[serde(default)]
    pub fips: Option<String>,
    #[serde(default)]
    pub iso: Option<String>,
    #[serde(default)]
    pub iso2: Option<String>,
    #[serde(default, deserialize_with = "coerce::opt_int")]
    pub land_area_kmsq_2012: Option<i32>,
    #[serde(default)]
    pub languages_en_2012: Option<String>,
    #[serde(default)]
    pub who_region: Option<String>,
    #[serde(default)]
    pub world_bank_income_group: Option<String>,
}

impl NewMalaria {
    /// Active model with the id left to the store's generator.
    pub fn into_active_model(self) -> ActiveModel {
        self.build(NotSet)
    }

    /// Active model with an explicit id, used by the bulk loader.
    pub fn into_active_model_with_id(self, id: i32) -> ActiveModel {
        self.build(Set(id))
    }

    fn build(self, id: ActiveValue<i32>) -> ActiveModel {
        ActiveModel {
            id,
            region: Set(self.region),
            year: Set(self.year),
            cases: Set(self.cases),
            deaths: Set(self.deaths),
            cases_median: Set(self.cases_median),
            cases_min: Set(self.cases_min),
            cases_max: Set(self.cases_max),
            deaths_median: Set(self.deaths_median),
            deaths_min: Set(self.deaths_min),
            deaths_max: Set(self.deaths_max),
            fips: Set(self.fips),
            iso: Set(self.iso),
            iso2: Set(self.iso2),
            land_area_kmsq_2012: Set(self.land_area_kmsq_2012),
            languages_en_2012: Set(self.languages_en_2012),
            who_region: Set(self.who_region),
            world_bank_income_group: Set(self.world_bank_income_group),
        }
    }
}

/// Partial update payload.
///
/// Outer `None`: key absent, keep the stored value.
/// `Some(None)`: explicit `null`, clear the field.
/// `Some(Some(v))`: replace with `v`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct MalariaPatch {
    #[serde(default, deserialize_with = "coerce::patch")]
    pub region: Option<Option<String>>,
    #[serde(default, deserialize_with = "coerce::patch_int")]
    pub year: Option<Option<i32>>,
    #[serde(default, deserialize_with = "coerce::patch")]
    pub cases: Option<Option<String>>,
    #[serde(default, deserialize_with = "coerce::patch")]
    pub deaths: Option<Option<String>>,
    #[serde(default, deserialize_with = "coerce::patch_int")]
    pub cases_median: Option<Option<i32>>,
    #[serde(default, deserialize_with = "coerce::patch_int")]
    pub cases_min: Option<Option<i32>>,
    #[serde(default, deserialize_with = "coerce::patch_int")]
    pub cases_max: Option<Option<i32>>,
    #[serde(default, deserialize_with = "coerce::patch_int")]
    pub deaths_median: Option<Option<i32>>,
    #[serde(default, deserialize_with = "coerce::patch_int")]
    pub deaths_min: Option<Option<i32>>,
    #[serde(default, deserialize_with = "coerce::patch_int")]
    pub deaths_max: Option<Option<i32>>,
    #[serde(default, deserialize_with = "coerce::patch")]
    pub fips: Option<Option<String>>,
    #[serde(default, deserialize_with = "coerce::patch")]
    pub iso: Option<Option<String>>,
    #[serde(default, deserialize_with = "coerce::patch")]
    pub iso2: Option<Option<String>>,
    #[serde(default, deserialize_with = "coerce::patch_int")]
    pub land_area_kmsq_2012: Option<Option<i32>>,
    #[serde(default, deserialize_with = "coerce::patch")]
    pub languages_en_2012: Option<Option<String>>,
    #[serde(default, deserialize_with = "coerce::patch")]
    pub who_region: Option<Option<String>>,
    #[serde(default, deserialize_with = "coerce::patch")]
    pub world_bank_income_group: Option<Option<String>>,
}

impl MalariaPatch {
    /// Merge supplied fields into `am`, leaving the rest untouched.
    pub fn apply(self, am: &mut ActiveModel) {
        if let Some(v) = self.region { am.region = Set(v); }
        if let Some(v) = self.year { am.year = Set(v); }
        if let Some(v) = self.cases { am.cases = Set(v); }
        if let Some(v) = self.deaths { am.deaths = Set(v); }
        if let Some(v) = self.cases_median { am.cases_median = Set(v); }
        if let Some(v) = self.cases_min { am.cases_min = Set(v); }
        if let Some(v) = self.cases_max { am.cases_max = Set(v); }
        if let Some(v) = self.deaths_median { am.deaths_median = Set(v); }
        if let Some(v) = self.deaths_min { am.deaths_min = Set(v); }
        if let Some(v) = self.deaths_max { am.deaths_max = Set(v); }
        if let Some(v) = self.fips { am.fips = Set(v); }
        if let Some(v) = self.iso { am.iso = Set(v); }
        if let Some(v) = self.iso2 { am.iso2 = Set(v); }
        if let Some(v) = self.land_area_kmsq_2012 { am.land_area_kmsq_2012 = Set(v); }
        if let Some(v) = self.languages_en_2012 { am.languages_en_2012 = Set(v); }
        if let Some(v) = self.who_region { am.who_region = Set(v); }
        if let Some(v) = self.world_bank_income_group { am.world_bank_income_group = Set(v); }
    }

    pub fn is_empty(&self) -> bool {
        *self == MalariaPatch::default()
    }
}
