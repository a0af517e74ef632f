use utoipa::{IntoParams, OpenApi, ToSchema};

/// Serialized record; key order matches the JSON body.
#[derive(ToSchema)]
pub struct MalariaDoc {
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

/// Create/update payload. On update, absent keys are kept and `null` clears.
#[derive(ToSchema)]
pub struct MalariaInputDoc {
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
    pub land_area_kmsq_2012: Option<i32>,
    pub languages_en_2012: Option<String>,
    pub who_region: Option<String>,
    pub world_bank_income_group: Option<String>,
}

#[derive(ToSchema)]
pub struct FilterPageDoc {
    pub malaria_data: Vec<MalariaDoc>,
    pub previous_page: Option<String>,
    pub next_page: Option<String>,
    pub current_page: String,
    pub total_pages: u64,
    pub total_items: u64,
}

/// Query parameters of the filter route. Comma-separated values match any of them.
#[derive(IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FilterParamsDoc {
    /// Region name, case-insensitive
    pub region: Option<String>,
    /// Year or comma-separated years
    pub year: Option<String>,
    /// WHO region, case-insensitive
    pub who_region: Option<String>,
    /// ISO alpha-3 code, case-insensitive
    pub iso: Option<String>,
    /// 1-based page, defaults to 1
    pub page: Option<u64>,
    /// Page size, defaults to 10
    pub per_page: Option<u64>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::malaria::reset,
        crate::routes::malaria::filter,
        crate::routes::malaria::list,
        crate::routes::malaria::create,
        crate::routes::malaria::get,
        crate::routes::malaria::update,
        crate::routes::malaria::delete,
        crate::routes::malaria::list_isos,
        crate::routes::malaria::get_by_iso,
    ),
    components(
        schemas(
            MalariaDoc,
            MalariaInputDoc,
            FilterPageDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "malaria")
    )
)]
pub struct ApiDoc;
