//! Translates request parameters into a composed, still-lazy query.
//!
//! Parameters combine with AND; comma-separated values inside one parameter
//! combine with OR (an `IN` match).

use models::malaria;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Select};
use url::form_urlencoded;

use crate::pagination::Pagination;

/// Route the pagination links point back to.
pub const FILTER_PATH: &str = "/api/malaria/filter";

/// Active filter parameters, raw as received so links can echo them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MalariaFilter {
    pub region: Option<String>,
    pub year: Option<String>,
    pub who_region: Option<String>,
    pub iso: Option<String>,
}

/// Filter plus requested page, parsed from a query string.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterQuery {
    pub filter: MalariaFilter,
    pub pagination: Pagination,
}

impl FilterQuery {
    /// Build from decoded query pairs. The first occurrence of a key wins;
    /// unknown keys are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut filter = MalariaFilter::default();
        let mut page: Option<String> = None;
        let mut per_page: Option<String> = None;
        for (k, v) in pairs {
            let slot = match k.as_ref() {
                "region" => &mut filter.region,
                "year" => &mut filter.year,
                "who_region" => &mut filter.who_region,
                "iso" => &mut filter.iso,
                "page" => &mut page,
                "per_page" => &mut per_page,
                _ => continue,
            };
            if slot.is_none() {
                let v: String = v.into();
                if !v.is_empty() {
                    *slot = Some(v);
                }
            }
        }
        Self {
            filter,
            pagination: Pagination::from_raw(page.as_deref(), per_page.as_deref()),
        }
    }
}

impl MalariaFilter {
    /// Conjunction of every supplied parameter; empty when none are set.
    pub fn condition(&self) -> Condition {
        let mut cond = Condition::all();
        if let Some(raw) = &self.region {
            cond = cond.add(lower_in(malaria::Column::Region, raw));
        }
        if let Some(raw) = &self.year {
            let years: Vec<i32> = split_values(raw).filter_map(|v| v.parse::<i32>().ok()).collect();
            cond = if years.is_empty() {
                // nothing coercible: match no rows rather than fail
                cond.add(Expr::val(1).eq(2))
            } else {
                cond.add(malaria::Column::Year.is_in(years))
            };
        }
        if let Some(raw) = &self.who_region {
            cond = cond.add(lower_in(malaria::Column::WhoRegion, raw));
        }
        if let Some(raw) = &self.iso {
            cond = cond.add(lower_in(malaria::Column::Iso, raw));
        }
        cond
    }

    /// Filtered records ordered by id. Nothing is fetched until paginated.
    pub fn select(&self) -> Select<malaria::Entity> {
        malaria::Entity::find()
            .filter(self.condition())
            .order_by_asc(malaria::Column::Id)
    }

    /// Active parameters in their canonical order.
    pub fn echo_pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("region", &self.region),
            ("year", &self.year),
            ("who_region", &self.who_region),
            ("iso", &self.iso),
        ]
        .into_iter()
        .filter_map(|(k, v)| v.as_deref().map(|v| (k, v)))
        .collect()
    }

    /// Link to `page` that reproduces this filter without server-side state.
    pub fn page_url(&self, page: u64, per_page: u64) -> String {
        let mut qs = form_urlencoded::Serializer::new(String::new());
        for (k, v) in self.echo_pairs() {
            qs.append_pair(k, v);
        }
        qs.append_pair("page", &page.to_string());
        qs.append_pair("per_page", &per_page.to_string());
        format!("{}?{}", FILTER_PATH, qs.finish())
    }
}

fn split_values(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|v| !v.is_empty())
}

fn lower_in(col: malaria::Column, raw: &str) -> sea_orm::sea_query::SimpleExpr {
    let values: Vec<String> = split_values(raw).map(str::to_lowercase).collect();
    Expr::expr(Func::lower(Expr::col(col))).is_in(values)
}
