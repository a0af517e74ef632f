use models::malaria::MalariaView;
use serde::Serialize;

use super::filter::MalariaFilter;
use crate::pagination::PageMeta;

/// Response envelope of the filter endpoint. Key order is part of the contract.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FilterPage {
    pub malaria_data: Vec<MalariaView>,
    pub previous_page: Option<String>,
    pub next_page: Option<String>,
    pub current_page: String,
    pub total_pages: u64,
    pub total_items: u64,
}

impl FilterPage {
    pub fn build(filter: &MalariaFilter, meta: PageMeta, malaria_data: Vec<MalariaView>) -> Self {
        let link = |page: u64| filter.page_url(page, meta.per_page);
        Self {
            malaria_data,
            previous_page: meta.previous_page().map(link),
            next_page: meta.next_page().map(link),
            current_page: link(meta.page),
            total_pages: meta.total_pages,
            total_items: meta.total_items,
        }
    }
}
