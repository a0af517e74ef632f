//! Service layer for the malaria resource.
//! - Composes filters and pages over the Record Store without materialising rows early.
//! - Keeps storage access behind `MalariaRepository`.
//! - Loads the bulk CSV source for reset and startup seeding.

pub mod errors;
pub mod pagination;
pub mod import;
pub mod malaria;
#[cfg(test)]
pub mod test_support;
