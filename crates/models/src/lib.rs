pub mod errors;
pub mod db;
pub mod coerce;
pub mod malaria;

#[cfg(test)]
mod tests;
