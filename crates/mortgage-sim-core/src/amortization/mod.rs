pub mod comparison;
pub mod rates;
pub mod schedule;
pub mod summary;
