pub mod case;
pub mod filter;
pub mod report;
pub mod summary;
