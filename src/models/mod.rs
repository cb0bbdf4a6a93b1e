pub mod error;
pub mod filter;
pub mod stats;
pub mod trip;
