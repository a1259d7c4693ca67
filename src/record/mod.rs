//! Flat, persisted representations of a funnel and their conversion into [`Funnel`](crate::funnel::Funnel).

pub mod conversion;
pub mod definition;

pub use conversion::*;
pub use definition::*;
