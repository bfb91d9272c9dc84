//! Provider adapters.

pub mod tibber;

pub use tibber::TibberAdapter;
