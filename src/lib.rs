pub mod config;
pub mod data;
pub mod dom;
pub mod error;
pub mod map;
pub mod pages;
pub mod provider;
pub mod urls;
pub mod view;

#[cfg(test)]
mod fixture;

pub use config::Config;
pub use error::{Error, Result};
pub use provider::{DataProvider, DatasetSource, Filter, RestaurantQuery, RestaurantQueryBuilder};
