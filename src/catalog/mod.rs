pub mod categories;
pub mod client;
pub mod pager;
pub mod query;

pub use client::{CatalogClient, CatalogError, Product, ProductPage, API_BASE_ENV, DEFAULT_API_BASE, PAGE_SIZE};
pub use pager::{FetchState, PageRequest, Pager};
pub use query::{Query, SortMode, ALL_CATEGORIES};
