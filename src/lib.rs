pub mod adapters;
pub mod client;
pub mod config;
pub mod core;
pub mod domain;
pub mod resources;
pub mod utils;

pub use crate::client::GridClient;
pub use crate::config::ClientConfig;
pub use crate::core::paging::PagedResult;
pub use crate::core::request::PaginationParameters;
pub use crate::core::retry::RetrySettings;
pub use crate::domain::model::{Cell, Column, Row, Sheet};
pub use crate::domain::object_value::ObjectValue;
pub use crate::utils::error::{ApiError, Result};
