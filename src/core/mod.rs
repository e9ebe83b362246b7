pub mod executor;
pub mod paging;
pub mod request;
pub mod retry;

pub use crate::utils::error::Result;
pub use executor::RequestExecutor;
pub use paging::PagedResult;
pub use request::{HttpMethod, PaginationParameters, QueryBuilder, QueryValue, RequestDescriptor};
pub use retry::{RetryDecision, RetrySettings};
