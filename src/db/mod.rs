use anyhow::Result;
use async_trait::async_trait;

use crate::models::{Company, CompanyFilter, CompanyQuery};

pub mod companies;
pub mod connection;

pub use companies::MongoCompanyStore;
pub use connection::{ConnectionError, ConnectionProvider, SharedConnection};

/// Read access to the companies collection.
#[async_trait]
pub trait CompanyStore: Send + Sync {
    /// Count companies matching `filter`.
    async fn count(&self, filter: &CompanyFilter) -> Result<u64>;

    /// Run `query` and return every matching company, in query order.
    async fn find(&self, query: &CompanyQuery) -> Result<Vec<Company>>;
}
