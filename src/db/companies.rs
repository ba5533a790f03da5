use anyhow::Result;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::Collection;
use std::sync::Arc;

use super::{CompanyStore, ConnectionProvider};
use crate::models::{Company, CompanyFilter, CompanyQuery};

#[derive(Clone)]
pub struct MongoCompanyStore {
    provider: Arc<ConnectionProvider>,
    database: String,
    collection: String,
}

impl MongoCompanyStore {
    pub fn new(provider: Arc<ConnectionProvider>, database: &str, collection: &str) -> Self {
        Self {
            provider,
            database: database.to_string(),
            collection: collection.to_string(),
        }
    }

    pub fn provider(&self) -> &Arc<ConnectionProvider> {
        &self.provider
    }

    async fn collection(&self) -> Result<Collection<Company>> {
        let client = self.provider.client().await?;
        Ok(client
            .database(&self.database)
            .collection::<Company>(&self.collection))
    }
}

#[async_trait]
impl CompanyStore for MongoCompanyStore {
    async fn count(&self, filter: &CompanyFilter) -> Result<u64> {
        let collection = self.collection().await?;
        let total = collection.count_documents(filter.to_document()).await?;
        Ok(total)
    }

    async fn find(&self, query: &CompanyQuery) -> Result<Vec<Company>> {
        let collection = self.collection().await?;

        let mut find = collection.find(query.filter.to_document());
        if let Some(sort) = query.sort {
            find = find.sort(sort.to_document());
        }
        if let Some(limit) = query.limit {
            find = find.limit(limit);
        }

        let companies: Vec<Company> = find.await?.try_collect().await?;
        Ok(companies)
    }
}
