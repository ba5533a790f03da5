//! Test utilities: an in-memory company store, fixture data and a router
//! wired to them.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower::util::ServiceExt;

use crate::{
    config::{Config, DEFAULT_TOP_PAID_LIMIT, MAX_TOP_PAID_LIMIT},
    db::{CompanyStore, SharedConnection},
    models::{Company, CompanyFilter, CompanyQuery, HiringCriteria, SalaryBand},
    AppState,
};

/// Company store backed by a `Vec`, applying the same filter semantics as
/// the MongoDB store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCompanyStore {
    companies: Vec<Company>,
}

impl InMemoryCompanyStore {
    pub fn new(companies: Vec<Company>) -> Self {
        Self { companies }
    }

    fn run(&self, query: &CompanyQuery) -> Vec<Company> {
        run_query(&self.companies, query)
    }
}

#[async_trait]
impl CompanyStore for InMemoryCompanyStore {
    async fn count(&self, filter: &CompanyFilter) -> Result<u64> {
        Ok(self.companies.iter().filter(|c| filter.matches(c)).count() as u64)
    }

    async fn find(&self, query: &CompanyQuery) -> Result<Vec<Company>> {
        Ok(self.run(query))
    }
}

/// Store whose every call fails, as a lost database connection would.
#[derive(Debug, Clone, Default)]
pub struct FailingCompanyStore;

#[async_trait]
impl CompanyStore for FailingCompanyStore {
    async fn count(&self, _filter: &CompanyFilter) -> Result<u64> {
        Err(anyhow!("server selection timeout: no available servers"))
    }

    async fn find(&self, _query: &CompanyQuery) -> Result<Vec<Company>> {
        Err(anyhow!("server selection timeout: no available servers"))
    }
}

/// Store that "connects" on first use through a `SharedConnection`, taking
/// `connect_delay` to do so. Used to check that concurrent first requests
/// share one establishment.
pub struct LazyCompanyStore {
    companies: Vec<Company>,
    connect_delay: Duration,
    connection: SharedConnection<InMemoryCompanyStore>,
}

impl LazyCompanyStore {
    pub fn new(companies: Vec<Company>, connect_delay: Duration) -> Self {
        Self {
            companies,
            connect_delay,
            connection: SharedConnection::new(),
        }
    }

    pub fn establishments(&self) -> usize {
        self.connection.establishments()
    }

    async fn connected(&self) -> Result<&InMemoryCompanyStore> {
        self.connection
            .get_or_establish(|| async {
                tokio::time::sleep(self.connect_delay).await;
                Ok(InMemoryCompanyStore::new(self.companies.clone()))
            })
            .await
    }
}

#[async_trait]
impl CompanyStore for LazyCompanyStore {
    async fn count(&self, filter: &CompanyFilter) -> Result<u64> {
        self.connected().await?.count(filter).await
    }

    async fn find(&self, query: &CompanyQuery) -> Result<Vec<Company>> {
        self.connected().await?.find(query).await
    }
}

fn run_query(companies: &[Company], query: &CompanyQuery) -> Vec<Company> {
    let mut matched: Vec<Company> = companies
        .iter()
        .filter(|c| query.filter.matches(c))
        .cloned()
        .collect();

    if let Some(sort) = query.sort {
        sort.sort(&mut matched);
    }
    if let Some(limit) = query.limit {
        matched.truncate(usize::try_from(limit.unsigned_abs()).unwrap_or(usize::MAX));
    }
    matched
}

pub fn company(
    name: &str,
    location: &str,
    headcount: i64,
    salary: f64,
    skills: &[&str],
    benefits: &[&str],
) -> Company {
    Company {
        id: Some(mongodb::bson::oid::ObjectId::new()),
        name: name.to_string(),
        location: location.to_string(),
        headcount,
        benefits: benefits.iter().map(|b| b.to_string()).collect(),
        hiring_criteria: HiringCriteria {
            skills: skills.iter().map(|s| s.to_string()).collect(),
            ..HiringCriteria::default()
        },
        salary_band: SalaryBand {
            base: salary,
            ..SalaryBand::default()
        },
        ..Company::default()
    }
}

/// Fixture data set used across router tests.
pub fn sample_companies() -> Vec<Company> {
    vec![
        company(
            "Microsoft",
            "Hyderabad",
            220_000,
            4_500_000.0,
            &["DSA", "System Design", "C#"],
            &["Health Insurance", "Stock Options"],
        ),
        company(
            "Microsoft Research",
            "Bangalore",
            800,
            5_200_000.0,
            &["Machine Learning", "DSA/Algo"],
            &["Insurance", "Research Budget"],
        ),
        company(
            "Google",
            "Bangalore",
            180_000,
            6_000_000.0,
            &["dsa", "Go", "Distributed Systems"],
            &["Free Meals", "Life insurance"],
        ),
        company(
            "Infosys",
            "Pune",
            300_000,
            600_000.0,
            &["Java", "SQL"],
            &["Provident Fund"],
        ),
        company(
            "Zoho",
            "Chennai",
            12_000,
            1_100_000.0,
            &["Java", "DSA"],
            &["Free Meals", "Transport"],
        ),
        company(
            "Razorpay",
            "Bangalore",
            3_000,
            2_800_000.0,
            &["Go", "Kubernetes"],
            &["Health Insurance", "ESOPs"],
        ),
        company(
            "Freshworks",
            "Chennai",
            5_000,
            2_000_000.0,
            &["Ruby", "React"],
            &["Gym", "Insurance"],
        ),
        company(
            "CRED",
            "Bangalore",
            1_000,
            3_500_000.0,
            &["Kotlin", "System Design"],
            &["Wellness Allowance"],
        ),
        company(
            "Darwinbox",
            "hyderabad",
            999,
            1_800_000.0,
            &["Node.js", "C++"],
            &["Remote Work"],
        ),
        company(
            "Swiggy",
            "Bangalore",
            5_001,
            2_400_000.0,
            &["Java", "Microservices"],
            &["Food Credits"],
        ),
        company(
            "Acme Analytics",
            "Hyderabad (Hitech City)",
            45,
            900_000.0,
            &["Python", "SQL"],
            &[],
        ),
        company(
            "Tiny Startup",
            "Remote",
            3,
            0.0,
            &[],
            &["Equity"],
        ),
    ]
}

pub fn test_config() -> Config {
    Config {
        mongodb_uri: "mongodb://localhost:27017".to_string(),
        database_name: "MyDatabase".to_string(),
        collection_name: "companies".to_string(),
        server_address: "127.0.0.1:0".to_string(),
        top_paid_default_limit: DEFAULT_TOP_PAID_LIMIT,
        top_paid_max_limit: MAX_TOP_PAID_LIMIT,
    }
}

/// Router plus the state behind it.
pub struct TestContext {
    pub app: Router,
    pub state: Arc<AppState>,
}

impl TestContext {
    /// Context backed by `sample_companies()`.
    pub fn new() -> Self {
        Self::with_store(Arc::new(InMemoryCompanyStore::new(sample_companies())))
    }

    pub fn with_store(store: Arc<dyn CompanyStore>) -> Self {
        let state = Arc::new(AppState {
            store,
            config: test_config(),
        });
        let app = crate::routes::app(state.clone());
        Self { app, state }
    }

    /// Issue a GET and decode the JSON body.
    pub async fn get_json(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        get_json(&self.app, uri).await
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(uri)
                .body(Body::empty())
                .expect("valid request"),
        )
        .await
        .expect("router is infallible");

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}
