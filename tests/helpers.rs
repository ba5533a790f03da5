use axum::Router;
use companies_api::{
    db::{ConnectionProvider, MongoCompanyStore},
    routes,
    test_utils::test_config,
    AppState,
};
use mongodb::{
    bson::{doc, Document},
    Client,
};
use std::sync::Arc;
use testcontainers::{runners::AsyncRunner, ContainerAsync};
use testcontainers_modules::mongo::Mongo;

pub struct MongoTestContext {
    pub app: Router,
    pub store: Arc<MongoCompanyStore>,
    _container: ContainerAsync<Mongo>,
}

impl MongoTestContext {
    /// Start a MongoDB container seeded with `seed_documents()`.
    pub async fn new() -> Self {
        let container = Mongo::default()
            .start()
            .await
            .expect("Failed to start mongo container");
        let port = container
            .get_host_port_ipv4(27017)
            .await
            .expect("Failed to get mongo port");
        let uri = format!("mongodb://127.0.0.1:{}", port);

        let config = test_config();
        let client = Client::with_uri_str(&uri)
            .await
            .expect("Failed to create seeding client");
        client
            .database(&config.database_name)
            .collection::<Document>(&config.collection_name)
            .insert_many(seed_documents())
            .await
            .expect("Failed to seed companies");

        let provider = Arc::new(ConnectionProvider::new(uri).expect("valid uri"));
        let store = Arc::new(MongoCompanyStore::new(
            provider,
            &config.database_name,
            &config.collection_name,
        ));
        let state = Arc::new(AppState {
            store: store.clone(),
            config,
        });

        Self {
            app: routes::app(state),
            store,
            _container: container,
        }
    }
}

/// Raw documents as another writer might store them: mixed numeric types,
/// missing and null fields.
pub fn seed_documents() -> Vec<Document> {
    vec![
        doc! {
            "name": "Microsoft",
            "location": "Hyderabad",
            "headcount": 220_000_i32,
            "benefits": ["Health Insurance", "Stock Options"],
            "hiringCriteria": { "skills": ["DSA", "System Design"] },
            "salaryBand": { "base": 4_500_000_i32 },
        },
        doc! {
            "name": "Google",
            "location": "Bangalore",
            "headcount": 180_000_i64,
            "benefits": ["Free Meals", "Life insurance"],
            "hiringCriteria": { "skills": ["dsa", "Go"] },
            "salaryBand": { "base": 6_000_000.0_f64 },
        },
        doc! {
            "name": "Razorpay",
            "location": "Bangalore",
            "headcount": 3_000.0_f64,
            "benefits": ["Health Insurance"],
            "hiringCriteria": { "skills": ["Go", "Kubernetes"] },
            "salaryBand": { "base": 2_800_000_i64 },
        },
        doc! {
            "name": "Darwinbox",
            "location": "hyderabad",
            "headcount": 999_i32,
            "benefits": ["Remote Work"],
            "hiringCriteria": { "skills": ["Node.js", "C++"] },
            "salaryBand": { "base": 1_800_000_i32 },
        },
        doc! {
            "name": "Freshworks",
            "location": "Chennai",
            "headcount": 5_000_i32,
            "benefits": ["Gym", "Insurance"],
            "hiringCriteria": { "skills": ["Ruby"] },
            "salaryBand": { "base": 2_000_000_i32, "currency": "INR" },
            "founded": 2010_i32,
        },
        doc! {
            "name": "Stealth Startup",
            "location": null,
            "headcount": 4_i32,
        },
    ]
}
