use mongodb::{bson::doc, options::ClientOptions, Client};
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::{info, warn};

const APP_NAME: &str = "companies-api";

/// Process-wide provider slot. Rebuilding the application state (tests,
/// repeated router construction) goes through this slot instead of dialing a
/// fresh client.
static SHARED_PROVIDER: OnceLock<Arc<ConnectionProvider>> = OnceLock::new();

#[derive(Error, Debug)]
pub enum ConnectionError {
    #[error("MONGODB_URI is required")]
    MissingConnectionString,

    #[error("Failed to connect to MongoDB: {0}")]
    Driver(#[from] mongodb::error::Error),
}

/// A value that is established at most once, on first use.
///
/// Concurrent first callers all await the same in-flight establishment. Once a
/// value is stored, reads never wait. A failed establishment leaves the slot
/// empty so a later caller can try again.
pub struct SharedConnection<T> {
    cell: OnceCell<T>,
    establishments: AtomicUsize,
}

impl<T> SharedConnection<T> {
    pub fn new() -> Self {
        Self {
            cell: OnceCell::new(),
            establishments: AtomicUsize::new(0),
        }
    }

    pub async fn get_or_establish<F, Fut, E>(&self, establish: F) -> Result<&T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        self.cell
            .get_or_try_init(|| {
                self.establishments.fetch_add(1, Ordering::SeqCst);
                establish()
            })
            .await
    }

    pub fn get(&self) -> Option<&T> {
        self.cell.get()
    }

    /// Number of establishment attempts started so far.
    pub fn establishments(&self) -> usize {
        self.establishments.load(Ordering::SeqCst)
    }
}

impl<T> Default for SharedConnection<T> {
    fn default() -> Self {
        Self::new()
    }
}

pub struct ConnectionProvider {
    uri: String,
    connection: SharedConnection<Client>,
}

impl ConnectionProvider {
    pub fn new(uri: impl Into<String>) -> Result<Self, ConnectionError> {
        let uri = uri.into();
        if uri.trim().is_empty() {
            return Err(ConnectionError::MissingConnectionString);
        }

        Ok(Self {
            uri,
            connection: SharedConnection::new(),
        })
    }

    /// Get the process-wide provider, creating it on first call.
    ///
    /// Later calls return the provider created first, even when passed a
    /// different URI.
    pub fn shared(uri: &str) -> Result<Arc<ConnectionProvider>, ConnectionError> {
        if let Some(provider) = SHARED_PROVIDER.get() {
            if provider.uri != uri {
                warn!("Ignoring new MongoDB URI; a shared connection provider already exists");
            }
            return Ok(provider.clone());
        }

        let provider = Arc::new(ConnectionProvider::new(uri)?);
        Ok(SHARED_PROVIDER.get_or_init(|| provider).clone())
    }

    /// Get the shared client, connecting on first use.
    pub async fn client(&self) -> Result<Client, ConnectionError> {
        let client = self
            .connection
            .get_or_establish(|| establish(&self.uri))
            .await?;
        Ok(client.clone())
    }

    pub fn is_connected(&self) -> bool {
        self.connection.get().is_some()
    }

    pub fn establishments(&self) -> usize {
        self.connection.establishments()
    }
}

async fn establish(uri: &str) -> Result<Client, ConnectionError> {
    info!("Connecting to MongoDB...");

    let mut options = ClientOptions::parse(uri).await?;
    options.app_name = Some(APP_NAME.to_string());

    let client = Client::with_options(options)?;
    client.database("admin").run_command(doc! { "ping": 1 }).await?;

    info!("MongoDB connection established");
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_blank_uri_fails_fast() {
        assert!(matches!(
            ConnectionProvider::new(""),
            Err(ConnectionError::MissingConnectionString)
        ));
        assert!(matches!(
            ConnectionProvider::new("   "),
            Err(ConnectionError::MissingConnectionString)
        ));
    }

    #[test]
    fn test_new_provider_is_not_connected() {
        let provider = ConnectionProvider::new("mongodb://localhost:27017").unwrap();
        assert!(!provider.is_connected());
        assert_eq!(provider.establishments(), 0);
    }

    #[tokio::test]
    async fn test_concurrent_first_use_establishes_once() {
        let connection: Arc<SharedConnection<u32>> = Arc::new(SharedConnection::new());

        let mut handles = Vec::new();
        for _ in 0..32 {
            let connection = connection.clone();
            handles.push(tokio::spawn(async move {
                connection
                    .get_or_establish(|| async {
                        tokio::time::sleep(Duration::from_millis(50)).await;
                        Ok::<_, ConnectionError>(7)
                    })
                    .await
                    .map(|value| *value)
            }));
        }

        for handle in handles {
            assert_eq!(handle.await.unwrap().unwrap(), 7);
        }
        assert_eq!(connection.establishments(), 1);
    }

    #[tokio::test]
    async fn test_established_value_is_reused() {
        let connection = SharedConnection::new();

        let first = *connection
            .get_or_establish(|| async { Ok::<_, ConnectionError>(1) })
            .await
            .unwrap();
        let second = *connection
            .get_or_establish(|| async { Ok::<_, ConnectionError>(2) })
            .await
            .unwrap();

        assert_eq!(first, 1);
        assert_eq!(second, 1);
        assert_eq!(connection.establishments(), 1);
    }

    #[tokio::test]
    async fn test_failed_establishment_is_retried() {
        let connection = SharedConnection::new();

        let failed = connection
            .get_or_establish(|| async { Err::<u32, _>(ConnectionError::MissingConnectionString) })
            .await;
        assert!(failed.is_err());
        assert!(connection.get().is_none());

        let value = *connection
            .get_or_establish(|| async { Ok::<_, ConnectionError>(3) })
            .await
            .unwrap();
        assert_eq!(value, 3);
        assert_eq!(connection.establishments(), 2);
    }

    #[test]
    fn test_shared_provider_is_process_wide() {
        let first = ConnectionProvider::shared("mongodb://localhost:27017").unwrap();
        let second = ConnectionProvider::shared("mongodb://localhost:27018").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }
}
