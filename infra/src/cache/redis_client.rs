//! Redis client implementation
//!
//! A Redis client with a multiplexed connection, retry logic and the handful
//! of operations the session store and event stream need.

use redis::{
    aio::MultiplexedConnection, streams::StreamMaxlen, AsyncCommands, Client, RedisError,
    RedisResult, Script,
};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use sso_shared::config::CacheConfig;

use crate::InfrastructureError;

/// Deletes KEYS[1] only when it holds ARGV[1]. Returns 1 when deleted.
const COMPARE_AND_DELETE: &str = r#"
if redis.call("GET", KEYS[1]) == ARGV[1] then
    return redis.call("DEL", KEYS[1])
end
return 0
"#;

/// The script is not idempotent, so it is sent once
const COMPARE_AND_DELETE_ATTEMPTS: u32 = 1;

type RedisFuture<T> = Pin<Box<dyn Future<Output = RedisResult<T>> + Send>>;

/// Redis client with a shared multiplexed connection and retry logic
#[derive(Clone)]
pub struct RedisClient {
    /// Redis multiplexed connection for async operations
    connection: MultiplexedConnection,
    /// Maximum number of attempts per operation
    max_retries: u32,
    /// Base delay between retries (exponential backoff)
    retry_delay_ms: u64,
    compare_and_delete: Script,
}

impl RedisClient {
    /// Create a new Redis client
    ///
    /// # Arguments
    /// * `config` - Cache configuration settings
    ///
    /// # Returns
    /// * `Result<Self, InfrastructureError>` - Redis client or error
    pub async fn new(config: &CacheConfig) -> Result<Self, InfrastructureError> {
        Self::new_with_retry_config(config, config.max_retries.max(1), 100).await
    }

    /// Create a new Redis client with custom retry configuration
    pub async fn new_with_retry_config(
        config: &CacheConfig,
        max_retries: u32,
        retry_delay_ms: u64,
    ) -> Result<Self, InfrastructureError> {
        info!(url = %mask_url(&config.url), "Creating Redis client");

        let client = Client::open(config.url.as_str()).map_err(|e| {
            error!("Failed to parse Redis URL: {}", e);
            InfrastructureError::Config(format!("Invalid Redis URL: {}", e))
        })?;

        let connection =
            Self::create_connection_with_retry(client, max_retries, retry_delay_ms).await?;

        info!("Redis client created successfully");

        Ok(Self {
            connection,
            max_retries,
            retry_delay_ms,
            compare_and_delete: Script::new(COMPARE_AND_DELETE),
        })
    }

    /// Create multiplexed connection with retry logic
    async fn create_connection_with_retry(
        client: Client,
        max_retries: u32,
        retry_delay_ms: u64,
    ) -> Result<MultiplexedConnection, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = retry_delay_ms;

        loop {
            attempts += 1;
            debug!("Attempting to connect to Redis (attempt {})", attempts);

            match client.get_multiplexed_async_connection().await {
                Ok(connection) => {
                    info!("Successfully connected to Redis");
                    return Ok(connection);
                }
                Err(e) if attempts < max_retries => {
                    warn!(
                        "Failed to connect to Redis (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, max_retries, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    // Exponential backoff with cap at 5 seconds
                    delay = (delay * 2).min(5000);
                }
                Err(e) => {
                    error!("Failed to connect to Redis after {} attempts: {}", attempts, e);
                    return Err(InfrastructureError::Cache(e));
                }
            }
        }
    }

    /// Set a value with expiration time in seconds
    pub async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        expiry_seconds: u64,
    ) -> Result<(), InfrastructureError> {
        debug!(key, expiry_seconds, "SET EX");

        self.execute_with_retry(|mut conn| {
            let key = key.to_string();
            let value = value.to_string();
            Box::pin(async move { conn.set_ex::<_, _, ()>(key, value, expiry_seconds).await })
        })
        .await
        .map_err(|e| {
            error!(key, error = %e, "Failed to set key");
            InfrastructureError::Cache(e)
        })
    }

    /// Get a value, `None` if the key does not exist
    pub async fn get(&self, key: &str) -> Result<Option<String>, InfrastructureError> {
        debug!(key, "GET");

        self.execute_with_retry(|mut conn| {
            let key = key.to_string();
            Box::pin(async move { conn.get::<_, Option<String>>(key).await })
        })
        .await
        .map_err(|e| {
            error!(key, error = %e, "Failed to get key");
            InfrastructureError::Cache(e)
        })
    }

    /// Delete a key, returning whether it existed
    pub async fn delete(&self, key: &str) -> Result<bool, InfrastructureError> {
        debug!(key, "DEL");

        self.execute_with_retry(|mut conn| {
            let key = key.to_string();
            Box::pin(async move { conn.del::<_, u32>(key).await })
        })
        .await
        .map(|deleted| deleted > 0)
        .map_err(|e| {
            error!(key, error = %e, "Failed to delete key");
            InfrastructureError::Cache(e)
        })
    }

    /// Delete `key` only if it currently holds `expected`, in one round trip
    pub async fn compare_and_delete(
        &self,
        key: &str,
        expected: &str,
    ) -> Result<bool, InfrastructureError> {
        debug!(key, "Compare and delete");

        self.execute_with_attempts(COMPARE_AND_DELETE_ATTEMPTS, |mut conn| {
            let script = self.compare_and_delete.clone();
            let key = key.to_string();
            let expected = expected.to_string();
            Box::pin(async move {
                script
                    .key(key)
                    .arg(expected)
                    .invoke_async::<_, i64>(&mut conn)
                    .await
            })
        })
        .await
        .map(|deleted| deleted == 1)
        .map_err(|e| {
            error!(key, error = %e, "Failed to compare and delete key");
            InfrastructureError::Cache(e)
        })
    }

    /// Append an entry to a stream capped at roughly `max_len` entries
    pub async fn xadd_capped(
        &self,
        stream: &str,
        max_len: usize,
        fields: &[(&str, String)],
    ) -> Result<String, InfrastructureError> {
        let owned: Vec<(String, String)> = fields
            .iter()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect();

        self.execute_with_retry(|mut conn| {
            let stream = stream.to_string();
            let fields = owned.clone();
            Box::pin(async move {
                conn.xadd_maxlen::<_, _, _, _, String>(
                    stream,
                    StreamMaxlen::Approx(max_len),
                    "*",
                    fields.as_slice(),
                )
                .await
            })
        })
        .await
        .map_err(|e| {
            error!(stream, error = %e, "Failed to append to stream");
            InfrastructureError::Cache(e)
        })
    }

    /// Ping the server
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        let response = self
            .execute_with_retry(|mut conn| {
                Box::pin(async move { redis::cmd("PING").query_async::<_, String>(&mut conn).await })
            })
            .await
            .map_err(|e| {
                warn!(error = %e, "Redis health check failed");
                InfrastructureError::Cache(e)
            })?;

        Ok(response == "PONG")
    }

    async fn execute_with_retry<F, T>(&self, operation: F) -> RedisResult<T>
    where
        F: Fn(MultiplexedConnection) -> RedisFuture<T>,
    {
        self.execute_with_attempts(self.max_retries, operation).await
    }

    async fn execute_with_attempts<F, T>(&self, max_attempts: u32, operation: F) -> RedisResult<T>
    where
        F: Fn(MultiplexedConnection) -> RedisFuture<T>,
    {
        retry_with_backoff(max_attempts, self.retry_delay_ms, || {
            operation(self.connection.clone())
        })
        .await
    }
}

/// Run `operation` up to `max_attempts` times, doubling the delay after each
/// retriable failure
pub(crate) async fn retry_with_backoff<F, Fut, T>(
    max_attempts: u32,
    retry_delay_ms: u64,
    mut operation: F,
) -> RedisResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = RedisResult<T>>,
{
    let mut attempts = 0;
    let mut delay = retry_delay_ms;

    loop {
        attempts += 1;

        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) if attempts < max_attempts && is_retriable_error(&e) => {
                warn!(
                    "Redis operation failed (attempt {}/{}): {}. Retrying in {}ms...",
                    attempts, max_attempts, e, delay
                );
                sleep(Duration::from_millis(delay)).await;
                delay = (delay * 2).min(5000);
            }
            Err(e) => return Err(e),
        }
    }
}

/// Connection-level failures are worth another attempt; command errors are not
fn is_retriable_error(error: &RedisError) -> bool {
    error.is_io_error() || error.is_connection_dropped() || error.is_timeout()
}

/// Hide the password part of a Redis URL for logging
pub(crate) fn mask_url(url: &str) -> String {
    if let Some(scheme_end) = url.find("://") {
        let rest = &url[scheme_end + 3..];
        if let Some(at) = rest.rfind('@') {
            let credentials = &rest[..at];
            let masked = match credentials.find(':') {
                Some(colon) => format!("{}:****", &credentials[..colon]),
                None => "****".to_string(),
            };
            return format!("{}{}@{}", &url[..scheme_end + 3], masked, &rest[at + 1..]);
        }
    }
    url.to_string()
}
