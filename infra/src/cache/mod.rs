//! Cache module for Redis-backed state
//!
//! Provides the Redis client with retry logic and the refresh token store
//! built on top of it.

pub mod redis_client;
pub mod session_store;


pub use redis_client::RedisClient;
pub use session_store::RedisSessionStore;
