//! Quote cache implementations.

mod in_memory;
mod redis;

pub use in_memory::InMemoryQuoteCache;
pub use redis::RedisQuoteCache;
