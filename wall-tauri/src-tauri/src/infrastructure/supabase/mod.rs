pub mod client;
pub mod protocol;
pub mod realtime;
pub mod rest_store;
pub mod storage;

pub use client::SupabaseClient;
pub use realtime::{RealtimeError, SupabaseRealtime};
pub use rest_store::PostgrestPostStore;
pub use storage::SupabaseObjectStorage;
