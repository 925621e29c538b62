pub mod caching_client;
pub mod http_client;

pub use caching_client::CachingRemoteClient;
pub use http_client::HttpRemoteClient;
