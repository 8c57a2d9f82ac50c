mod cache;
pub use cache::FileCache;

mod errors;
pub use errors::CacheError;
