mod backend;
mod memory;
mod result_cache;

#[doc(inline)]
pub use backend::CacheBackend;

#[doc(inline)]
pub use backend::CacheError;

#[doc(inline)]
pub use memory::MemoryBackend;

#[doc(inline)]
pub use result_cache::CacheEntry;

#[doc(inline)]
pub use result_cache::INDEX_KEY;

#[doc(inline)]
pub use result_cache::ResultCache;
