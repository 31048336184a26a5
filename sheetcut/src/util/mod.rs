/// Correctness checks used in `debug_assert!()` blocks
pub mod assertions;
pub mod config;

#[doc(inline)]
pub use config::CacheConfig;

#[doc(inline)]
pub use config::OptimizerConfig;
