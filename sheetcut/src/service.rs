use log::info;

use crate::cache::{CacheBackend, CacheEntry, ResultCache};
use crate::error::OptimizeResult;
use crate::io::canonical::{self, RequestHash};
use crate::io::export::export_solution;
use crate::io::ext_repr::{OptimizeRequest, OptimizeResponse};
use crate::io::import::import_request;
use crate::packing::Orchestrator;
use crate::util::OptimizerConfig;

/// Entry point for optimization requests.
///
/// Identical requests, regardless of the order of their materials and cuts, are answered from the cache.
/// All methods take `&self`, so a service can be shared between threads.
pub struct OptimizeService<B: CacheBackend> {
    orchestrator: Orchestrator,
    cache: ResultCache<B>,
}

impl<B: CacheBackend> OptimizeService<B> {
    pub fn new(config: OptimizerConfig, cache: ResultCache<B>) -> Self {
        Self {
            orchestrator: Orchestrator::new(config),
            cache,
        }
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.orchestrator.config
    }

    pub fn cache(&self) -> &ResultCache<B> {
        &self.cache
    }

    pub fn optimize(&self, request: &OptimizeRequest) -> OptimizeResult<OptimizeResponse> {
        //the optimizer runs on the canonical ordering, so permutations of a request yield the same layout
        let ordered = canonical::canonical_order(request);
        let instance = import_request(&ordered)?;
        let hash = RequestHash::of(&canonical::canonicalize(&ordered))?;

        if let Some(mut response) = self.cache.lookup(&hash) {
            info!("[SVC] cache hit for {}", hash);
            response.cached = true;
            response.request_hash = hash.hex().to_string();
            //the project name is not part of the digest
            response.optimization_summary.project_name = instance.project_name;
            return Ok(response);
        }

        info!("[SVC] cache miss for {}, optimizing", hash);
        let solution =
            self.orchestrator
                .solve(&instance.pieces, &instance.materials, &instance.params)?;

        let mut response = export_solution(&solution, &instance.project_name, self.config());
        response.request_hash = hash.hex().to_string();
        self.cache.store(&hash, &response);
        Ok(response)
    }

    /// Cached entry for a hex digest, `None` if the digest is malformed or unknown.
    pub fn cached(&self, hex: &str) -> Option<CacheEntry> {
        let hash = RequestHash::from_hex(hex)?;
        self.cache.entry_by_hash(&hash)
    }

    /// Most recent cached optimizations, newest first.
    pub fn recent(&self, offset: usize, limit: usize) -> Vec<CacheEntry> {
        self.cache.recent(offset, limit)
    }
}
