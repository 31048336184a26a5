use serde::{Deserialize, Serialize};

use sheetcut::util::{CacheConfig, OptimizerConfig};

/// Configuration of the reference application, read from the file passed with `--config-file`
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    pub optimizer: OptimizerConfig,
    pub cache: CacheConfig,
}
