use serde::{Deserialize, Serialize};

use sheetcut::io::ext_repr::{OptimizeRequest, OptimizeResponse};
use sheetcut::util::OptimizerConfig;

/// Contents of a solution file: the request, its result and the configuration it was produced with
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SolutionOutput {
    pub request: OptimizeRequest,
    pub response: OptimizeResponse,
    pub config: OptimizerConfig,
}
