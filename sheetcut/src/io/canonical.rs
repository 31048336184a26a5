use std::fmt::{Display, Formatter};

use itertools::Itertools;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::entities::GrainDirection;
use crate::error::{OptimizeError, OptimizeResult};
use crate::io::ext_repr::{CutItem, ExtCuttingParameters, ExtMaterial, OptimizeRequest};

/// Prefix of the cache key under which a result is stored
pub const RESULT_KEY_PREFIX: &str = "opt:";
/// Prefix of the cache key under which the metadata entry of a result is stored
pub const META_KEY_PREFIX: &str = "optmeta:";

/// Order-independent form of an [`OptimizeRequest`], restricted to the fields that affect the result.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CanonicalRequest {
    pub materials: Vec<CanonicalMaterial>,
    pub cuts: Vec<CanonicalCut>,
    pub cutting_parameters: ExtCuttingParameters,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CanonicalMaterial {
    pub code: String,
    pub width: u32,
    pub height: u32,
    pub price: f64,
    /// `"h"`, `"v"` or `"none"`
    pub grain_direction: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct CanonicalCut {
    pub material: String,
    pub width: u32,
    pub height: u32,
    pub quantity: u32,
    /// Empty if the cut has no label
    pub label: String,
    /// `"h"`, `"v"` or `"none"`
    pub force_grain: String,
    pub allow_rotation: bool,
    pub priority: i32,
}

fn material_sort_key(m: &ExtMaterial) -> (&str, u32, u32, OrderedFloat<f64>, &'static str) {
    (
        m.code.as_str(),
        m.width,
        m.height,
        OrderedFloat(m.price),
        GrainDirection::token(m.grain_direction),
    )
}

#[allow(clippy::type_complexity)]
fn cut_sort_key(c: &CutItem) -> (&str, u32, u32, u32, &str, &'static str, bool, i32) {
    (
        c.material.as_str(),
        c.width,
        c.height,
        c.quantity,
        c.label.as_deref().unwrap_or(""),
        GrainDirection::token(c.force_grain),
        c.allow_rotation,
        c.priority,
    )
}

/// Returns a copy of `request` with its materials and cuts in canonical order.
/// Two requests that only differ in the order of these lists map to the same value.
pub fn canonical_order(request: &OptimizeRequest) -> OptimizeRequest {
    OptimizeRequest {
        project_name: request.project_name.clone(),
        materials: request
            .materials
            .iter()
            .sorted_by(|a, b| material_sort_key(a).cmp(&material_sort_key(b)))
            .cloned()
            .collect(),
        cuts: request
            .cuts
            .iter()
            .sorted_by(|a, b| cut_sort_key(a).cmp(&cut_sort_key(b)))
            .cloned()
            .collect(),
        cutting_parameters: request.cutting_parameters,
    }
}

pub fn canonicalize(request: &OptimizeRequest) -> CanonicalRequest {
    let ordered = canonical_order(request);
    CanonicalRequest {
        materials: ordered
            .materials
            .iter()
            .map(|m| CanonicalMaterial {
                code: m.code.clone(),
                width: m.width,
                height: m.height,
                price: m.price,
                grain_direction: GrainDirection::token(m.grain_direction).to_string(),
            })
            .collect(),
        cuts: ordered
            .cuts
            .iter()
            .map(|c| CanonicalCut {
                material: c.material.clone(),
                width: c.width,
                height: c.height,
                quantity: c.quantity,
                label: c.label.clone().unwrap_or_default(),
                force_grain: GrainDirection::token(c.force_grain).to_string(),
                allow_rotation: c.allow_rotation,
                priority: c.priority,
            })
            .collect(),
        cutting_parameters: ordered.cutting_parameters,
    }
}

/// Compact JSON with lexicographically sorted keys at every level.
pub fn canonical_json(canonical: &CanonicalRequest) -> OptimizeResult<String> {
    //serde_json::Value keeps object keys in a BTreeMap
    let value = serde_json::to_value(canonical)
        .map_err(|e| OptimizeError::Canonicalization(e.to_string()))?;
    serde_json::to_string(&value).map_err(|e| OptimizeError::Canonicalization(e.to_string()))
}

/// SHA-256 content address of a [`CanonicalRequest`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RequestHash(String);

impl RequestHash {
    pub fn of(canonical: &CanonicalRequest) -> OptimizeResult<Self> {
        let json = canonical_json(canonical)?;
        Ok(Self::of_json(&json))
    }

    pub fn of_request(request: &OptimizeRequest) -> OptimizeResult<Self> {
        Self::of(&canonicalize(request))
    }

    fn of_json(json: &str) -> Self {
        RequestHash(format!("{:x}", Sha256::digest(json.as_bytes())))
    }

    /// Parses a digest as produced by [`RequestHash::hex`]. Accepts 64 hex characters, case-insensitive.
    pub fn from_hex(hex: &str) -> Option<Self> {
        (hex.len() == 64 && hex.chars().all(|c| c.is_ascii_hexdigit()))
            .then(|| RequestHash(hex.to_ascii_lowercase()))
    }

    /// 64 lowercase hexadecimal characters
    pub fn hex(&self) -> &str {
        &self.0
    }

    pub fn cache_key(&self) -> String {
        format!("{RESULT_KEY_PREFIX}{}", self.0)
    }

    pub fn meta_key(&self) -> String {
        format!("{META_KEY_PREFIX}{}", self.0)
    }
}

impl Display for RequestHash {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
