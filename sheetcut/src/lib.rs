//! Guillotine cutting-stock optimizer for rectangular sheet materials.
//!
//! Pieces are packed greedily onto as few sheets as possible, respecting kerf, edge trims,
//! rotation and grain constraints. Identical requests are served from a content-addressed
//! result cache keyed by a SHA-256 digest of their canonical form.

/// Content-addressed storage of optimization results
pub mod cache;

/// Entities to model the cutting-stock problem: pieces, materials, sheets
pub mod entities;

/// Typed failures of an optimization request
pub mod error;

/// Geometric primitives
pub mod geometry;

/// Importing requests into and exporting results out of this library, canonical hashing
pub mod io;

/// Free-space bookkeeping, placement and the multi-sheet orchestrator
pub mod packing;

/// Facade tying the orchestrator and the result cache together
pub mod service;

/// Helper functions which do not belong to any specific module
pub mod util;
