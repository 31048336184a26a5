mod free_space;
mod orchestrator;
/// Orientation selection and single-sheet placement
pub mod placement;
mod solution;
mod split_rule;

#[doc(inline)]
pub use free_space::FreeRectKey;

#[doc(inline)]
pub use free_space::FreeSpaceTracker;

#[doc(inline)]
pub use orchestrator::Orchestrator;

#[doc(inline)]
pub use placement::Orientation;

#[doc(inline)]
pub use placement::PlacementOption;

#[doc(inline)]
pub use solution::Solution;

#[doc(inline)]
pub use split_rule::SplitRule;
