mod material;
mod params;
mod piece;
mod placed_piece;
mod sheet;

#[doc(inline)]
pub use material::GrainDirection;

#[doc(inline)]
pub use material::Material;

#[doc(inline)]
pub use material::MaterialCatalog;

#[doc(inline)]
pub use params::CuttingParameters;

#[doc(inline)]
pub use piece::MAX_QUANTITY;

#[doc(inline)]
pub use piece::Piece;

#[doc(inline)]
pub use piece::UnitPiece;

#[doc(inline)]
pub use placed_piece::PlacedPiece;

#[doc(inline)]
pub use sheet::Sheet;

#[doc(inline)]
pub use sheet::SheetLayout;
