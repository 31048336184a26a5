/// External (serializable) representations of requests and results.
pub mod ext_repr;

/// All logic for converting external representations into internal ones
pub mod import;

/// All logic for exporting internal representations into external ones
pub mod export;

/// Order-independent canonical form of a request and its content hash
pub mod canonical;
