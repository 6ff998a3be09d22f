//! Hash maps used by the engine.
//!
//! Keys are row indices and short reuse identifiers, so the maps default to
//! `rustc-hash`. The `std-hash` feature switches to std's SipHash maps.

#[cfg(not(feature = "std-hash"))]
pub mod map {
    pub type HashMap<K, V> = rustc_hash::FxHashMap<K, V>;
}

#[cfg(feature = "std-hash")]
pub mod map {
    pub type HashMap<K, V> = std::collections::HashMap<K, V>;
}

/// Cells of one column keyed by row.
pub type RowMap<V> = map::HashMap<usize, V>;
