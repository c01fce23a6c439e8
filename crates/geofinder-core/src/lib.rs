// crates/geofinder-core/src/lib.rs

//! Resolves free-text genealogical place names ("St Mary's Church, Dover,
//! Kent, England, UK") to canonical gazetteer entries.
//!
//! The gazetteer itself sits behind the [`Gazetteer`] trait; this crate
//! parses, normalizes, submits alternative readings, ranks and classifies.
//! [`MemoryGazetteer`] is a small in-memory implementation.

pub mod country;
pub mod error;
#[cfg(feature = "json")]
pub mod loader;
pub mod memory;
pub mod model;
pub mod parser;
pub mod rank;
pub mod region;
pub mod resolver;
pub mod search;
pub mod tables;
pub mod text;
pub mod traits;

// Re-exports
pub use crate::country::CountryDictionary;
pub use crate::error::{GeoError, Result};
pub use crate::memory::{CountryRecord, Dataset, MemoryGazetteer, PlaceRecord};
pub use crate::model::{
    AdvancedSearch, Classification, GeoRow, LookupKind, PlaceComponents, PlaceQuery, PlaceType,
    ResolvedPlace, ResultFlags, SearchCriteria, TargetRole,
};
pub use crate::parser::parse_place;
pub use crate::rank::RankConfig;
pub use crate::resolver::{Resolver, ResolverConfig};
pub use crate::text::{country_normalize, normalize, search_normalize, CommaMode};
pub use crate::traits::Gazetteer;

pub mod prelude {
    pub use crate::{
        Classification, Gazetteer, GeoError, MemoryGazetteer, PlaceQuery, Resolver,
        ResolverConfig, Result,
    };
}
