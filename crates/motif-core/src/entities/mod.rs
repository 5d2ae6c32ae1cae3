//! Entity structs for Motif domain objects.
//!
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema`.
//! `RawSearchResult` mirrors what the search API sends; everything else is
//! produced on the client.

mod filters;
mod movie;
mod user;

pub use filters::ContextFilters;
pub use movie::{
    Badge, Certification, DecoratedResult, Palette, RawCertification, RawLabels, RawRuntime,
    RawScore, RawSearchResult, RawYear, Tag, VibeAxis, VibeDynamics,
};
pub use user::{SavedItem, SessionUser};
