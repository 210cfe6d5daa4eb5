//! Umbrella crate for the DOI declaration builder.
//!
//! ## Crate layout
//! - `core`: entities, share tables, session, and the wire round trip.
//! - `schema`: the embedded field descriptor registry and its validation.
//!
//! The `prelude` module mirrors the surface a frontend needs to build,
//! persist, and export declarations.

pub use doi_core as core;
pub use doi_schema as schema;

pub mod prelude {
    pub use doi_core::prelude::*;
    pub use doi_schema::prelude::*;
}
