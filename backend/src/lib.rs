//! School fantasy-league backend library.
//!
//! Layout follows ports-and-adapters: [`domain`] holds the rules and the
//! port traits, [`inbound`] the HTTP surface, [`outbound`] the PostgreSQL,
//! bcrypt, and mail adapters.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(feature = "seed-data")]
pub mod seed;

pub use doc::ApiDoc;
pub use middleware::Correlate;
