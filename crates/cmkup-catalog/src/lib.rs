//! Download catalog schema and variant resolution.
//!
//! A [`Catalog`] lists every published tool version ([`Installable`]) with one
//! archive per platform ([`Variant`]). [`Catalog::resolve`] picks the single
//! archive that runs on a given [`HostDescriptor`](cmkup_platform::HostDescriptor).

pub use catalog::{Catalog, Installable, Variant};
pub use error::{Available, Error, Result};
pub use resolve::Resolution;

mod catalog;
mod error;
mod resolve;
