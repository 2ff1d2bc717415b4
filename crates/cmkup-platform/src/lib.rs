//! Host platform taxonomy for cmkup.
//!
//! - [`os`] classifies raw host and publisher OS strings into an [`OsFamily`]
//! - [`arch`] maps the running process' architecture to its JVM-style name
//! - [`compat`] holds the host/archive architecture compatibility matrix
//! - [`host`] describes the execution target of a resolution
//! - [`dir`] picks the default tools root, honouring `CMKUP_HOME`

pub use error::{Error, Result};
pub use host::HostDescriptor;
pub use os::OsFamily;

pub mod arch;
pub mod compat;
pub mod dir;
mod error;
pub mod host;
pub mod os;
