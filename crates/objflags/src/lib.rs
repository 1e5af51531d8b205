//! objflags: per-object flag storage, naming, and authorization.
//!
//! Every object carries a small bitset of flags. Each flag has a name (plus
//! an optional negative alias), a display letter, a visibility tier, and an
//! access policy deciding who may set or clear it.
//!
//! # Flag commands
//!
//! Setting flags uses whitespace-separated names, each optionally negated:
//! - `wizard dark` sets both
//! - `!dark` or `! dark` clears DARK
//! - `spoof` clears NOSPOOF, since SPOOF is its negative alias
//!
//! Flag lists (`PWc`) use one letter per type or flag and feed searches.
//!
//! The host database is reached through the [`World`] trait;
//! [`MemoryWorld`] is a vector-backed implementation for tests and tools.

pub mod access;
pub mod catalog;
pub mod config;
pub mod dbref;
pub mod engine;
pub mod error;
pub mod flag;
pub mod memory;
pub mod object_type;
pub mod parse;
pub mod privilege;
pub mod query;
pub mod registry;
pub mod visibility;
pub mod world;

pub use access::*;
pub use config::*;
pub use dbref::*;
pub use engine::*;
pub use error::{ConfigError, FlagError, RegistryError, PERMISSION_DENIED};
pub use flag::*;
pub use memory::*;
pub use object_type::*;
pub use parse::*;
pub use privilege::*;
pub use query::*;
pub use registry::*;
pub use visibility::*;
pub use world::*;
