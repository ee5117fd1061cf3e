//! Class-file decoding and discovery for jdep.
//!
//! - [`classfile`]: decodes one compiled class into a
//!   [`ClassRecord`](jdep_core::types::ClassRecord)
//! - [`batch`]: parallel decoding of many units
//! - [`walker`]: finds `.class` files under directories and loads their bytes

pub mod batch;
pub mod classfile;
pub mod walker;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use classfile::{decode, DecodeError};
pub use walker::{ClassFileWalker, ClassUnit, WalkError};
