//! Purpose: Define the stable public Rust API boundary for reply handling.
//! Exports: `Reply`, `Value`, `Primitive`, `Error`, `ErrorKind`.
//! Role: Public, additive-only surface; hides the decode seam.
//! Invariants: Callers never need `serde_json` types beyond `Map`/`Value` for construction.

#[doc(hidden)]
pub use crate::core::error::to_exit_code;
pub use crate::core::error::{Error, ErrorKind};
pub use crate::core::reply::Reply;
pub use crate::core::value::{Primitive, Value};
