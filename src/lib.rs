//! Purpose: Library crate projecting i3 IPC JSON replies onto attribute access.
//! Exports: `api` (stable surface), `core` (reply model, rendering, errors).
//! Role: Read model consumed by IPC transports, the `i3reply` CLI, and tests.
//! Invariants: No I/O happens inside the library; callers hand over complete JSON text.
//! Invariants: Replies are immutable after construction.
pub mod api;
pub mod core;
mod json;
