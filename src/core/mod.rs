// Core modules implementing reply projection, access, rendering, and errors.
pub mod error;
pub mod path;
pub mod reply;
pub mod text;
pub mod value;
