//! Window types.
//!
//! - [`Window`] - Bytes of a stream with their offset
//! - [`WindowResult`] - A window plus the terminal error seen producing it

mod data;
mod result;

pub use data::Window;
pub use result::WindowResult;
