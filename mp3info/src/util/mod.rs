pub(crate) mod alloc;
pub mod bits;
pub mod io;
pub(crate) mod text;
