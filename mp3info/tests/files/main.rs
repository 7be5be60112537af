#![allow(missing_docs)]

mod mpeg;
mod tags;
pub(crate) mod util;
