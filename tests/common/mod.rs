pub mod callbacks;

pub use callbacks::*;
