pub mod cutter;
pub mod solid;

pub use cutter::CuttingSurface;
pub use solid::{Face, Solid};
