//! Layout calculation modules for poster tiling
//!
//! This module handles all the geometric calculations:
//! - Grid partitioning (which pixels go on which page)
//! - Tile placement (where a tile sits on its page, at physical size)

mod grid;
mod placement;
mod types;

pub use grid::*;
pub use placement::*;
pub use types::*;
