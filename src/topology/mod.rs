//! Mesh topology: adjacency, perimeter traversal and lake removal.
//!
//! Everything in here works on cell indices and the shared-edge neighbour
//! map; coordinates only enter through the lake seed lookup.

pub mod adjacency;
pub mod lakes;
pub mod perimeter;
