//! Interactive 2D lattice-Boltzmann flow on a fixed grid: a D2Q9
//! collide-and-stream solver with bounce-back obstacles, cursor-driven
//! forcing and a handful of colorization passes on top of it.

pub mod grid;
pub mod lattice;
pub mod render;
pub mod settings;
pub mod solver;
