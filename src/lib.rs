//! Solver for the circular 16-puzzle: a 4x4 grid of the numbers 1 to 16
//! sorted using only wrap-around rotations of whole rows and columns.

pub mod board;
pub mod config;
pub mod heuristic;
pub mod render;
pub mod route;
pub mod search;

pub use board::{Board, BoardError, Direction, Move, Shift};
pub use route::Route;
pub use search::{solve, Outcome, SearchLimits, SearchReport, Solution};
