//! Conway's Game of Life on a finite, non-wrapping grid.
//!
//! [`step`] computes the next generation of a grid and [`locate`] lists the
//! coordinates of its live cells. [`Field`] wraps a validated grid for
//! callers that step repeatedly.

pub mod draw;
pub mod error;
pub mod logging;
pub mod proc;

pub use error::{Error, Result};
pub use proc::{locate, step, Coord, Field, Rect};
