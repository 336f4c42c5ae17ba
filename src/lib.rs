#![deny(unsafe_op_in_unsafe_fn)]

pub mod alpha;
pub mod constants;
pub mod geometry;
pub mod label;
pub mod memory;
pub mod overlay;
pub mod panic;

#[cfg(test)]
mod testing;
