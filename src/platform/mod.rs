//! Platform abstraction layer.
//!
//! [`traits`] defines the seams the control core needs from the board
//! support layer; [`mock`] provides host-test implementations with
//! scripted inputs and recorded outputs.

pub mod mock;
pub mod traits;
