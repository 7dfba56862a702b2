//! Screen layouts

pub mod board;
