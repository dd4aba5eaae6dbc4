// treenotes/src/lib.rs
#![deny(unsafe_code)]
#![warn(clippy::all)]

pub mod error;
pub mod util;

pub mod syntax;
pub mod extract;
pub mod notes;

pub mod tree_view;
pub mod document;

pub mod config;
pub mod commands;
