//! # Workflows Module
//!
//! Top-level entry points that take a structure file from disk to a populated
//! store. The parsing core in [`engine`](crate::engine) works on text already in
//! memory; workflows add the file handling around it.
//!
//! - **Load Workflow** ([`load`]) - Reads a file, derives the structure id from
//!   the file name, lets the extension or content pick the format, and runs the
//!   format driver.

pub mod load;
