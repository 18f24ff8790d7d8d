//! Console output

pub mod formatter;
