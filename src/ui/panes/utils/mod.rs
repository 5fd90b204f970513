pub mod formatting;

pub(crate) use formatting::*;
