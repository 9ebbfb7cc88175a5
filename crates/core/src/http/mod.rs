//! Transport port and path construction

pub mod paths;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;
