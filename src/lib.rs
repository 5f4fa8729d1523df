//! WikiSync Tools Library
//!
//! Two small utilities around the boss database: an inventory of the attribute
//! tags used in the monster dump, and a prober that discovers the WikiSync
//! RuneLite plugin's local websocket and saves the player data it reports.

pub mod attributes;
pub mod constants;
pub mod error;
pub mod logging;
pub mod probe;
#[cfg(test)]
pub mod test_utils;
