//! Wire types shared by the daily quotes server and its widget.

pub mod model;
pub mod requests;
pub mod responses;
