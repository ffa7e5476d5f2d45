//! Background purge of expired refresh tokens and revocation entries

mod service;


pub use service::{ExpirySweeper, SweepReport, SweeperHandle};
