//! Top level pages.

pub mod dashboard;
pub mod setup;

pub use self::{dashboard::Dashboard, setup::HunterSetup};
