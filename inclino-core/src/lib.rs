//! Core types for inclinometer campaign data.
//!
//! A sensor document is a JSON object keyed by ISO-8601 timestamps; each
//! campaign entry carries a `calc` list of depth-indexed [`Reading`]s and a
//! `campaign_info` block of flags.

pub mod campaign;
pub mod error;
pub mod reading;

pub use campaign::{Campaign, CampaignInfo, CampaignSet, DatedCampaign};
pub use error::{CoreError, Result};
pub use reading::{ChecksumValue, Reading};

/// Depth tolerance used when matching readings across campaigns.
pub const DEPTH_TOLERANCE: f64 = 0.01;
