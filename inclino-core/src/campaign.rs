use crate::error::{CoreError, Result};
use crate::reading::Reading;
use chrono::NaiveDateTime;
use inclino_utils::dates::parse_timestamp;
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::{cmp::Ordering, fs::File, io::BufReader, io::Read, path::Path};

/// Campaign metadata flags. Missing flags fall back to an active,
/// non-reference, non-quarantined campaign.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub struct CampaignInfo {
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub reference: bool,
    #[serde(default, alias = "quarantine")]
    pub quarentine: bool,
}

fn default_active() -> bool {
    true
}

impl Default for CampaignInfo {
    fn default() -> Self {
        CampaignInfo {
            active: true,
            reference: false,
            quarentine: false,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CampaignRecord {
    calc: Vec<Reading>,
    #[serde(default)]
    campaign_info: Option<CampaignInfo>,
}

/// One dated set of inclinometer readings.
#[derive(Debug, Clone, PartialEq)]
pub struct Campaign {
    pub key: String,
    pub info: CampaignInfo,
    pub calc: Vec<Reading>,
}

impl Campaign {
    pub fn new(key: impl Into<String>, info: CampaignInfo, calc: Vec<Reading>) -> Self {
        Campaign {
            key: key.into(),
            info,
            calc,
        }
    }

    /// Measurement time parsed from the campaign key.
    pub fn timestamp(&self) -> Result<NaiveDateTime> {
        parse_timestamp(&self.key).map_err(|e| CoreError::Timestamp {
            key: self.key.clone(),
            message: e.to_string(),
        })
    }

    /// Usable as a comparison baseline or correction target.
    pub fn is_usable(&self) -> bool {
        self.info.active && !self.info.quarentine
    }
}

/// A campaign paired with its parsed timestamp.
#[derive(Debug, Clone, Copy)]
pub struct DatedCampaign<'a> {
    pub timestamp: NaiveDateTime,
    pub campaign: &'a Campaign,
}

/// A sensor document: campaigns keyed by ISO-8601 timestamp.
///
/// Entries that are not objects, or objects without a `calc` list, are
/// metadata blocks and are skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CampaignSet {
    campaigns: Vec<Campaign>,
}

impl CampaignSet {
    pub fn new(campaigns: Vec<Campaign>) -> Self {
        CampaignSet { campaigns }
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(s)?;
        Self::from_value(value)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let value: Value = serde_json::from_reader(reader)?;
        Self::from_value(value)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(map) = value else {
            return Err(CoreError::InvalidDocument(
                "expected an object keyed by campaign timestamp".to_string(),
            ));
        };
        Self::from_map(map)
    }

    fn from_map(map: Map<String, Value>) -> Result<Self> {
        let mut campaigns = Vec::new();
        for (key, value) in map {
            let has_calc = value
                .get("calc")
                .map(|calc| !calc.is_null())
                .unwrap_or(false);
            if !has_calc {
                debug!("Skipping non-campaign entry {key}");
                continue;
            }
            let record: CampaignRecord = serde_json::from_value(value)?;
            campaigns.push(Campaign {
                key,
                info: record.campaign_info.unwrap_or_default(),
                calc: record.calc,
            });
        }
        debug!("Loaded {} campaigns", campaigns.len());
        Ok(CampaignSet { campaigns })
    }

    pub fn len(&self) -> usize {
        self.campaigns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.campaigns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Campaign> {
        self.campaigns.iter()
    }

    /// Campaign by exact key.
    pub fn get(&self, key: &str) -> Result<&Campaign> {
        self.campaigns
            .iter()
            .find(|campaign| campaign.key == key)
            .ok_or_else(|| CoreError::CampaignNotFound(key.to_string()))
    }

    /// All campaigns in ascending timestamp order.
    pub fn sorted(&self) -> Result<Vec<DatedCampaign<'_>>> {
        let mut dated = self
            .campaigns
            .iter()
            .map(|campaign| {
                Ok(DatedCampaign {
                    timestamp: campaign.timestamp()?,
                    campaign,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        dated.sort_by(|a, b| match a.timestamp.cmp(&b.timestamp) {
            Ordering::Equal => a.campaign.key.cmp(&b.campaign.key),
            other => other,
        });
        Ok(dated)
    }

    /// Campaigns whose `active` flag is not false, in ascending timestamp order.
    pub fn sorted_active(&self) -> Result<Vec<DatedCampaign<'_>>> {
        let mut dated = self.sorted()?;
        dated.retain(|d| d.campaign.info.active);
        Ok(dated)
    }

    /// The baseline campaign: the latest usable campaign flagged as
    /// reference, otherwise the earliest usable campaign.
    pub fn reference(&self) -> Result<&Campaign> {
        let dated = self.sorted()?;
        let usable = dated.iter().filter(|d| d.campaign.is_usable());
        if let Some(flagged) = usable.clone().filter(|d| d.campaign.info.reference).last() {
            return Ok(flagged.campaign);
        }
        usable
            .map(|d| d.campaign)
            .next()
            .ok_or(CoreError::NoReference)
    }
}
