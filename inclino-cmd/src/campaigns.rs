//! Campaign listing for a sensor document.

use crate::load_campaigns;
use inclino_core::CampaignSet;
use inclino_utils::dates::format_timestamp;

fn flag(set: bool, name: &str) -> &str {
    if set {
        name
    } else {
        ""
    }
}

/// One line per campaign in timestamp order.
pub fn describe_campaigns(set: &CampaignSet) -> anyhow::Result<Vec<String>> {
    let reference_key = set.reference().ok().map(|c| c.key.clone());
    let lines = set
        .sorted()?
        .iter()
        .map(|d| {
            let info = d.campaign.info;
            let is_reference = reference_key.as_deref() == Some(d.campaign.key.as_str());
            format!(
                "{:<20} {:>4} readings {:<8} {:<9} {}",
                format_timestamp(&d.timestamp),
                d.campaign.calc.len(),
                if info.active { "active" } else { "inactive" },
                flag(is_reference, "reference"),
                flag(info.quarentine, "quarantine"),
            )
            .trim_end()
            .to_string()
        })
        .collect();
    Ok(lines)
}

pub fn run_campaigns(data: &str) -> anyhow::Result<()> {
    let set = load_campaigns(data)?;
    for line in describe_campaigns(&set)? {
        println!("{line}");
    }
    Ok(())
}
