/// Marks the start of a campaign's version suffix, as in `restaurants_v1`
pub const VERSION_SEPARATOR: &str = "_v";

/// Derive the industry segment from a campaign tag.
///
/// Everything before the first `_v` is the industry. A campaign without
/// the separator has no industry.
pub fn industry_from_campaign(campaign: &str) -> String {
    match campaign.find(VERSION_SEPARATOR) {
        Some(idx) => campaign[..idx].to_string(),
        None => String::new(),
    }
}
