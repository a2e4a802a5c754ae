use url::Url;

pub const UTM_SOURCE: &str = "coldemail";
pub const UTM_MEDIUM: &str = "email";

/// Decorate the landing base with lead and campaign attribution parameters.
///
/// Query parameters already present on the base are kept.
pub fn build_landing_url(base: &str, lead_id: &str, campaign: &str) -> Result<String, url::ParseError> {
    let mut url = Url::parse(base)?;
    url.query_pairs_mut()
        .append_pair("lid", lead_id)
        .append_pair("utm_campaign", campaign)
        .append_pair("utm_source", UTM_SOURCE)
        .append_pair("utm_medium", UTM_MEDIUM)
        .append_pair("c", campaign);

    Ok(url.to_string())
}
