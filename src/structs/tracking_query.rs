use url::form_urlencoded;

/// `?c=` and `?lid=` on the tracking routes.
///
/// Parsed leniently from the raw query string: repeated keys keep their
/// first value and unknown keys are ignored, so a tracking hit never fails
/// on its query.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct TrackingQuery {
    pub lid: Option<String>,
    pub c: Option<String>,
}

impl TrackingQuery {
    pub fn parse(query_string: &str) -> Self {
        let mut query = Self::default();
        for (key, value) in form_urlencoded::parse(query_string.as_bytes()) {
            let slot = match key.as_ref() {
                "lid" => &mut query.lid,
                "c" => &mut query.c,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        query
    }

    pub fn campaign(&self) -> String {
        self.c.clone().unwrap_or_default()
    }

    pub fn lead_id(&self) -> String {
        self.lid.clone().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_known_keys() {
        let q = TrackingQuery::parse("lid=lead%201&c=gyms_v1&utm_x=y");
        assert_eq!(q.lead_id(), "lead 1");
        assert_eq!(q.campaign(), "gyms_v1");
    }

    #[test]
    fn repeated_keys_keep_first_value() {
        let q = TrackingQuery::parse("c=a&c=b&lid=x&lid=y");
        assert_eq!(q.campaign(), "a");
        assert_eq!(q.lead_id(), "x");
    }

    #[test]
    fn empty_and_garbled_queries_default() {
        assert_eq!(TrackingQuery::parse(""), TrackingQuery::default());
        let q = TrackingQuery::parse("c=%ZZ&&=&lid");
        assert_eq!(q.campaign(), "%ZZ");
        assert_eq!(q.lead_id(), "");
    }
}
