use serde::{Deserialize, Serialize};

/// Which layer of the lookup chain produced today's location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationSource {
    Event,
    Schedule,
    Fallback,
}

/// Where the truck is today, resolved at read time:
/// today's event → today's weekday schedule entry → configured fallback.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentLocation {
    pub address: String,
    pub time: Option<String>,
    pub title: Option<String>,
    pub source: LocationSource,
}

/// Query params for GET /resolve-maps-link.
#[derive(Debug, Deserialize)]
pub struct ResolveMapsQuery {
    pub url: String,
}

/// Best-effort result of picking apart a Google Maps URL. Any subset of
/// the optional fields may be absent; the caller falls back to treating
/// the original input as a plain address.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedMapsLink {
    pub resolved_url: String,
    pub place_name: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}
