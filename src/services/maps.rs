use lazy_static::lazy_static;
use percent_encoding::percent_decode_str;
use regex::Regex;
use reqwest::header;
use url::Url;

use crate::models::location::ResolvedMapsLink;

/// Substrings identifying redirect-based short links that must be resolved
/// before their destination URL can be picked apart.
const SHORTENER_DOMAINS: [&str; 2] = ["maps.app.goo.gl", "goo.gl"];

/// Google rejects requests without a browser-like User-Agent.
const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

lazy_static! {
    static ref PLACE_RE: Regex = Regex::new(r"/maps/place/([^/]+)").unwrap();
    static ref DATA_LAT_RE: Regex = Regex::new(r"!3d(-?\d+\.\d+)").unwrap();
    static ref DATA_LNG_RE: Regex = Regex::new(r"!4d(-?\d+\.\d+)").unwrap();
    // Coordinates may omit the fractional part ("?q=30,-81")
    static ref VIEWPORT_RE: Regex =
        Regex::new(r"@(-?\d+(?:\.\d+)?),(-?\d+(?:\.\d+)?)").unwrap();
    static ref DIRECTIONS_RE: Regex =
        Regex::new(r"/dir//(-?\d+(?:\.\d+)?),(-?\d+(?:\.\d+)?)").unwrap();
    static ref COORD_PAIR_RE: Regex =
        Regex::new(r"(-?\d+(?:\.\d+)?)\s*,\s*(-?\d+(?:\.\d+)?)").unwrap();
}

/// Turns a user-supplied string (full Google Maps URL, shortened redirect
/// link, or plain address) into a best-effort display name and coordinate
/// pair. Maps URLs are an undocumented third-party format, so this is an
/// ordered list of independent extraction strategies rather than a parser;
/// every failure degrades to "fewer fields populated".
pub struct MapsResolver {
    http: reqwest::Client,
    geocoding_api_key: Option<String>,
}

impl MapsResolver {
    pub fn new(geocoding_api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            geocoding_api_key,
        }
    }

    pub async fn resolve(&self, input: &str) -> ResolvedMapsLink {
        let resolved_url = if is_short_link(input) {
            match self.follow_redirects(input).await {
                Ok(url) => url,
                Err(e) => {
                    tracing::warn!("Short-link resolution failed, using the raw link: {e}");
                    input.to_string()
                }
            }
        } else {
            input.to_string()
        };

        let place_name = extract_place_name(&resolved_url);
        let mut coords = extract_coordinates(&resolved_url);

        // A place name without coordinates can still be pinned through the
        // geocoding API, when a key is configured.
        if coords.is_none() {
            if let (Some(name), Some(key)) =
                (place_name.as_deref(), self.geocoding_api_key.as_deref())
            {
                coords = self.geocode(name, key).await;
            }
        }

        ResolvedMapsLink {
            resolved_url,
            place_name,
            lat: coords.map(|(lat, _)| lat),
            lng: coords.map(|(_, lng)| lng),
        }
    }

    /// GET with redirect-following; the final URL is the answer.
    async fn follow_redirects(&self, url: &str) -> anyhow::Result<String> {
        let response = self
            .http
            .get(url)
            .header(header::USER_AGENT, BROWSER_USER_AGENT)
            .send()
            .await?;
        Ok(response.url().to_string())
    }

    async fn geocode(&self, place: &str, key: &str) -> Option<(f64, f64)> {
        let response = self
            .http
            .get("https://maps.googleapis.com/maps/api/geocode/json")
            .query(&[("address", place), ("key", key)])
            .send()
            .await
            .ok()?;
        let body: serde_json::Value = response.json().await.ok()?;
        if body["status"] != "OK" {
            tracing::warn!(
                "Geocoding {place:?} failed: {} {}",
                body["status"],
                body["error_message"]
            );
            return None;
        }
        let location = &body["results"][0]["geometry"]["location"];
        Some((location["lat"].as_f64()?, location["lng"].as_f64()?))
    }
}

pub fn is_short_link(input: &str) -> bool {
    SHORTENER_DOMAINS.iter().any(|domain| input.contains(domain))
}

/// Human place name from a `/maps/place/<name>` path segment, falling back
/// to a non-numeric `q=` query value.
fn extract_place_name(url: &str) -> Option<String> {
    if let Some(captures) = PLACE_RE.captures(url) {
        return Some(decode_segment(&captures[1]));
    }
    if let Some(q) = query_param(url, "q") {
        if !COORD_PAIR_RE.is_match(&q) {
            return Some(q);
        }
    }
    None
}

/// Ordered coordinate strategies; the first hit wins. The `!3d`/`!4d` data
/// tokens come first because they encode the marked place itself, not the
/// map's viewport center.
fn extract_coordinates(url: &str) -> Option<(f64, f64)> {
    extract_data_tokens(url)
        .or_else(|| extract_viewport(url))
        .or_else(|| extract_query_coords(url))
        .or_else(|| extract_directions(url))
        .or_else(|| extract_bare_pair(url))
}

fn extract_data_tokens(url: &str) -> Option<(f64, f64)> {
    let lat = DATA_LAT_RE.captures(url)?[1].parse().ok()?;
    let lng = DATA_LNG_RE.captures(url)?[1].parse().ok()?;
    Some((lat, lng))
}

fn extract_viewport(url: &str) -> Option<(f64, f64)> {
    let captures = VIEWPORT_RE.captures(url)?;
    Some((captures[1].parse().ok()?, captures[2].parse().ok()?))
}

fn extract_query_coords(url: &str) -> Option<(f64, f64)> {
    let q = query_param(url, "q")?;
    let captures = COORD_PAIR_RE.captures(&q)?;
    Some((captures[1].parse().ok()?, captures[2].parse().ok()?))
}

fn extract_directions(url: &str) -> Option<(f64, f64)> {
    let captures = DIRECTIONS_RE.captures(url)?;
    Some((captures[1].parse().ok()?, captures[2].parse().ok()?))
}

/// Last resort: any bare "num,num" substring, kept only if it is a
/// plausible latitude/longitude pair.
fn extract_bare_pair(url: &str) -> Option<(f64, f64)> {
    let captures = COORD_PAIR_RE.captures(url)?;
    let lat: f64 = captures[1].parse().ok()?;
    let lng: f64 = captures[2].parse().ok()?;
    if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng) {
        Some((lat, lng))
    } else {
        None
    }
}

fn decode_segment(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}

fn query_param(url: &str, name: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    parsed
        .query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_link_detection() {
        assert!(is_short_link("https://maps.app.goo.gl/AbCdEf"));
        assert!(is_short_link("https://goo.gl/maps/XyZ"));
        assert!(!is_short_link("https://www.google.com/maps/place/Somewhere"));
        assert!(!is_short_link("123 Main St"));
    }

    #[test]
    fn test_place_name_decoded() {
        let url = "https://www.google.com/maps/place/Jacksonville+Beach/";
        assert_eq!(
            extract_place_name(url).as_deref(),
            Some("Jacksonville Beach")
        );
        assert!(extract_coordinates(url).is_none());
    }

    #[test]
    fn test_place_name_percent_decoded() {
        let url = "https://www.google.com/maps/place/Caf%C3%A9+Del+Mar/@30.1,-81.4,15z";
        assert_eq!(extract_place_name(url).as_deref(), Some("Café Del Mar"));
    }

    #[test]
    fn test_data_tokens_beat_viewport() {
        // Viewport center differs from the marked place; !3d/!4d must win.
        let url = "https://www.google.com/maps/place/X/@30.28,-81.39,17z/data=!3m1!4b1!4m6!3m5!1s0x0:0x0!8m2!3d30.42!4d-81.69";
        assert_eq!(extract_coordinates(url), Some((30.42, -81.69)));
    }

    #[test]
    fn test_viewport_fallback() {
        let url = "https://www.google.com/maps/@30.2861,-81.3963,17z";
        assert_eq!(extract_coordinates(url), Some((30.2861, -81.3963)));
    }

    #[test]
    fn test_query_coords() {
        let url = "https://maps.google.com/?q=30.32,-81.65";
        assert_eq!(extract_coordinates(url), Some((30.32, -81.65)));
    }

    #[test]
    fn test_query_coords_without_fraction() {
        let url = "https://maps.google.com/?q=30,-81";
        assert_eq!(extract_coordinates(url), Some((30.0, -81.0)));
    }

    #[test]
    fn test_query_text_is_place_name() {
        let url = "https://maps.google.com/?q=Riverside%20Arts%20Market";
        assert_eq!(
            extract_place_name(url).as_deref(),
            Some("Riverside Arts Market")
        );
        assert!(extract_coordinates(url).is_none());
    }

    #[test]
    fn test_directions_path() {
        let url = "https://www.google.com/maps/dir//30.3322,-81.6557";
        assert_eq!(extract_coordinates(url), Some((30.3322, -81.6557)));
    }

    #[test]
    fn test_bare_pair_range_validated() {
        assert_eq!(
            extract_bare_pair("stall at 30.32, -81.65 ish"),
            Some((30.32, -81.65))
        );
        // Version-looking numbers must not be mistaken for coordinates
        assert!(extract_bare_pair("build 537.36,1024.5").is_none());
    }
}
