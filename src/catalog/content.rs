use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

#[repr(transparent)]
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct ContentId(pub u32);

impl std::fmt::Display for ContentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub id: ContentId,
    pub title: String,
    pub subtitle: String,
    pub image_url: String,
    pub year: String,
    pub rating: String,
    pub content_type: String,
    pub quality: String,
    pub genres: Vec<String>,
    pub duration: String,
    pub content_rating: String,
    pub description: String,
    pub cast: Vec<String>,
    #[serde(default)]
    pub director: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ContentItem {
    /// Running time in seconds parsed from labels like `"2h 15m"` or `"48m"`.
    ///
    /// Labels that are not a running time (`"3 Seasons"`) yield `None`.
    pub fn running_time(&self) -> Option<f64> {
        parse_running_time(&self.duration)
    }
}

pub fn parse_running_time(label: &str) -> Option<f64> {
    static RE_RUNNING_TIME: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^\s*(?:(\d+)\s*h)?\s*(?:(\d+)\s*m(?:in)?)?\s*$").expect("valid regex")
    });

    let captures = RE_RUNNING_TIME.captures(label)?;
    let hours = captures.get(1).and_then(|m| m.as_str().parse::<u32>().ok());
    let minutes = captures.get(2).and_then(|m| m.as_str().parse::<u32>().ok());

    if hours.is_none() && minutes.is_none() {
        return None;
    }

    let seconds = hours
        .unwrap_or(0)
        .checked_mul(3600)?
        .checked_add(minutes.unwrap_or(0).checked_mul(60)?)?;
    Some(f64::from(seconds))
}
