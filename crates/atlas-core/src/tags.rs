//! Grouping of `"Region, Country"` tags into a country → regions index.
//!
//! Tags are free-form strings. A tag containing a comma is treated as a
//! geographic pair: everything before the first comma is the region, the
//! rest is the country. Both halves are trimmed, so `"Paris, France"` and
//! `"Paris,France"` land under the same `"France"` key.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Label excluded from geographic grouping.
pub const SENTINEL_TAG: &str = "Wallpaper";

/// One country and the regions seen for it, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryRegions {
    pub country: String,
    pub regions: Vec<String>,
}

/// Ordered country → regions mapping.
///
/// Serializes as a JSON object whose keys appear in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSummary {
    countries: Vec<CountryRegions>,
}

impl TagSummary {
    #[must_use]
    pub fn countries(&self) -> &[CountryRegions] {
        &self.countries
    }

    /// Regions recorded for `country`, if any.
    #[must_use]
    pub fn regions(&self, country: &str) -> Option<&[String]> {
        self.countries
            .iter()
            .find(|c| c.country == country)
            .map(|c| c.regions.as_slice())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.countries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    fn insert(&mut self, region: &str, country: &str) {
        if let Some(entry) = self.countries.iter_mut().find(|c| c.country == country) {
            if !entry.regions.iter().any(|r| r == region) {
                entry.regions.push(region.to_owned());
            }
        } else {
            self.countries.push(CountryRegions {
                country: country.to_owned(),
                regions: vec![region.to_owned()],
            });
        }
    }
}

impl Serialize for TagSummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.countries.len()))?;
        for entry in &self.countries {
            map.serialize_entry(&entry.country, &entry.regions)?;
        }
        map.end()
    }
}

/// Splits a `"Region, Country"` tag on its first comma.
///
/// Returns `None` for tags without a comma, and for tags where either half is
/// blank or the sentinel label after trimming.
#[must_use]
pub fn split_location_tag(tag: &str) -> Option<(&str, &str)> {
    let (region, country) = tag.split_once(',')?;
    let (region, country) = (region.trim(), country.trim());
    let usable = |part: &str| !part.is_empty() && part != SENTINEL_TAG;
    if !usable(region) || !usable(country) {
        return None;
    }
    Some((region, country))
}

/// Groups geographic tags by country.
///
/// Non-geographic tags are skipped silently; there are no error cases.
pub fn summarize_tags<I, S>(tags: I) -> TagSummary
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut summary = TagSummary::default();
    for tag in tags {
        if let Some((region, country)) = split_location_tag(tag.as_ref()) {
            summary.insert(region, country);
        }
    }
    summary
}

/// First tag that contains a comma, used verbatim as a geocoding query.
#[must_use]
pub fn find_location_tag(tags: &[String]) -> Option<&str> {
    tags.iter().map(String::as_str).find(|t| t.contains(','))
}

#[cfg(test)]
#[path = "tags_test.rs"]
mod tests;
