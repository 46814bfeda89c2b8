//! GROQ query text for every read the site and backfill job perform.
//!
//! User-supplied values are never spliced into query text; they travel as
//! `$param` values alongside the query. Only the numeric page window is
//! formatted in directly.

use atlas_core::PageWindow;

/// Published file and image assets.
const ASSET_FILTER: &str =
    r#"_type in ["sanity.fileAsset", "sanity.imageAsset"] && !(_id in path("drafts.**"))"#;

const ASSET_PROJECTION: &str = r#"{
  _id,
  _createdAt,
  _updatedAt,
  mimeType,
  "tags": opt.media.tags[]->name.current,
  "lat": metadata.location.lat,
  "lng": metadata.location.lng,
  size,
  url
}"#;

pub(crate) const TAGS: &str = r#"*[_type == "media.tag" && !(_id in path("drafts.**"))] | order(name.current asc) { "name": name.current }"#;

/// Assets carrying `$tag`, newest first, restricted to `window`.
pub(crate) fn assets_by_tag(window: PageWindow) -> String {
    format!(
        "*[{ASSET_FILTER} && $tag in opt.media.tags[]->name.current] {ASSET_PROJECTION} | order(_createdAt desc) [{}...{}]",
        window.start, window.end
    )
}

/// Assets with both coordinates defined, newest first.
pub(crate) fn located_assets() -> String {
    format!(
        "*[{ASSET_FILTER} && defined(metadata.location.lat) && defined(metadata.location.lng)] {ASSET_PROJECTION} | order(_createdAt desc)"
    )
}

/// Assets missing at least one coordinate, oldest first.
pub(crate) fn unlocated_assets() -> String {
    format!(
        r#"*[{ASSET_FILTER} && (!defined(metadata.location.lat) || !defined(metadata.location.lng))] | order(_createdAt asc) {{
  _id,
  originalFilename,
  "tags": opt.media.tags[]->name.current,
  "hasLocation": defined(metadata.location)
}}"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assets_by_tag_uses_parameter_and_window() {
        let query = assets_by_tag(PageWindow::for_page(2, 24));
        assert!(query.contains("$tag in opt.media.tags[]->name.current"));
        assert!(query.ends_with("| order(_createdAt desc) [24...48]"));
    }

    #[test]
    fn located_assets_requires_both_coordinates() {
        let query = located_assets();
        assert!(query.contains("defined(metadata.location.lat)"));
        assert!(query.contains("defined(metadata.location.lng)"));
        assert!(query.contains("order(_createdAt desc)"));
    }

    #[test]
    fn unlocated_assets_matches_either_missing_coordinate() {
        let query = unlocated_assets();
        assert!(query.contains(
            "(!defined(metadata.location.lat) || !defined(metadata.location.lng))"
        ));
        assert!(query.contains(r#"!(_id in path("drafts.**"))"#));
        assert!(query.contains(r#""hasLocation": defined(metadata.location)"#));
    }
}
