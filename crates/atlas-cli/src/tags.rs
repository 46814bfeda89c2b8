//! `tags` command: prints the country → regions index the site navigation uses.

use atlas_core::{summarize_tags, AppConfig, TagSummary};
use atlas_sanity::SanityClient;

pub(crate) async fn run_tags(config: &AppConfig) -> anyhow::Result<()> {
    let store = SanityClient::from_app_config(config, config.sanity_use_cdn)?;
    let tags = store
        .fetch_tags()
        .await
        .map_err(|e| anyhow::anyhow!("failed to fetch tags: {e}"))?;
    let summary = summarize_tags(&tags);

    tracing::debug!(tags = tags.len(), countries = summary.len(), "summarized tags");
    for line in tag_tree_lines(&summary) {
        println!("{line}");
    }
    Ok(())
}

fn tag_tree_lines(summary: &TagSummary) -> Vec<String> {
    if summary.is_empty() {
        return vec!["no location tags found".to_string()];
    }
    summary
        .countries()
        .iter()
        .flat_map(|entry| {
            std::iter::once(format!("{} ({})", entry.country, entry.regions.len()))
                .chain(entry.regions.iter().map(|region| format!("  - {region}")))
        })
        .collect()
}
