use crate::output::print_json;
use byline_core::onboarding::{is_writer_publish_enabled, resolve_writer_onboarding_state};
use byline_core::writer::onboarding_facts;
use std::path::Path;

pub fn run(root: &Path, slug: &str, json: bool) -> anyhow::Result<()> {
    byline_core::paths::validate_slug(slug)?;

    let facts = onboarding_facts(root, slug);
    let state = resolve_writer_onboarding_state(facts);
    let publish_enabled = is_writer_publish_enabled(state);

    if json {
        print_json(&serde_json::json!({
            "slug": slug,
            "has_profile": facts.has_profile,
            "has_agreement": facts.has_agreement,
            "state": state,
            "publish_enabled": publish_enabled,
        }))?;
    } else {
        println!("Writer:    {slug}");
        println!("State:     {state}");
        println!("Publish:   {}", if publish_enabled { "enabled" } else { "disabled" });
        if let Some(next) = state.next() {
            println!("Next step: {next}");
        }
    }
    Ok(())
}
