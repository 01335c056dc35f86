//! HTML renderer collaborator: embeds the dataset JSON into a static page.
//!
//! The host document carries a well-known placeholder token; rendering
//! replaces it exactly once with the serialized record array. The template
//! is rewritten in place, matching the daily-regeneration workflow.

use anyhow::{bail, Context, Result};
use basketline_core::OutputRecord;
use std::fs;
use std::path::Path;

/// Token the host document must contain.
pub const PLACEHOLDER: &str = "/* CHART_DATA_PLACEHOLDER */";

/// Serialize `records` and inject them into the template file in place.
pub fn inject_dataset(template_path: &Path, records: &[OutputRecord]) -> Result<()> {
    let template = fs::read_to_string(template_path)
        .with_context(|| format!("failed to read template {}", template_path.display()))?;
    let payload = serde_json::to_string(records).context("failed to serialize dataset")?;
    let updated = replace_placeholder(&template, &payload)?;
    fs::write(template_path, updated)
        .with_context(|| format!("failed to write {}", template_path.display()))?;
    Ok(())
}

fn replace_placeholder(template: &str, payload: &str) -> Result<String> {
    if !template.contains(PLACEHOLDER) {
        bail!("template does not contain the placeholder token '{PLACEHOLDER}'");
    }
    Ok(template.replacen(PLACEHOLDER, payload, 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_placeholder_with_payload() {
        let out = replace_placeholder("var data = /* CHART_DATA_PLACEHOLDER */;", "[1,2]").unwrap();
        assert_eq!(out, "var data = [1,2];");
    }

    #[test]
    fn missing_placeholder_is_an_error() {
        assert!(replace_placeholder("<html></html>", "[]").is_err());
    }

    #[test]
    fn replaces_only_the_first_occurrence() {
        let template = "/* CHART_DATA_PLACEHOLDER */ and /* CHART_DATA_PLACEHOLDER */";
        let out = replace_placeholder(template, "X").unwrap();
        assert_eq!(out, "X and /* CHART_DATA_PLACEHOLDER */");
    }

    #[test]
    fn inject_rewrites_file_in_place() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("index.html");
        fs::write(&path, "const DATA = /* CHART_DATA_PLACEHOLDER */;").unwrap();

        inject_dataset(&path, &[]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "const DATA = [];");
    }
}
