//! Merging style fragments into the project's `@theme inline` block

use crate::paths::exists;
use crate::templates::StyleFragment;
use anyhow::{Context, Result};
use colored::Colorize;
use regex::Regex;
use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;
use tokio::fs;

/// Header of the block variables are merged into
const BLOCK_HEADER: &str = "@theme inline";

/// Non-greedy: the block ends at the first closing brace after its header
static THEME_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)@theme\s+inline\s*\{(.*?)\}").expect("valid regex"));

/// The last declaration in a block may omit its `;`
static DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(--[^\s:;{}]+)\s*:\s*([^;]*?)\s*(?:;|$)").expect("valid regex")
});

/// What a merge changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleMergeReport {
    /// Variables written into the block
    pub added: Vec<String>,
    /// Variables already declared in the block, left untouched
    pub skipped: Vec<String>,
}

/// Merge `fragment` into the `@theme inline` block of `stylesheet`
///
/// Creates the stylesheet when missing. Variables already declared in the block
/// keep their existing value.
pub async fn merge_styles(stylesheet: &Path, fragment: &StyleFragment) -> Result<StyleMergeReport> {
    if !exists(stylesheet) {
        if let Some(parent) = stylesheet.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        fs::write(stylesheet, "")
            .await
            .with_context(|| format!("Failed to create {}", stylesheet.display()))?;
    }

    let content = fs::read_to_string(stylesheet)
        .await
        .with_context(|| format!("Failed to read {}", stylesheet.display()))?;

    let (merged, report) = merge_into(&content, fragment);

    for name in &report.skipped {
        eprintln!(
            "{} {} is already declared in {}, keeping the existing value",
            "Warning:".yellow(),
            name,
            BLOCK_HEADER
        );
    }

    if merged != content {
        fs::write(stylesheet, &merged)
            .await
            .with_context(|| format!("Failed to write {}", stylesheet.display()))?;
    }

    Ok(report)
}

/// Pure merge of a fragment into stylesheet text
pub fn merge_into(content: &str, fragment: &StyleFragment) -> (String, StyleMergeReport) {
    let mut report = StyleMergeReport::default();

    let Some(block) = THEME_BLOCK.captures(content) else {
        let mut seen = HashSet::new();
        let lines: Vec<String> = fragment
            .declarations()
            .filter(|(name, _)| seen.insert(*name))
            .map(|(name, value)| {
                report.added.push(name.to_string());
                declaration_line(name, value)
            })
            .collect();

        if lines.is_empty() {
            return (content.to_string(), report);
        }

        let mut merged = content.to_string();
        if !merged.is_empty() {
            if !merged.ends_with('\n') {
                merged.push('\n');
            }
            merged.push('\n');
        }
        merged.push_str(BLOCK_HEADER);
        merged.push_str(" {\n");
        merged.extend(lines);
        merged.push_str("}\n");
        return (merged, report);
    };

    let body = block.get(1).map_or("", |m| m.as_str());
    let mut declared: HashSet<&str> = DECLARATION
        .captures_iter(body)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .collect();

    let mut lines = Vec::new();
    for (name, value) in fragment.declarations() {
        if declared.contains(name) {
            if !report.added.iter().any(|a| a == name) && !report.skipped.iter().any(|s| s == name) {
                report.skipped.push(name.to_string());
            }
            continue;
        }
        declared.insert(name);
        report.added.push(name.to_string());
        lines.push(declaration_line(name, value));
    }

    if lines.is_empty() {
        return (content.to_string(), report);
    }

    // Insert on fresh lines just before the closing brace, keeping its indentation
    let close = block.get(0).map_or(content.len(), |m| m.end()) - 1;
    let head = content[..close].trim_end();
    let trailing = &content[head.len()..close];
    let brace_indent = trailing.rsplit('\n').next().unwrap_or("");

    let mut merged = String::with_capacity(content.len() + lines.iter().map(String::len).sum::<usize>());
    merged.push_str(head);
    if !(head.ends_with(';') || head.ends_with('{') || head.ends_with("*/")) {
        merged.push(';');
    }
    merged.push('\n');
    merged.extend(lines);
    merged.push_str(brace_indent);
    merged.push_str(&content[close..]);

    (merged, report)
}

fn declaration_line(name: &str, value: &str) -> String {
    format!("  {}: {};\n", name, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fragment(vars: &[(&str, &str)]) -> StyleFragment {
        StyleFragment::from_groups([("theme", vars.iter().copied())])
    }

    const EXISTING: &str = "@import \"tailwindcss\";\n\n@theme inline {\n  --radius: 4px;\n  --color-primary: #000;\n}\n\nbody {\n  margin: 0;\n}\n";

    #[test]
    fn test_existing_value_wins() {
        let (merged, report) = merge_into(EXISTING, &fragment(&[("--radius", "8px")]));

        assert_eq!(merged, EXISTING);
        assert_eq!(report.skipped, vec!["--radius"]);
        assert!(report.added.is_empty());
        assert_eq!(merged.matches("--radius").count(), 1);
    }

    #[test]
    fn test_new_variable_inserted_before_closing_brace() {
        let (merged, report) = merge_into(EXISTING, &fragment(&[("--spacing", "0.25rem")]));

        assert_eq!(report.added, vec!["--spacing"]);
        assert_eq!(merged.matches("--spacing").count(), 1);
        assert!(merged.contains("  --color-primary: #000;\n  --spacing: 0.25rem;\n}\n\nbody {"));
        assert_eq!(merged.lines().count(), EXISTING.lines().count() + 1);
    }

    #[test]
    fn test_missing_block_is_appended() {
        let content = "body {\n  margin: 0;\n}";
        let styles = StyleFragment::from_groups([
            ("theme", vec![("--radius", "8px")]),
            ("animations", vec![("--animate-spin", "spin 1s linear infinite")]),
        ]);

        let (merged, report) = merge_into(content, &styles);

        assert_eq!(
            merged,
            "body {\n  margin: 0;\n}\n\n@theme inline {\n  --radius: 8px;\n  --animate-spin: spin 1s linear infinite;\n}\n"
        );
        assert_eq!(report.added.len(), 2);
    }

    #[test]
    fn test_empty_block_receives_variables() {
        let (merged, _) = merge_into("@theme inline {}\n", &fragment(&[("--radius", "8px")]));
        assert_eq!(merged, "@theme inline {\n  --radius: 8px;\n}\n");
    }

    #[test]
    fn test_duplicates_within_fragment_collapse() {
        let styles = StyleFragment::from_groups([
            ("theme", vec![("--radius", "8px")]),
            ("animations", vec![("--radius", "2px")]),
        ]);
        let (merged, report) = merge_into("", &styles);

        assert_eq!(merged, "@theme inline {\n  --radius: 8px;\n}\n");
        assert_eq!(report.added, vec!["--radius"]);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let styles = fragment(&[("--radius", "8px"), ("--spacing", "0.25rem")]);
        let (once, _) = merge_into("", &styles);
        let (twice, report) = merge_into(&once, &styles);

        assert_eq!(once, twice);
        assert_eq!(report.skipped, vec!["--radius", "--spacing"]);
    }

    #[test]
    fn test_non_ascii_and_escaped_names_are_recognized() {
        let styles = fragment(&[("--couleur-élevée", "#fff"), (r"--size-1\.5", "0.375rem")]);
        let (once, _) = merge_into("", &styles);
        let (twice, report) = merge_into(&once, &styles);

        assert_eq!(once, twice);
        assert!(report.added.is_empty());
        assert_eq!(report.skipped, vec!["--couleur-élevée", r"--size-1\.5"]);
    }

    #[test]
    fn test_unterminated_last_declaration() {
        let content = "@theme inline {\n  --radius: 4px\n}\n";
        let (merged, report) = merge_into(
            content,
            &fragment(&[("--radius", "8px"), ("--spacing", "1rem")]),
        );

        assert_eq!(merged, "@theme inline {\n  --radius: 4px;\n  --spacing: 1rem;\n}\n");
        assert_eq!(report.skipped, vec!["--radius"]);
        assert_eq!(report.added, vec!["--spacing"]);
    }

    #[tokio::test]
    async fn test_creates_missing_stylesheet() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("src/app/globals.css");

        merge_styles(&path, &fragment(&[("--radius", "8px")]))
            .await
            .unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "@theme inline {\n  --radius: 8px;\n}\n"
        );
    }
}
