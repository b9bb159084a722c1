//! Writing finished content and run records to disk

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::crew::types::{ContentRequest, CrewOutput};

/// Characters shown by [`preview`]
pub const PREVIEW_CHARS: usize = 500;

/// `{content_type}_{topic}_{YYYYmmdd_HHMMSS}.md`, topic lowercased with spaces as `_`
pub fn output_filename(request: &ContentRequest, now: DateTime<Local>) -> String {
    format!(
        "{}_{}_{}.md",
        request.content_type,
        file_stem(&request.topic.replace(' ', "_").to_lowercase()),
        now.format("%Y%m%d_%H%M%S")
    )
}

/// `scraped_content_{query}.txt`, spaces as `_`
pub fn scraped_filename(query: &str) -> String {
    format!("scraped_content_{}.txt", file_stem(&query.replace(' ', "_")))
}

// Path separators would point the file somewhere else.
fn file_stem(value: &str) -> String {
    value.replace(['/', '\\'], "_")
}

/// Uppercase the first character and lowercase the rest.
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

pub fn render_markdown(request: &ContentRequest, content: &str, now: DateTime<Local>) -> String {
    format!(
        "# {} Content: {}\n\nTarget Audience: {}\nTone: {}\nCreated: {}\n\n---\n\n{}",
        capitalize(&request.content_type),
        request.topic,
        request.target_audience,
        request.tone,
        now.format("%Y-%m-%d %H:%M:%S"),
        content
    )
}

/// Write the Markdown file into `dir` and return its path.
pub async fn save_content(
    dir: &Path,
    request: &ContentRequest,
    content: &str,
    now: DateTime<Local>,
) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .await
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;

    let path = dir.join(output_filename(request, now));
    fs::write(&path, render_markdown(request, content, now))
        .await
        .with_context(|| format!("Failed to write content file: {}", path.display()))?;
    Ok(path)
}

/// Save every stage's output as `content_run_{timestamp}.yaml`.
pub async fn save_run_record(
    dir: &Path,
    output: &CrewOutput,
    now: DateTime<Local>,
) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .await
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;

    let path = dir.join(format!("content_run_{}.yaml", now.format("%Y%m%d_%H%M%S")));
    let yaml = serde_yaml::to_string(output).context("Failed to serialize run record")?;
    fs::write(&path, yaml)
        .await
        .with_context(|| format!("Failed to write run record: {}", path.display()))?;
    Ok(path)
}

/// First [`PREVIEW_CHARS`] characters, with `...` when cut.
pub fn preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 3, 7, 9, 5, 2).unwrap()
    }

    #[test]
    fn test_output_filename_is_deterministic() {
        let request = ContentRequest::new("blog", "Rust Async Runtime", "devs", "casual");
        assert_eq!(
            output_filename(&request, fixed_now()),
            "blog_rust_async_runtime_20250307_090502.md"
        );
    }

    #[test]
    fn test_output_filename_replaces_separators() {
        let request = ContentRequest::new("email", "CI/CD tips", "devs", "casual");
        assert_eq!(
            output_filename(&request, fixed_now()),
            "email_ci_cd_tips_20250307_090502.md"
        );
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("blog"), "Blog");
        assert_eq!(capitalize("SOCIAL"), "Social");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_render_markdown_header() {
        let request = ContentRequest::new("social", "Solar", "homeowners", "humorous");
        let markdown = render_markdown(&request, "Body text", fixed_now());

        assert_eq!(
            markdown,
            "# Social Content: Solar\n\nTarget Audience: homeowners\nTone: humorous\n\
Created: 2025-03-07 09:05:02\n\n---\n\nBody text"
        );
    }

    #[test]
    fn test_scraped_filename() {
        assert_eq!(
            scraped_filename("rust web frameworks"),
            "scraped_content_rust_web_frameworks.txt"
        );
    }

    #[test]
    fn test_preview_cuts_long_text() {
        let long = "é".repeat(PREVIEW_CHARS + 5);
        let short = preview(&long);
        assert!(short.ends_with("..."));
        assert_eq!(short.chars().count(), PREVIEW_CHARS + 3);
        assert_eq!(preview("short"), "short");
    }
}
