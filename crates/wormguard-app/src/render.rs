//! Render use cases: Markdown, GitHub annotations and the console summary from a report.

use crate::to_renderable;
use wormguard_types::WormguardReportV1;

pub fn render_markdown(report: &WormguardReportV1) -> String {
    wormguard_render::render_markdown(&to_renderable(report))
}

pub fn render_annotations(report: &WormguardReportV1, max: usize) -> Vec<String> {
    wormguard_render::render_github_annotations(&to_renderable(report))
        .into_iter()
        .take(max)
        .collect()
}

pub fn render_summary(report: &WormguardReportV1) -> String {
    wormguard_render::render_summary(&to_renderable(report))
}
