//! Rendering utilities for CI surfaces (Markdown, GitHub annotations, console summary).
//!
//! Renderers take a [`RenderableReport`] and never touch the report DTOs directly, so the
//! wire format can change without rewriting presentation.

#![forbid(unsafe_code)]

mod gha;
mod markdown;
mod model;
mod summary;

pub use gha::render_github_annotations;
pub use markdown::render_markdown;
pub use model::{
    RenderableCounts, RenderableData, RenderableFinding, RenderableFindingKind, RenderableReport,
    RenderableTier, RenderableVerdictStatus,
};
pub use summary::render_summary;
