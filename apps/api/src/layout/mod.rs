// Layout/annotation engine.
// Pure, deterministic, no I/O: every stage is a function of its inputs.
// CPU-bound — handlers run the pipeline inside tokio::task::spawn_blocking.

pub mod annotate;
pub mod compose;
pub mod engine;
pub mod flow;
pub mod font_metrics;
pub mod grid;
pub mod highlight;
pub mod locate;

// Re-export the public API consumed by other modules (routes, render).
pub use compose::{DocumentArtifact, GridArtifact};
pub use engine::{run_pipeline, EngineWarning, PipelineOutput};
pub use font_metrics::{default_layout_config, FontFamily, LayoutConfig};
pub use locate::SourceText;
