pub mod headings;
pub mod heuristics;
pub mod normalize;
pub mod render;
pub mod sections;
pub mod segmenter;

// Re-export key extraction types for convenience
#[allow(unused_imports)]
pub use {
    headings::{HeadingSet, SectionLabel},
    render::RenderOptions,
    sections::{Section, SectionFallback},
    segmenter::{BioSegmenter, DocumentEntry, EntryMode, MatchKind, Segmentation, SegmenterConfig},
};
