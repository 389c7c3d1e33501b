use std::collections::HashMap;

use serde::Serialize;

use crate::resolve::ResolvedValue;

mod strategies;

pub use strategies::{
    CallToAction, FaqSection, Gallery, HeroBanner, RichText, Testimonials, VideoEmbed,
};

// structs

/// The preview-oriented projection of one content block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockSummary {
    /// the type tag the block was stored with, echoed verbatim
    pub tag: String,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub snippet: Option<String>,
}

/// Maps block type tags to summarization strategies. Dispatch is total:
/// tags nobody registered fall through to a placeholder strategy, so a
/// page that mixes known and unknown blocks still previews end to end.
pub struct RenderRegistry {
    strategies: HashMap<String, Box<dyn RenderStrategy>>,
    unknown: Box<dyn RenderStrategy>,
}

struct UnknownBlock;

// traits

pub trait RenderStrategy: Send + Sync + 'static {
    fn summarize(&self, tag: &str, values: &ResolvedValue) -> BlockSummary;
}

// implementations

impl RenderRegistry {
    /// An empty registry: every tag hits the placeholder.
    pub fn new() -> Self {
        Self {
            strategies: HashMap::new(),
            unknown: Box::new(UnknownBlock),
        }
    }

    /// The built-in strategies, registered under the tags the stored
    /// content uses, including historical aliases.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(&["hero", "hero_banner"], HeroBanner);
        registry.register(&["text", "content", "rich_text"], RichText);
        registry.register(&["image", "gallery"], Gallery);
        registry.register(&["cta", "call_to_action"], CallToAction);
        registry.register(&["testimonial", "testimonials"], Testimonials);
        registry.register(&["faq", "faq_section"], FaqSection);
        registry.register(&["video", "video_embed"], VideoEmbed);
        registry
    }

    /// Registers one strategy under every given tag. A later
    /// registration for a tag replaces the earlier one.
    pub fn register<S>(&mut self, tags: &[&str], strategy: S)
    where
        S: RenderStrategy + Clone,
    {
        for tag in tags {
            self.strategies
                .insert((*tag).to_string(), Box::new(strategy.clone()));
        }
    }

    pub fn dispatch(&self, tag: &str) -> &dyn RenderStrategy {
        self.strategies
            .get(tag)
            .map(Box::as_ref)
            .unwrap_or(self.unknown.as_ref())
    }

    pub fn summarize(&self, tag: &str, values: &ResolvedValue) -> BlockSummary {
        self.dispatch(tag).summarize(tag, values)
    }
}

impl Default for RenderRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl RenderStrategy for UnknownBlock {
    fn summarize(&self, tag: &str, _values: &ResolvedValue) -> BlockSummary {
        BlockSummary {
            tag: tag.to_string(),
            title: None,
            subtitle: None,
            snippet: Some(format!("unknown block type \"{tag}\"")),
        }
    }
}
