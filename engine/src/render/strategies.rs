use itertools::Itertools;

use crate::render::{BlockSummary, RenderStrategy};
use crate::resolve::ResolvedValue;

const SNIPPET_LIMIT: usize = 120;

// structs

#[derive(Clone, Copy, Debug)]
pub struct HeroBanner;

#[derive(Clone, Copy, Debug)]
pub struct RichText;

#[derive(Clone, Copy, Debug)]
pub struct Gallery;

#[derive(Clone, Copy, Debug)]
pub struct CallToAction;

#[derive(Clone, Copy, Debug)]
pub struct Testimonials;

#[derive(Clone, Copy, Debug)]
pub struct FaqSection;

#[derive(Clone, Copy, Debug)]
pub struct VideoEmbed;

// implementations

impl RenderStrategy for HeroBanner {
    fn summarize(&self, tag: &str, values: &ResolvedValue) -> BlockSummary {
        BlockSummary {
            tag: tag.to_string(),
            title: text_of(values, &["heading", "title"]),
            subtitle: text_of(values, &["subheading", "subtitle"]),
            snippet: None,
        }
    }
}

impl RenderStrategy for RichText {
    fn summarize(&self, tag: &str, values: &ResolvedValue) -> BlockSummary {
        let snippet = text_of(values, &["content", "body"])
            .map(|html| truncate(&strip_html(&html), SNIPPET_LIMIT));
        BlockSummary {
            tag: tag.to_string(),
            title: text_of(values, &["title"]),
            subtitle: None,
            snippet,
        }
    }
}

impl RenderStrategy for Gallery {
    fn summarize(&self, tag: &str, values: &ResolvedValue) -> BlockSummary {
        let count = values
            .get("images")
            .and_then(ResolvedValue::as_list)
            .map_or(0, <[ResolvedValue]>::len);
        let snippet = match count {
            1 => "1 image".to_string(),
            n => format!("{n} images"),
        };
        BlockSummary {
            tag: tag.to_string(),
            title: text_of(values, &["title"]),
            subtitle: None,
            snippet: Some(snippet),
        }
    }
}

impl RenderStrategy for CallToAction {
    fn summarize(&self, tag: &str, values: &ResolvedValue) -> BlockSummary {
        let button_text = values
            .get("primaryButton")
            .and_then(|button| button.get("text"))
            .and_then(ResolvedValue::as_str)
            .map(str::to_string);
        BlockSummary {
            tag: tag.to_string(),
            title: text_of(values, &["heading", "title"]),
            subtitle: text_of(values, &["description"]),
            snippet: button_text,
        }
    }
}

impl RenderStrategy for Testimonials {
    fn summarize(&self, tag: &str, values: &ResolvedValue) -> BlockSummary {
        let snippet = joined_item_texts(values, "comment");
        BlockSummary {
            tag: tag.to_string(),
            title: text_of(values, &["title"]),
            subtitle: item_count_label(values, "testimonial", "testimonials"),
            snippet,
        }
    }
}

impl RenderStrategy for FaqSection {
    fn summarize(&self, tag: &str, values: &ResolvedValue) -> BlockSummary {
        let snippet = joined_item_texts(values, "question");
        BlockSummary {
            tag: tag.to_string(),
            title: text_of(values, &["title"]),
            subtitle: item_count_label(values, "question", "questions"),
            snippet,
        }
    }
}

impl RenderStrategy for VideoEmbed {
    fn summarize(&self, tag: &str, values: &ResolvedValue) -> BlockSummary {
        BlockSummary {
            tag: tag.to_string(),
            title: text_of(values, &["title"]),
            subtitle: text_of(values, &["videoUrl"]),
            snippet: None,
        }
    }
}

// helpers

fn text_of(values: &ResolvedValue, names: &[&str]) -> Option<String> {
    names
        .iter()
        .find_map(|name| values.get(name))
        .and_then(ResolvedValue::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn joined_item_texts(values: &ResolvedValue, field: &str) -> Option<String> {
    let items = values.get("items").and_then(ResolvedValue::as_list)?;
    let joined = items
        .iter()
        .filter_map(|item| item.get(field).and_then(ResolvedValue::as_str))
        .filter(|s| !s.is_empty())
        .join(" · ");
    if joined.is_empty() {
        None
    } else {
        Some(truncate(&joined, SNIPPET_LIMIT))
    }
}

fn item_count_label(values: &ResolvedValue, singular: &str, plural: &str) -> Option<String> {
    let count = values.get("items").and_then(ResolvedValue::as_list)?.len();
    match count {
        0 => None,
        1 => Some(format!("1 {singular}")),
        n => Some(format!("{n} {plural}")),
    }
}

/// Drops tags from stored rich-text markup, collapsing the runs of
/// whitespace that tag removal leaves behind.
fn strip_html(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => {
                in_tag = false;
                text.push(' ');
            }
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }
    text.split_whitespace().join(" ")
}

// char-aware, never splits a multi-byte character
fn truncate(s: &str, limit: usize) -> String {
    if s.chars().count() <= limit {
        return s.to_string();
    }
    let cut: String = s.chars().take(limit).collect();
    format!("{}…", cut.trim_end())
}
