//! Minimal tree queries over a parsed document: find-first, find-all and text.

use std::fmt;

use regex::Regex;
use scraper::node::Element;
use scraper::{ElementRef, Html};
use url::Url;

use crate::ParseError;

#[derive(Debug, Clone)]
pub enum AttrPattern {
    /// Value equality. For `class` also matches a single class out of several.
    Exact(String),
    /// Regular expression searched anywhere in the value.
    Matches(Regex),
}

/// Attribute filter for [`find_tag`] and [`find_all`]. Every entry must match.
#[derive(Debug, Clone, Default)]
pub struct Attrs {
    filters: Vec<(String, AttrPattern)>,
}

impl Attrs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(value: &str) -> Self {
        Self::new().with("id", value)
    }

    pub fn class(value: &str) -> Self {
        Self::new().with("class", value)
    }

    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.filters
            .push((name.to_string(), AttrPattern::Exact(value.to_string())));
        self
    }

    pub fn matching(mut self, name: &str, pattern: Regex) -> Self {
        self.filters.push((name.to_string(), AttrPattern::Matches(pattern)));
        self
    }

    fn matches(&self, element: &Element) -> bool {
        self.filters.iter().all(|(name, pattern)| {
            let Some(value) = element.attr(name) else {
                return false;
            };
            match pattern {
                AttrPattern::Exact(expected) if name == "class" => {
                    value == expected || value.split_whitespace().any(|class| class == expected)
                }
                AttrPattern::Exact(expected) => value == expected,
                AttrPattern::Matches(re) => re.is_match(value),
            }
        })
    }
}

impl fmt::Display for Attrs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (name, pattern)) in self.filters.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match pattern {
                AttrPattern::Exact(value) => write!(f, "{name}={value:?}")?,
                AttrPattern::Matches(re) => write!(f, "{name}~/{}/", re.as_str())?,
            }
        }
        write!(f, "}}")
    }
}

/// Returns the first descendant of `scope` named `tag` that satisfies `attrs`.
pub fn find_tag<'a>(scope: ElementRef<'a>, tag: &str, attrs: &Attrs) -> Result<ElementRef<'a>, ParseError> {
    matching(scope, tag, attrs)
        .next()
        .ok_or_else(|| ParseError::TagNotFound {
            tag: tag.to_string(),
            attrs: attrs.to_string(),
        })
}

/// Every descendant of `scope` named `tag` that satisfies `attrs`, in document order.
pub fn find_all<'a>(scope: ElementRef<'a>, tag: &str, attrs: &Attrs) -> Vec<ElementRef<'a>> {
    matching(scope, tag, attrs).collect()
}

/// [`find_tag`] over a whole document.
pub fn find_in_document<'a>(doc: &'a Html, tag: &str, attrs: &Attrs) -> Result<ElementRef<'a>, ParseError> {
    find_tag(doc.root_element(), tag, attrs)
}

/// All text beneath `element`, concatenated without separators.
pub fn text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// The `href` of an anchor resolved against `base`.
pub fn resolve_href(anchor: ElementRef<'_>, base: &Url) -> Result<Url, ParseError> {
    let href = anchor
        .value()
        .attr("href")
        .ok_or_else(|| ParseError::MissingAttribute {
            tag: anchor.value().name().to_string(),
            attr: "href".to_string(),
        })?;
    base.join(href.trim()).map_err(|err| ParseError::InvalidLink {
        href: href.to_string(),
        message: err.to_string(),
    })
}

fn matching<'a, 'q>(
    scope: ElementRef<'a>,
    tag: &'q str,
    attrs: &'q Attrs,
) -> impl Iterator<Item = ElementRef<'a>> + 'q
where
    'a: 'q,
{
    scope
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .filter(move |el| el.value().name().eq_ignore_ascii_case(tag) && attrs.matches(el.value()))
}
