//! Reading game ids out of a publisher's storefront page.
//!
//! Every game on the page is linked through an anchor carrying the
//! `game_link` class and a `data-label` of the form `game:<id>:<kind>`.
//! A game usually has several such anchors (thumbnail and title), and each
//! one is reported.

use crate::error::{Error, Result};

use regex::Regex;
use std::sync::LazyLock;

static ANCHOR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<a\s(?:[^>"']|"[^"]*"|'[^']*')*>"#).expect("anchor regex is valid")
});

static CLASS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\sclass\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("class regex is valid")
});

static LABEL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\sdata-label\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
        .expect("data-label regex is valid")
});

/// Catalog ids of every game link on the page, in document order.
pub fn game_ids(html: &str) -> Result<Vec<u64>> {
    ANCHOR_PATTERN
        .find_iter(html)
        .map(|anchor| anchor.as_str())
        .filter(|anchor| is_game_link(anchor))
        .map(|anchor| {
            let label = attribute(&LABEL_PATTERN, anchor).ok_or_else(|| {
                Error::InvalidPage(format!("game link without data-label: {anchor}"))
            })?;
            label_id(label)
        })
        .collect()
}

fn is_game_link(anchor: &str) -> bool {
    attribute(&CLASS_PATTERN, anchor)
        .is_some_and(|classes| classes.split_whitespace().any(|class| class == "game_link"))
}

fn attribute<'a>(pattern: &Regex, tag: &'a str) -> Option<&'a str> {
    pattern
        .captures(tag)
        .and_then(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| m.as_str())
}

/// `"game:<id>:..."` to `<id>`.
fn label_id(label: &str) -> Result<u64> {
    label
        .split(':')
        .nth(1)
        .and_then(|id| id.trim().parse().ok())
        .ok_or_else(|| Error::InvalidPage(format!("unexpected data-label \"{label}\"")))
}
