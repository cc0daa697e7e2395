//! Client-side search overlay
//!
//! Filters a feed's items by case-insensitive substring match on the title
//! without touching the canonical list.

use std::borrow::Cow;

use crate::catalog::feed::FeedItem;

/// Filter `items` by `query`.
///
/// A blank (or whitespace-only) query borrows `items` unchanged. Otherwise the
/// matching items are cloned in their original order.
pub fn apply<'a, T: FeedItem>(items: &'a [T], query: &str) -> Cow<'a, [T]> {
    let needle = query.trim();
    if needle.is_empty() {
        return Cow::Borrowed(items);
    }

    let needle = needle.to_lowercase();
    Cow::Owned(
        items
            .iter()
            .filter(|item| item.title().to_lowercase().contains(&needle))
            .cloned()
            .collect(),
    )
}

/// Search query attached to one list screen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOverlay {
    query: String,
}

impl SearchOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Append a typed character
    pub fn push(&mut self, c: char) {
        self.query.push(c);
    }

    /// Delete the last character
    pub fn pop(&mut self) {
        self.query.pop();
    }

    pub fn clear(&mut self) {
        self.query.clear();
    }

    /// True when the query would filter anything
    pub fn is_active(&self) -> bool {
        !self.query.trim().is_empty()
    }

    /// Display sequence for `items` under the current query
    pub fn apply<'a, T: FeedItem>(&self, items: &'a [T]) -> Cow<'a, [T]> {
        apply(items, &self.query)
    }
}
