//! RFC 5988 `Link` header parsing.
//!
//! Servers.com list endpoints advertise neighbouring pages through the
//! `Link` response header:
//!
//! ```text
//! Link: <https://api.servers.com/v1/ssh_keys?page=2&per_page=20>; rel="next",
//!       <https://api.servers.com/v1/ssh_keys?page=5&per_page=20>; rel="last"
//! ```
//!
//! Only the four pagination relations are kept; everything else is ignored.

use std::collections::BTreeMap;
use std::fmt;

use url::Url;

/// A pagination link relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Relation {
    Next,
    Prev,
    First,
    Last,
}

impl Relation {
    /// All recognized relations.
    pub const ALL: [Relation; 4] = [Self::Next, Self::Prev, Self::First, Self::Last];

    /// The `rel` value used on the wire.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Next => "next",
            Self::Prev => "prev",
            Self::First => "first",
            Self::Last => "last",
        }
    }

    /// Parse a `rel` value. Unknown relations yield `None`.
    #[must_use]
    pub fn from_rel(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|rel| rel.as_str().eq_ignore_ascii_case(value))
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Relation map extracted from one response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Relations(BTreeMap<Relation, Url>);

impl Relations {
    /// Create an empty relation map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Target URL of a relation.
    #[must_use]
    pub fn get(&self, rel: Relation) -> Option<&Url> {
        self.0.get(&rel)
    }

    /// Whether the relation is present.
    #[must_use]
    pub fn contains(&self, rel: Relation) -> bool {
        self.0.contains_key(&rel)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over present relations in `next`, `prev`, `first`, `last` order.
    pub fn iter(&self) -> impl Iterator<Item = (Relation, &Url)> {
        self.0.iter().map(|(rel, url)| (*rel, url))
    }

    fn insert(&mut self, rel: Relation, url: Url) {
        self.0.insert(rel, url);
    }
}

/// Parse a `Link` header value into a [`Relations`] map.
///
/// Relative targets such as `</v1/ssh_keys?page=2>` are resolved against
/// `base`, normally the URL of the request that produced the header.
/// Malformed entries are skipped one by one; an empty header gives an empty
/// map.
#[must_use]
pub fn parse_link_header(header: &str, base: &Url) -> Relations {
    let mut relations = Relations::new();

    for entry in split_entries(header) {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }

        // The target may itself contain ';', so close it before splitting.
        let Some((raw_url, attributes)) = entry
            .strip_prefix('<')
            .and_then(|rest| rest.split_once('>'))
        else {
            tracing::debug!(entry, "skipping link entry without <url>");
            continue;
        };

        let url = match base.join(raw_url.trim()) {
            Ok(url) => url,
            Err(err) => {
                tracing::debug!(entry, %err, "skipping link entry with invalid url");
                continue;
            }
        };

        for attribute in attributes.split(';') {
            let Some((name, value)) = attribute.split_once('=') else {
                continue;
            };
            if !name.trim().eq_ignore_ascii_case("rel") {
                continue;
            }
            let value = value.trim().trim_matches('"');
            if let Some(rel) = Relation::from_rel(value) {
                relations.insert(rel, url.clone());
            }
        }
    }

    relations
}

/// Split on commas that sit outside `<...>`.
fn split_entries(header: &str) -> Vec<&str> {
    let mut entries = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (idx, ch) in header.char_indices() {
        match ch {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                entries.push(&header[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    entries.push(&header[start..]);

    entries
}
