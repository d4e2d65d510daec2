//! Hyperlinks between resources
//!
//! Every resource (and every page of a collection) carries an ordered list of
//! `(rel, uri)` pairs. Relation names are not unique; lookups return the first match.

use super::request::Request;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A typed hyperlink as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    #[serde(rename = "rel")]
    pub relation: String,
    pub uri: String,
}

impl Link {
    pub fn new(relation: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            relation: relation.into(),
            uri: uri.into(),
        }
    }

    /// Turn the link into a GET request relative to `base_url`.
    ///
    /// The link URI must start with `base_url`; the remainder (including any query
    /// string the server put there) becomes the request path.
    pub fn request(&self, base_url: &str) -> Result<Request> {
        let base = base_url.trim_end_matches('/');
        let path = self
            .uri
            .strip_prefix(base)
            .ok_or_else(|| Error::ForeignLink(self.uri.clone()))?;

        Ok(Request::get(path))
    }
}

/// Anything that exposes a set of hyperlinks
pub trait HasLinks {
    fn links(&self) -> &[Link];

    /// First link with the given relation, if any
    fn first_link(&self, relation: &str) -> Option<&Link> {
        first_link(self, relation)
    }
}

/// Scan `owner`'s links in order and return the first with the given relation.
///
/// Absence is a normal outcome (e.g. a category without a primary leaderboard).
pub fn first_link<'a, O: HasLinks + ?Sized>(owner: &'a O, relation: &str) -> Option<&'a Link> {
    owner.links().iter().find(|link| link.relation == relation)
}
