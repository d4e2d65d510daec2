//! Paged collections
//!
//! A [`Collection`] is one page of a listing plus the pagination snapshot the server
//! sent with it. Listing operations return a [`Listing`], which always carries a
//! usable collection (empty on failure) next to the optional error, so paging can be
//! chained without checking for a missing value first.

use super::fetcher::fetch_collection;
use crate::api::{Client, HasLinks, Link};
use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Pagination metadata of one page
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Pagination {
    pub offset: u32,
    pub max: u32,
    pub size: u32,
    pub links: Vec<Link>,
}

impl HasLinks for Pagination {
    fn links(&self) -> &[Link] {
        &self.links
    }
}

/// One page of resources of a single kind
#[derive(Debug, Clone, Deserialize)]
pub struct Collection<T> {
    pub data: Vec<T>,
    /// Embedded sub-collections carry no pagination
    #[serde(default)]
    pub pagination: Pagination,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            pagination: Pagination::default(),
        }
    }
}

impl<T> Collection<T> {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    pub fn has_next_page(&self) -> bool {
        self.pagination.first_link("next").is_some()
    }

    pub fn has_prev_page(&self) -> bool {
        self.pagination.first_link("prev").is_some()
    }
}

impl<T: DeserializeOwned> Collection<T> {
    /// Follow the `next` pagination link.
    ///
    /// Without such a link the result is an empty collection and
    /// [`Error::NoSuchLink`]. The link already encodes the full query, so no filter
    /// or sort is re-applied.
    pub async fn next_page(&self, client: &Client) -> Listing<T> {
        self.follow(client, "next").await
    }

    /// Follow the `prev` pagination link; see [`Collection::next_page`]
    pub async fn prev_page(&self, client: &Client) -> Listing<T> {
        self.follow(client, "prev").await
    }

    async fn follow(&self, client: &Client, relation: &str) -> Listing<T> {
        let Some(link) = self.pagination.first_link(relation) else {
            return Listing::failed(Error::NoSuchLink(relation.to_string()));
        };

        match client.link_request(link) {
            Ok(request) => fetch_collection(client, &request).await,
            Err(err) => Listing::failed(err),
        }
    }

    /// Collect this page and every following one.
    ///
    /// Stops at the first page without a `next` link; a failed page aborts with its
    /// error.
    pub async fn collect_all(self, client: &Client) -> Result<Vec<T>> {
        let mut all_items = Vec::new();
        let mut page = self;

        loop {
            let next = page.has_next_page();
            let current = std::mem::take(&mut page);
            if !next {
                all_items.extend(current.data);
                break;
            }

            let following = current.next_page(client).await.into_result()?;
            all_items.extend(current.data);
            page = following;
        }

        Ok(all_items)
    }
}

impl<T> IntoIterator for Collection<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

/// Result of a listing call: always a collection, sometimes an error.
#[derive(Debug)]
pub struct Listing<T> {
    pub collection: Collection<T>,
    pub error: Option<Error>,
}

impl<T> Listing<T> {
    pub fn ok(collection: Collection<T>) -> Self {
        Self {
            collection,
            error: None,
        }
    }

    /// Empty collection paired with `error`
    pub fn failed(error: Error) -> Self {
        Self {
            collection: Collection::default(),
            error: Some(error),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    pub fn into_parts(self) -> (Collection<T>, Option<Error>) {
        (self.collection, self.error)
    }

    pub fn into_result(self) -> Result<Collection<T>> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.collection),
        }
    }
}
