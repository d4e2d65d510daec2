//! Resource Fetcher
//!
//! Generic fetch operations shared by every resource kind. Singular fetches decode
//! `{"data": <resource>}`, listings decode `{"data": [...], "pagination": {...}}`.

use super::collection::{Collection, Listing};
use super::Resource;
use crate::api::{ApplyToUrl, Client, Link, Request, Sorting};
use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

#[derive(Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: T,
}

/// Stand-in filter type for calls that take no filter
#[derive(Debug, Clone, Copy)]
pub(crate) struct NoFilter;

impl ApplyToUrl for NoFilter {
    fn apply_to_url(&self, _url: &mut Url) {}
}

pub(crate) const NO_FILTER: Option<&NoFilter> = None;

/// Fetch a single resource. On error no resource is returned.
pub async fn fetch_resource<T: DeserializeOwned>(client: &Client, request: &Request) -> Result<T> {
    let body = client.execute(request).await?;
    let envelope: Envelope<T> = serde_json::from_value(body)?;
    Ok(envelope.data)
}

/// Fetch a page of resources. Always yields a collection, empty on error.
pub async fn fetch_collection<T: DeserializeOwned>(client: &Client, request: &Request) -> Listing<T> {
    let body = match client.execute(request).await {
        Ok(body) => body,
        Err(err) => return Listing::failed(err),
    };

    match serde_json::from_value::<Collection<T>>(body) {
        Ok(collection) => Listing::ok(collection),
        Err(err) => Listing::failed(Error::Decode(err)),
    }
}

/// Fetch a resource by its identifier
pub async fn fetch_by_id<T: Resource>(client: &Client, id: &str) -> Result<T> {
    let request = Request::get(format!("{}/{}", T::ENDPOINT, urlencoding::encode(id)));
    fetch_resource(client, &request).await
}

/// Follow a link to a single resource.
///
/// A missing link means "no data". A failed follow-up fetch is logged and also
/// reported as "no data".
pub async fn fetch_resource_link<T, F>(
    client: &Client,
    link: Option<&Link>,
    filter: Option<&F>,
) -> Option<T>
where
    T: DeserializeOwned,
    F: ApplyToUrl + Clone + 'static,
{
    let link = link?;

    let result = match client.link_request(link) {
        Ok(request) => fetch_resource(client, &request.with_filter(filter)).await,
        Err(err) => Err(err),
    };

    match result {
        Ok(resource) => Some(resource),
        Err(err) => {
            tracing::warn!("Following '{}' link failed: {}", link.relation, err);
            None
        }
    }
}

/// Follow a link to a listing, applying an optional filter and sort.
///
/// A missing link or a failed fetch both yield an empty collection.
pub async fn fetch_collection_link<T, F>(
    client: &Client,
    link: Option<&Link>,
    filter: Option<&F>,
    sort: Option<&Sorting>,
) -> Collection<T>
where
    T: DeserializeOwned,
    F: ApplyToUrl + Clone + 'static,
{
    let Some(link) = link else {
        return Collection::default();
    };

    let listing = match client.link_request(link) {
        Ok(request) => {
            let request = request.with_filter(filter).with_sort(sort);
            fetch_collection(client, &request).await
        }
        Err(err) => Listing::failed(err),
    };

    if let Some(err) = &listing.error {
        tracing::warn!("Following '{}' link failed: {}", link.relation, err);
    }

    listing.collection
}
