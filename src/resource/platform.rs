//! Platforms (hardware and systems games are played on)

use super::collection::{Collection, Listing};
use super::fetcher::{fetch_by_id, fetch_collection, fetch_collection_link};
use super::game::{Game, GameFilter};
use super::run::{Run, RunFilter};
use super::Resource;
use crate::api::{Client, Cursor, HasLinks, Link, Request, Sorting};
use crate::error::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Platform {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub released: u32,
    #[serde(default)]
    pub links: Vec<Link>,
}

impl HasLinks for Platform {
    fn links(&self) -> &[Link] {
        &self.links
    }
}

impl Resource for Platform {
    const ENDPOINT: &'static str = "/platforms";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Platform {
    pub async fn by_id(client: &Client, id: &str) -> Result<Platform> {
        fetch_by_id(client, id).await
    }

    /// List platforms; there is nothing to filter on
    pub async fn list(
        client: &Client,
        sort: Option<&Sorting>,
        cursor: Option<&Cursor>,
    ) -> Listing<Platform> {
        let request = Request::get(Self::ENDPOINT)
            .with_sort(sort)
            .with_cursor(cursor);

        fetch_collection(client, &request).await
    }

    pub async fn games(
        &self,
        client: &Client,
        filter: Option<&GameFilter>,
        sort: Option<&Sorting>,
    ) -> Collection<Game> {
        fetch_collection_link(client, self.first_link("games"), filter, sort).await
    }

    pub async fn runs(
        &self,
        client: &Client,
        filter: Option<&RunFilter>,
        sort: Option<&Sorting>,
    ) -> Collection<Run> {
        fetch_collection_link(client, self.first_link("runs"), filter, sort).await
    }
}
