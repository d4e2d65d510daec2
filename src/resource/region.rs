//! Regions (game release regions such as USA / NTSC)

use super::collection::{Collection, Listing};
use super::fetcher::{fetch_by_id, fetch_collection, fetch_collection_link};
use super::game::{Game, GameFilter};
use super::run::{Run, RunFilter};
use super::Resource;
use crate::api::{Client, Cursor, HasLinks, Link, Request, Sorting};
use crate::error::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Region {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub links: Vec<Link>,
}

impl HasLinks for Region {
    fn links(&self) -> &[Link] {
        &self.links
    }
}

impl Resource for Region {
    const ENDPOINT: &'static str = "/regions";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Region {
    pub async fn by_id(client: &Client, id: &str) -> Result<Region> {
        fetch_by_id(client, id).await
    }

    pub async fn list(
        client: &Client,
        sort: Option<&Sorting>,
        cursor: Option<&Cursor>,
    ) -> Listing<Region> {
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
