//! Categories, either full-game or per-level

use super::collection::Collection;
use super::embed::{RelatedItem, RelatedList};
use super::fetcher::{fetch_by_id, fetch_collection_link, fetch_resource_link, NO_FILTER};
use super::game::Game;
use super::leaderboard::{Leaderboard, LeaderboardFilter, LeaderboardOptions};
use super::run::{Run, RunFilter};
use super::variable::Variable;
use super::Resource;
use crate::api::request::QueryParams;
use crate::api::{ApplyToUrl, Client, HasLinks, Link, Sorting};
use crate::error::Result;
use serde::Deserialize;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CategoryType {
    PerGame,
    PerLevel,
}

/// Player count rule, e.g. `exactly 1` or `up-to 4`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Players {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub weblink: String,
    #[serde(rename = "type")]
    pub category_type: Option<CategoryType>,
    #[serde(default)]
    pub rules: Option<String>,
    #[serde(default)]
    pub players: Option<Players>,
    #[serde(default)]
    pub miscellaneous: bool,
    #[serde(default)]
    pub links: Vec<Link>,

    #[serde(default)]
    game: RelatedItem<Game>,
    #[serde(default)]
    variables: RelatedList<Variable>,
}

impl HasLinks for Category {
    fn links(&self) -> &[Link] {
        &self.links
    }
}

impl Resource for Category {
    const ENDPOINT: &'static str = "/categories";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Category {
    /// Fetch a single category. On error no category is returned.
    pub async fn by_id(client: &Client, id: &str) -> Result<Category> {
        fetch_by_id(client, id).await
    }

    /// The embedded game, otherwise one request through the `game` link
    pub async fn game(&self, client: &Client) -> Option<Game> {
        self.game.resolve_or_follow(client, self, "game").await
    }

    /// Embedded variables, otherwise one request through the `variables` link.
    /// `sort` only applies when the variables were not embedded.
    pub async fn variables(&self, client: &Client, sort: Option<&Sorting>) -> Vec<Variable> {
        self.variables
            .resolve_or_follow(client, self, "variables", NO_FILTER, sort)
            .await
    }

    /// The primary leaderboard, if the category has one
    pub async fn primary_leaderboard(
        &self,
        client: &Client,
        options: Option<&LeaderboardOptions>,
    ) -> Option<Leaderboard> {
        fetch_resource_link(client, self.first_link("leaderboard"), options).await
    }

    /// One leaderboard for full-game categories, one per level otherwise.
    /// Always returns a collection.
    pub async fn records(
        &self,
        client: &Client,
        filter: Option<&LeaderboardFilter>,
    ) -> Collection<Leaderboard> {
        fetch_collection_link(client, self.first_link("records"), filter, None).await
    }

    /// Runs done in this category. Always returns a collection.
    pub async fn runs(
        &self,
        client: &Client,
        filter: Option<&RunFilter>,
        sort: Option<&Sorting>,
    ) -> Collection<Run> {
        fetch_collection_link(client, self.first_link("runs"), filter, sort).await
    }
}

/// Filtering options for category listings
#[derive(Debug, Clone, Default)]
pub struct CategoryFilter {
    pub miscellaneous: Option<bool>,
}

impl ApplyToUrl for CategoryFilter {
    fn apply_to_url(&self, url: &mut Url) {
        QueryParams::new()
            .flag("miscellaneous", self.miscellaneous)
            .apply(url);
    }
}
