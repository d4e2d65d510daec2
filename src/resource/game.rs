//! Games

use super::category::{Category, CategoryFilter};
use super::collection::{Collection, Listing};
use super::embed::RelatedList;
use super::fetcher::{fetch_by_id, fetch_collection, fetch_collection_link, NO_FILTER};
use super::leaderboard::{Leaderboard, LeaderboardFilter};
use super::level::Level;
use super::platform::Platform;
use super::region::Region;
use super::run::{Run, RunFilter};
use super::user::User;
use super::variable::Variable;
use super::Resource;
use crate::api::request::QueryParams;
use crate::api::{ApplyToUrl, Client, Cursor, HasLinks, Link, Request, Sorting};
use crate::error::Result;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use url::Url;

/// International and Japanese names
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Names {
    pub international: String,
    #[serde(default)]
    pub japanese: Option<String>,
}

/// How run times are measured
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimingMethod {
    #[default]
    Realtime,
    RealtimeNoloads,
    Ingame,
}

impl TimingMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimingMethod::Realtime => "realtime",
            TimingMethod::RealtimeNoloads => "realtime_noloads",
            TimingMethod::Ingame => "ingame",
        }
    }
}

/// Submission rules of a game
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Ruleset {
    pub show_milliseconds: bool,
    pub require_verification: bool,
    pub require_video: bool,
    pub run_times: Vec<TimingMethod>,
    pub default_time: TimingMethod,
    pub emulators_allowed: bool,
}

/// Image asset (logo, cover, trophy...)
#[derive(Debug, Clone, Deserialize)]
pub struct AssetLink {
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Game {
    pub id: String,
    pub names: Names,
    #[serde(default)]
    pub abbreviation: String,
    #[serde(default)]
    pub weblink: String,
    #[serde(default)]
    pub released: u32,
    #[serde(default)]
    pub release_date: Option<NaiveDate>,
    #[serde(default)]
    pub ruleset: Ruleset,
    #[serde(default)]
    pub romhack: bool,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub assets: HashMap<String, Option<AssetLink>>,
    #[serde(default)]
    pub links: Vec<Link>,

    #[serde(default)]
    platforms: RelatedList<Platform>,
    #[serde(default)]
    regions: RelatedList<Region>,
    #[serde(default)]
    moderators: RelatedList<User>,
    #[serde(default)]
    categories: RelatedList<Category>,
    #[serde(default)]
    levels: RelatedList<Level>,
    #[serde(default)]
    variables: RelatedList<Variable>,
}

impl HasLinks for Game {
    fn links(&self) -> &[Link] {
        &self.links
    }
}

impl Resource for Game {
    const ENDPOINT: &'static str = "/games";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Game {
    /// Fetch a single game by id
    pub async fn by_id(client: &Client, id: &str) -> Result<Game> {
        fetch_by_id(client, id).await
    }

    /// The API resolves abbreviations on the same endpoint as ids
    pub async fn by_abbreviation(client: &Client, abbreviation: &str) -> Result<Game> {
        fetch_by_id(client, abbreviation).await
    }

    /// List games
    pub async fn list(
        client: &Client,
        filter: Option<&GameFilter>,
        sort: Option<&Sorting>,
        cursor: Option<&Cursor>,
    ) -> Listing<Game> {
        let request = Request::get(Self::ENDPOINT)
            .with_filter(filter)
            .with_sort(sort)
            .with_cursor(cursor);

        fetch_collection(client, &request).await
    }

    pub fn platform_ids(&self) -> Vec<String> {
        self.platforms.ids()
    }

    pub async fn platforms(&self, client: &Client) -> Vec<Platform> {
        self.platforms.resolve(client).await
    }

    pub fn region_ids(&self) -> Vec<String> {
        self.regions.ids()
    }

    pub async fn regions(&self, client: &Client) -> Vec<Region> {
        self.regions.resolve(client).await
    }

    pub fn moderator_ids(&self) -> Vec<String> {
        self.moderators.ids()
    }

    pub async fn moderators(&self, client: &Client) -> Vec<User> {
        self.moderators.resolve(client).await
    }

    /// Ids of the embedded categories; empty unless fetched with `embed=categories`
    pub fn category_ids(&self) -> Vec<String> {
        self.categories.ids()
    }

    /// Embedded categories, or the `categories` link when they were not embedded.
    /// Filter and sort only apply in the latter case.
    pub async fn categories(
        &self,
        client: &Client,
        filter: Option<&CategoryFilter>,
        sort: Option<&Sorting>,
    ) -> Vec<Category> {
        self.categories
            .resolve_or_follow(client, self, "categories", filter, sort)
            .await
    }

    pub fn level_ids(&self) -> Vec<String> {
        self.levels.ids()
    }

    pub async fn levels(&self, client: &Client, sort: Option<&Sorting>) -> Vec<Level> {
        self.levels
            .resolve_or_follow(client, self, "levels", NO_FILTER, sort)
            .await
    }

    pub fn variable_ids(&self) -> Vec<String> {
        self.variables.ids()
    }

    pub async fn variables(&self, client: &Client, sort: Option<&Sorting>) -> Vec<Variable> {
        self.variables
            .resolve_or_follow(client, self, "variables", NO_FILTER, sort)
            .await
    }

    /// Runs of this game. Always returns a collection.
    pub async fn runs(
        &self,
        client: &Client,
        filter: Option<&RunFilter>,
        sort: Option<&Sorting>,
    ) -> Collection<Run> {
        fetch_collection_link(client, self.first_link("runs"), filter, sort).await
    }

    /// Top of every leaderboard of this game. Always returns a collection.
    pub async fn records(
        &self,
        client: &Client,
        filter: Option<&LeaderboardFilter>,
    ) -> Collection<Leaderboard> {
        fetch_collection_link(client, self.first_link("records"), filter, None).await
    }

    /// Romhacks and other games derived from this one. Always returns a collection.
    pub async fn derived_games(
        &self,
        client: &Client,
        filter: Option<&GameFilter>,
        sort: Option<&Sorting>,
    ) -> Collection<Game> {
        fetch_collection_link(client, self.first_link("derived-games"), filter, sort).await
    }
}

/// Filtering options for game listings
#[derive(Debug, Clone, Default)]
pub struct GameFilter {
    pub name: Option<String>,
    pub abbreviation: Option<String>,
    pub released: Option<u32>,
    pub platform: Option<String>,
    pub region: Option<String>,
    pub moderator: Option<String>,
    pub romhack: Option<bool>,
}

impl ApplyToUrl for GameFilter {
    fn apply_to_url(&self, url: &mut Url) {
        QueryParams::new()
            .text("name", self.name.as_deref())
            .text("abbreviation", self.abbreviation.as_deref())
            .number("released", self.released)
            .text("platform", self.platform.as_deref())
            .text("region", self.region.as_deref())
            .text("moderator", self.moderator.as_deref())
            .flag("romhack", self.romhack)
            .apply(url);
    }
}
