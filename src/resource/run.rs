//! Runs (single speedrun submissions)

use super::category::Category;
use super::collection::Listing;
use super::embed::{resolve_ids, RelatedItem};
use super::fetcher::{fetch_by_id, fetch_collection, fetch_resource_link, NO_FILTER};
use super::game::Game;
use super::level::Level;
use super::platform::Platform;
use super::region::Region;
use super::user::User;
use super::Resource;
use crate::api::request::QueryParams;
use crate::api::{ApplyToUrl, Client, Cursor, HasLinks, Link, Request, Sorting};
use crate::error::Result;
use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::HashMap;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    New,
    Verified,
    Rejected,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::New => "new",
            VerificationStatus::Verified => "verified",
            VerificationStatus::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RunStatus {
    pub status: VerificationStatus,
    #[serde(default)]
    pub examiner: Option<String>,
    #[serde(default)]
    pub verify_date: Option<DateTime<Utc>>,
    /// Only set for rejected runs
    #[serde(default)]
    pub reason: Option<String>,
}

/// Player reference as sent without `embed=players`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "rel", rename_all = "lowercase")]
pub enum PlayerRef {
    User { id: String, uri: String },
    Guest { name: String, uri: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Guest {
    pub name: String,
    #[serde(default)]
    pub links: Vec<Link>,
}

impl HasLinks for Guest {
    fn links(&self) -> &[Link] {
        &self.links
    }
}

/// Player as sent with `embed=players`
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "rel", rename_all = "lowercase")]
pub enum EmbeddedPlayer {
    User(Box<User>),
    Guest(Guest),
}

/// Players of a run. Entries that do not decode are dropped, so one bad player
/// never fails the whole run.
#[derive(Debug, Clone)]
pub enum RunPlayers {
    Embedded { data: Vec<EmbeddedPlayer> },
    References(Vec<PlayerRef>),
}

impl Default for RunPlayers {
    fn default() -> Self {
        RunPlayers::References(Vec::new())
    }
}

impl RunPlayers {
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Null => RunPlayers::default(),
            Value::Array(items) => RunPlayers::References(decode_players(items)),
            Value::Object(mut map) => match map.remove("data") {
                Some(Value::Array(items)) => RunPlayers::Embedded {
                    data: decode_players(items),
                },
                _ => {
                    tracing::warn!("Embedded players without a data list");
                    RunPlayers::default()
                }
            },
            other => {
                tracing::warn!("Unexpected players shape: {}", other);
                RunPlayers::default()
            }
        }
    }
}

impl<'de> Deserialize<'de> for RunPlayers {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from_value)
    }
}

fn decode_players<T: DeserializeOwned>(items: Vec<Value>) -> Vec<T> {
    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(player) => Some(player),
            Err(err) => {
                tracing::warn!("Dropping player that did not decode: {}", err);
                None
            }
        })
        .collect()
}

/// Times in seconds; zero when a timing method does not apply
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RunTimes {
    pub primary_t: f64,
    pub realtime_t: f64,
    pub realtime_noloads_t: f64,
    pub ingame_t: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RunSystem {
    pub platform: Option<String>,
    pub emulated: bool,
    pub region: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Video {
    pub uri: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Videos {
    pub text: Option<String>,
    pub links: Vec<Video>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Run {
    pub id: String,
    #[serde(default)]
    pub weblink: String,
    #[serde(default)]
    pub videos: Option<Videos>,
    #[serde(default)]
    pub comment: Option<String>,
    pub status: RunStatus,
    #[serde(default)]
    pub players: RunPlayers,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub submitted: Option<DateTime<Utc>>,
    #[serde(default)]
    pub times: RunTimes,
    #[serde(default)]
    pub system: RunSystem,
    #[serde(default)]
    pub splits: Option<Link>,
    /// Variable id to value id
    #[serde(default)]
    pub values: HashMap<String, String>,
    #[serde(default)]
    pub links: Vec<Link>,

    #[serde(default)]
    game: RelatedItem<Game>,
    #[serde(default)]
    category: RelatedItem<Category>,
    #[serde(default)]
    level: RelatedItem<Level>,
    #[serde(default)]
    platform: RelatedItem<Platform>,
    #[serde(default)]
    region: RelatedItem<Region>,
}

impl HasLinks for Run {
    fn links(&self) -> &[Link] {
        &self.links
    }
}

impl Resource for Run {
    const ENDPOINT: &'static str = "/runs";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Run {
    pub async fn by_id(client: &Client, id: &str) -> Result<Run> {
        fetch_by_id(client, id).await
    }

    pub async fn list(
        client: &Client,
        filter: Option<&RunFilter>,
        sort: Option<&Sorting>,
        cursor: Option<&Cursor>,
    ) -> Listing<Run> {
        let request = Request::get(Self::ENDPOINT)
            .with_filter(filter)
            .with_sort(sort)
            .with_cursor(cursor);

        fetch_collection(client, &request).await
    }

    pub fn game_id(&self) -> Option<&str> {
        self.game.id()
    }

    pub fn category_id(&self) -> Option<&str> {
        self.category.id()
    }

    /// `None` for full-game runs
    pub fn level_id(&self) -> Option<&str> {
        self.level.id()
    }

    pub async fn game(&self, client: &Client) -> Option<Game> {
        self.game.resolve_or_follow(client, self, "game").await
    }

    pub async fn category(&self, client: &Client) -> Option<Category> {
        self.category.resolve_or_follow(client, self, "category").await
    }

    pub async fn level(&self, client: &Client) -> Option<Level> {
        self.level.resolve_or_follow(client, self, "level").await
    }

    pub async fn platform(&self, client: &Client) -> Option<Platform> {
        self.platform.resolve_or_follow(client, self, "platform").await
    }

    pub async fn region(&self, client: &Client) -> Option<Region> {
        self.region.resolve_or_follow(client, self, "region").await
    }

    /// The moderator who verified or rejected the run
    pub async fn examiner(&self, client: &Client) -> Option<User> {
        fetch_resource_link(client, self.first_link("examiner"), NO_FILTER).await
    }

    /// Ids of registered players; guests are skipped
    pub fn player_ids(&self) -> Vec<String> {
        match &self.players {
            RunPlayers::References(players) => players
                .iter()
                .filter_map(|p| match p {
                    PlayerRef::User { id, .. } => Some(id.clone()),
                    PlayerRef::Guest { .. } => None,
                })
                .collect(),
            RunPlayers::Embedded { data } => data
                .iter()
                .filter_map(|p| match p {
                    EmbeddedPlayer::User(user) => Some(user.id.clone()),
                    EmbeddedPlayer::Guest(_) => None,
                })
                .collect(),
        }
    }

    /// Registered players as full users, fetched when not embedded
    pub async fn player_users(&self, client: &Client) -> Vec<User> {
        match &self.players {
            RunPlayers::References(_) => resolve_ids(client, &self.player_ids()).await,
            RunPlayers::Embedded { data } => data
                .iter()
                .filter_map(|p| match p {
                    EmbeddedPlayer::User(user) => Some(user.as_ref().clone()),
                    EmbeddedPlayer::Guest(_) => None,
                })
                .collect(),
        }
    }
}

/// Filtering options for run listings
#[derive(Debug, Clone, Default)]
pub struct RunFilter {
    pub user: Option<String>,
    pub guest: Option<String>,
    pub examiner: Option<String>,
    pub game: Option<String>,
    pub level: Option<String>,
    pub category: Option<String>,
    pub platform: Option<String>,
    pub region: Option<String>,
    pub emulated: Option<bool>,
    pub status: Option<VerificationStatus>,
}

impl ApplyToUrl for RunFilter {
    fn apply_to_url(&self, url: &mut Url) {
        QueryParams::new()
            .text("user", self.user.as_deref())
            .text("guest", self.guest.as_deref())
            .text("examiner", self.examiner.as_deref())
            .text("game", self.game.as_deref())
            .text("level", self.level.as_deref())
            .text("category", self.category.as_deref())
            .text("platform", self.platform.as_deref())
            .text("region", self.region.as_deref())
            .flag("emulated", self.emulated)
            .text("status", self.status.as_ref().map(VerificationStatus::as_str))
            .apply(url);
    }
}
