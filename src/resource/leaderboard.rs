//! Leaderboards
//!
//! A leaderboard is the ranked list of runs for one game/category(/level)
//! combination. It has no identifier of its own; it is addressed by the ids of what
//! it ranks.

use super::category::Category;
use super::embed::RelatedItem;
use super::fetcher::fetch_resource;
use super::game::{Game, TimingMethod};
use super::level::Level;
use super::run::Run;
use crate::api::request::QueryParams;
use crate::api::{ApplyToUrl, Client, HasLinks, Link, Request};
use crate::error::Result;
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use url::Url;

#[derive(Debug, Clone, Deserialize)]
pub struct RankedRun {
    /// Zero for obsolete or unranked runs
    pub place: u32,
    pub run: Run,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Leaderboard {
    #[serde(default)]
    pub weblink: String,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub emulators: Option<bool>,
    #[serde(default)]
    pub video_only: bool,
    #[serde(default)]
    pub timing: Option<TimingMethod>,
    #[serde(default)]
    pub values: HashMap<String, String>,
    #[serde(default)]
    pub runs: Vec<RankedRun>,
    #[serde(default)]
    pub links: Vec<Link>,

    #[serde(default)]
    game: RelatedItem<Game>,
    #[serde(default)]
    category: RelatedItem<Category>,
    #[serde(default)]
    level: RelatedItem<Level>,
}

impl HasLinks for Leaderboard {
    fn links(&self) -> &[Link] {
        &self.links
    }
}

impl Leaderboard {
    /// Full-game leaderboard of a category
    pub async fn for_category(
        client: &Client,
        game: &str,
        category: &str,
        options: Option<&LeaderboardOptions>,
    ) -> Result<Leaderboard> {
        let path = format!(
            "/leaderboards/{}/category/{}",
            urlencoding::encode(game),
            urlencoding::encode(category)
        );
        fetch_resource(client, &Request::get(path).with_filter(options)).await
    }

    /// Leaderboard of a per-level category on one level
    pub async fn for_level(
        client: &Client,
        game: &str,
        level: &str,
        category: &str,
        options: Option<&LeaderboardOptions>,
    ) -> Result<Leaderboard> {
        let path = format!(
            "/leaderboards/{}/level/{}/{}",
            urlencoding::encode(game),
            urlencoding::encode(level),
            urlencoding::encode(category)
        );
        fetch_resource(client, &Request::get(path).with_filter(options)).await
    }

    pub fn game_id(&self) -> Option<&str> {
        self.game.id()
    }

    pub fn category_id(&self) -> Option<&str> {
        self.category.id()
    }

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
}

/// Options narrowing down a single leaderboard
#[derive(Debug, Clone, Default)]
pub struct LeaderboardOptions {
    /// Only the top N places (more runs on ties)
    pub top: Option<u32>,
    pub platform: Option<String>,
    pub region: Option<String>,
    pub emulators: Option<bool>,
    pub video_only: Option<bool>,
    pub timing: Option<TimingMethod>,
    /// Leaderboard as it was on this date
    pub date: Option<NaiveDate>,
    /// Variable id to value id, sent as `var-<id>=<value>`
    pub values: BTreeMap<String, String>,
}

impl ApplyToUrl for LeaderboardOptions {
    fn apply_to_url(&self, url: &mut Url) {
        let date = self.date.map(|d| d.format("%Y-%m-%d").to_string());

        let mut params = QueryParams::new()
            .number("top", self.top)
            .text("platform", self.platform.as_deref())
            .text("region", self.region.as_deref())
            .flag("emulators", self.emulators)
            .flag("video-only", self.video_only)
            .text("timing", self.timing.as_ref().map(TimingMethod::as_str))
            .text("date", date.as_deref());

        for (variable, value) in &self.values {
            params = params.text(&format!("var-{}", variable), Some(value.as_str()));
        }

        params.apply(url);
    }
}

/// Which leaderboards a records listing includes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaderboardScope {
    FullGame,
    Levels,
    All,
}

impl LeaderboardScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaderboardScope::FullGame => "full-game",
            LeaderboardScope::Levels => "levels",
            LeaderboardScope::All => "all",
        }
    }
}

/// Filtering options for record listings
#[derive(Debug, Clone, Default)]
pub struct LeaderboardFilter {
    pub top: Option<u32>,
    pub scope: Option<LeaderboardScope>,
    pub miscellaneous: Option<bool>,
    pub skip_empty: Option<bool>,
}

impl ApplyToUrl for LeaderboardFilter {
    fn apply_to_url(&self, url: &mut Url) {
        QueryParams::new()
            .number("top", self.top)
            .text("scope", self.scope.as_ref().map(LeaderboardScope::as_str))
            .flag("miscellaneous", self.miscellaneous)
            .flag("skip-empty", self.skip_empty)
            .apply(url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_leaderboard_decodes() {
        let board: Leaderboard = serde_json::from_value(json!({
            "weblink": "https://www.speedrun.com/sms#Any",
            "game": "om1m3625",
            "category": "n2y3r8do",
            "level": null,
            "platform": null,
            "region": null,
            "emulators": null,
            "video-only": false,
            "timing": "realtime",
            "values": {},
            "runs": [
                {"place": 1, "run": {"id": "r1", "status": {"status": "verified"}, "players": []}},
                {"place": 2, "run": {"id": "r2", "status": {"status": "verified"}, "players": []}}
            ],
            "links": [{"rel": "game", "uri": "https://x/api/v1/games/om1m3625"}]
        }))
        .unwrap();

        assert_eq!(board.game_id(), Some("om1m3625"));
        assert_eq!(board.category_id(), Some("n2y3r8do"));
        assert_eq!(board.level_id(), None);
        assert_eq!(board.timing, Some(TimingMethod::Realtime));
        assert_eq!(board.runs.len(), 2);
        assert_eq!(board.runs[1].place, 2);
        assert_eq!(board.runs[1].run.id, "r2");
    }

    #[test]
    fn test_options_query() {
        let mut values = BTreeMap::new();
        values.insert("onv6p08m".to_string(), "21g5r3gq".to_string());

        let options = LeaderboardOptions {
            top: Some(3),
            video_only: Some(false),
            timing: Some(TimingMethod::Ingame),
            date: NaiveDate::from_ymd_opt(2016, 2, 1),
            values,
            ..Default::default()
        };
        let url = Request::get("/leaderboards/sms/category/any")
            .with_filter(Some(&options))
            .url("https://x/api/v1")
            .unwrap();

        assert_eq!(
            url.query(),
            Some("top=3&video-only=no&timing=ingame&date=2016-02-01&var-onv6p08m=21g5r3gq")
        );
    }

    #[test]
    fn test_records_filter_query() {
        let filter = LeaderboardFilter {
            scope: Some(LeaderboardScope::FullGame),
            skip_empty: Some(true),
            ..Default::default()
        };
        let url = Request::get("/games/sms/records")
            .with_filter(Some(&filter))
            .url("https://x/api/v1")
            .unwrap();
        assert_eq!(url.query(), Some("scope=full-game&skip-empty=yes"));
    }
}
