//! Users are the individuals who have registered an account on speedrun.com

use super::collection::{Collection, Listing};
use super::fetcher::{fetch_by_id, fetch_collection, fetch_collection_link};
use super::game::{Game, GameFilter, Names};
use super::run::{Run, RunFilter};
use super::Resource;
use crate::api::request::QueryParams;
use crate::api::{ApplyToUrl, Client, Cursor, HasLinks, Link, Request, Sorting};
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use url::Url;

/// Colors for light and dark page themes
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NameColor {
    pub light: String,
    pub dark: String,
}

/// How the user's name is rendered: `solid` uses `color`, `gradient` the from/to pair
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct NameStyle {
    #[serde(default)]
    pub style: String,
    #[serde(default)]
    pub color: Option<NameColor>,
    #[serde(default)]
    pub color_from: Option<NameColor>,
    #[serde(default)]
    pub color_to: Option<NameColor>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Location {
    pub code: String,
    pub names: Names,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserLocation {
    pub country: Location,
    #[serde(default)]
    pub region: Option<Location>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SocialLink {
    pub uri: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct User {
    pub id: String,
    pub names: Names,
    #[serde(default)]
    pub weblink: String,
    #[serde(default)]
    pub name_style: NameStyle,
    #[serde(default)]
    pub role: String,
    /// Missing for very old accounts
    #[serde(default)]
    pub signup: Option<DateTime<Utc>>,
    #[serde(default)]
    pub location: Option<UserLocation>,
    #[serde(default)]
    pub twitch: Option<SocialLink>,
    #[serde(default)]
    pub hitbox: Option<SocialLink>,
    #[serde(default)]
    pub youtube: Option<SocialLink>,
    #[serde(default)]
    pub twitter: Option<SocialLink>,
    #[serde(default)]
    pub speedrunslive: Option<SocialLink>,
    #[serde(default)]
    pub links: Vec<Link>,
}

impl HasLinks for User {
    fn links(&self) -> &[Link] {
        &self.links
    }
}

impl Resource for User {
    const ENDPOINT: &'static str = "/users";

    fn id(&self) -> &str {
        &self.id
    }
}

impl User {
    /// Fetch a user by id or username
    pub async fn by_id(client: &Client, id: &str) -> Result<User> {
        fetch_by_id(client, id).await
    }

    pub async fn list(
        client: &Client,
        filter: Option<&UserFilter>,
        sort: Option<&Sorting>,
        cursor: Option<&Cursor>,
    ) -> Listing<User> {
        let request = Request::get(Self::ENDPOINT)
            .with_filter(filter)
            .with_sort(sort)
            .with_cursor(cursor);

        fetch_collection(client, &request).await
    }

    /// Runs the user took part in. Always returns a collection.
    pub async fn runs(
        &self,
        client: &Client,
        filter: Option<&RunFilter>,
        sort: Option<&Sorting>,
    ) -> Collection<Run> {
        fetch_collection_link(client, self.first_link("runs"), filter, sort).await
    }

    /// Games the user moderates. Always returns a collection.
    pub async fn moderated_games(
        &self,
        client: &Client,
        filter: Option<&GameFilter>,
        sort: Option<&Sorting>,
    ) -> Collection<Game> {
        fetch_collection_link(client, self.first_link("games"), filter, sort).await
    }
}

/// Filtering options for user listings
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    /// Case-insensitive exact match against name and social handles
    pub lookup: Option<String>,
    pub name: Option<String>,
    pub twitch: Option<String>,
    pub hitbox: Option<String>,
    pub twitter: Option<String>,
    pub speedrunslive: Option<String>,
}

impl ApplyToUrl for UserFilter {
    fn apply_to_url(&self, url: &mut Url) {
        QueryParams::new()
            .text("lookup", self.lookup.as_deref())
            .text("name", self.name.as_deref())
            .text("twitch", self.twitch.as_deref())
            .text("hitbox", self.hitbox.as_deref())
            .text("twitter", self.twitter.as_deref())
            .text("speedrunslive", self.speedrunslive.as_deref())
            .apply(url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_decodes() {
        let user: User = serde_json::from_value(json!({
            "id": "kj92rqjz",
            "names": {"international": "Runner", "japanese": null},
            "weblink": "https://www.speedrun.com/user/Runner",
            "name-style": {
                "style": "gradient",
                "color-from": {"light": "#000000", "dark": "#FFFFFF"},
                "color-to": {"light": "#111111", "dark": "#EEEEEE"}
            },
            "role": "user",
            "signup": "2015-03-01T12:00:00Z",
            "location": {"country": {"code": "de", "names": {"international": "Germany"}}},
            "twitch": {"uri": "https://www.twitch.tv/runner"},
            "hitbox": null,
            "links": []
        }))
        .unwrap();

        assert_eq!(user.name_style.style, "gradient");
        assert!(user.name_style.color.is_none());
        assert_eq!(user.name_style.color_to.unwrap().dark, "#EEEEEE");
        assert_eq!(user.signup.unwrap().to_rfc3339(), "2015-03-01T12:00:00+00:00");
        assert_eq!(user.location.unwrap().country.code, "de");
        assert!(user.twitch.is_some());
        assert!(user.hitbox.is_none());
    }

    #[test]
    fn test_user_without_signup() {
        let user: User = serde_json::from_value(json!({
            "id": "old",
            "names": {"international": "Old"},
            "signup": null
        }))
        .unwrap();
        assert!(user.signup.is_none());
    }

    #[test]
    fn test_user_filter_query() {
        let filter = UserFilter {
            lookup: Some("runner".to_string()),
            twitch: Some(String::new()),
            ..Default::default()
        };
        let url = Request::get("/users")
            .with_filter(Some(&filter))
            .url("https://x/api/v1")
            .unwrap();
        assert_eq!(url.query(), Some("lookup=runner"));
    }
}
