//! Levels (individual stages of a game with their own leaderboards)

use super::category::{Category, CategoryFilter};
use super::collection::Collection;
use super::embed::RelatedList;
use super::fetcher::{fetch_by_id, fetch_collection_link, fetch_resource_link, NO_FILTER};
use super::leaderboard::{Leaderboard, LeaderboardFilter, LeaderboardOptions};
use super::run::{Run, RunFilter};
use super::variable::Variable;
use super::Resource;
use crate::api::{Client, HasLinks, Link, Sorting};
use crate::error::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Level {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub weblink: String,
    #[serde(default)]
    pub rules: Option<String>,
    #[serde(default)]
    pub links: Vec<Link>,

    #[serde(default)]
    categories: RelatedList<Category>,
    #[serde(default)]
    variables: RelatedList<Variable>,
}

impl HasLinks for Level {
    fn links(&self) -> &[Link] {
        &self.links
    }
}

impl Resource for Level {
    const ENDPOINT: &'static str = "/levels";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Level {
    pub async fn by_id(client: &Client, id: &str) -> Result<Level> {
        fetch_by_id(client, id).await
    }

    pub fn category_ids(&self) -> Vec<String> {
        self.categories.ids()
    }

    /// Per-level categories applicable to this level. Filter and sort only apply
    /// when the categories were not embedded.
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

    pub fn variable_ids(&self) -> Vec<String> {
        self.variables.ids()
    }

    pub async fn variables(&self, client: &Client, sort: Option<&Sorting>) -> Vec<Variable> {
        self.variables
            .resolve_or_follow(client, self, "variables", NO_FILTER, sort)
            .await
    }

    pub async fn primary_leaderboard(
        &self,
        client: &Client,
        options: Option<&LeaderboardOptions>,
    ) -> Option<Leaderboard> {
        fetch_resource_link(client, self.first_link("leaderboard"), options).await
    }

    pub async fn records(
        &self,
        client: &Client,
        filter: Option<&LeaderboardFilter>,
    ) -> Collection<Leaderboard> {
        fetch_collection_link(client, self.first_link("records"), filter, None).await
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

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_level_with_embedded_categories() {
        let level: Level = serde_json::from_value(json!({
            "id": "l1",
            "name": "Bianco Hills",
            "rules": null,
            "categories": {"data": [
                {"id": "c1", "name": "Any%", "type": "per-level"},
                {"id": "c2", "name": "All Shines", "type": "per-level"}
            ]},
            "links": []
        }))
        .unwrap();

        assert_eq!(level.category_ids(), vec!["c1", "c2"]);
        assert!(level.variable_ids().is_empty());
        assert!(level.variables.is_absent());
    }
}
