//! Variables (custom per-game fields such as "difficulty", possibly subcategories)

use super::category::Category;
use super::fetcher::{fetch_by_id, fetch_resource_link, NO_FILTER};
use super::game::Game;
use super::Resource;
use crate::api::{Client, HasLinks, Link};
use crate::error::Result;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Where a variable applies: `global`, `full-game`, `all-levels` or `single-level`
#[derive(Debug, Clone, Deserialize)]
pub struct VariableScope {
    #[serde(rename = "type")]
    pub kind: String,
    /// Set for `single-level` scope
    #[serde(default)]
    pub level: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VariableValue {
    pub label: String,
    #[serde(default)]
    pub rules: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VariableValues {
    pub values: BTreeMap<String, VariableValue>,
    pub default: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Variable {
    pub id: String,
    pub name: String,
    /// Category this variable is limited to, if any
    #[serde(default)]
    pub category: Option<String>,
    pub scope: VariableScope,
    #[serde(default)]
    pub mandatory: bool,
    #[serde(default)]
    pub user_defined: bool,
    #[serde(default)]
    pub obsoletes: bool,
    #[serde(default)]
    pub values: VariableValues,
    #[serde(default)]
    pub is_subcategory: bool,
    #[serde(default)]
    pub links: Vec<Link>,
}

impl HasLinks for Variable {
    fn links(&self) -> &[Link] {
        &self.links
    }
}

impl Resource for Variable {
    const ENDPOINT: &'static str = "/variables";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Variable {
    pub async fn by_id(client: &Client, id: &str) -> Result<Variable> {
        fetch_by_id(client, id).await
    }

    /// Label of a value id
    pub fn label(&self, value_id: &str) -> Option<&str> {
        self.values.values.get(value_id).map(|v| v.label.as_str())
    }

    pub async fn game(&self, client: &Client) -> Option<Game> {
        fetch_resource_link(client, self.first_link("game"), NO_FILTER).await
    }

    /// `None` for variables that apply to every category
    pub async fn category(&self, client: &Client) -> Option<Category> {
        fetch_resource_link(client, self.first_link("category"), NO_FILTER).await
    }
}
