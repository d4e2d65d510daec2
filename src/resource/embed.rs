//! Embedded-or-reference relation fields
//!
//! Depending on the `embed` query a resource was fetched with, a relation field holds
//! either bare identifiers or the fully embedded related data. The shape is decided
//! once, while decoding, into [`RelatedList`] or [`RelatedItem`].

use super::collection::Collection;
use super::fetcher::{fetch_by_id, fetch_collection_link, fetch_resource_link, Envelope, NO_FILTER};
use super::Resource;
use crate::api::{ApplyToUrl, Client, HasLinks, Sorting};
use futures::future::join_all;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Relation to many resources
#[derive(Debug, Clone)]
pub enum RelatedList<T> {
    /// Identifiers only; each has to be fetched separately
    Unresolved(Vec<String>),
    /// Related resources were embedded in the response
    Embedded(Collection<T>),
    /// Field missing or null; the owner's link may still lead to the data
    Absent,
    /// Field present but unusable (unknown shape, or an embed that did not decode).
    /// Yields nothing and is never followed.
    Invalid,
}

impl<T> Default for RelatedList<T> {
    fn default() -> Self {
        RelatedList::Absent
    }
}

impl<T: DeserializeOwned> RelatedList<T> {
    /// Classify a raw field value.
    ///
    /// Arrays keep their string entries as identifiers. Objects with a `data` key are
    /// embedded collections; other objects are identifier-keyed maps (moderators),
    /// whose keys are the identifiers. Null is absent, anything else is invalid.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Null => RelatedList::Absent,
            Value::Array(items) => RelatedList::Unresolved(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::String(id) => Some(id),
                        _ => None,
                    })
                    .collect(),
            ),
            Value::Object(map) if map.contains_key("data") => {
                match serde_json::from_value(Value::Object(map)) {
                    Ok(collection) => RelatedList::Embedded(collection),
                    Err(err) => {
                        tracing::warn!("Embedded collection did not decode: {}", err);
                        RelatedList::Invalid
                    }
                }
            }
            Value::Object(map) => RelatedList::Unresolved(map.into_iter().map(|(id, _)| id).collect()),
            other => {
                tracing::warn!("Unexpected relation shape: {}", other);
                RelatedList::Invalid
            }
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for RelatedList<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from_value)
    }
}

impl<T> RelatedList<T> {
    pub fn is_embedded(&self) -> bool {
        matches!(self, RelatedList::Embedded(_))
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, RelatedList::Absent)
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, RelatedList::Invalid)
    }
}

impl<T: Resource> RelatedList<T> {
    /// Identifiers of the related resources, in response order
    pub fn ids(&self) -> Vec<String> {
        match self {
            RelatedList::Unresolved(ids) => ids.clone(),
            RelatedList::Embedded(collection) => {
                collection.iter().map(|item| item.id().to_string()).collect()
            }
            RelatedList::Absent | RelatedList::Invalid => Vec::new(),
        }
    }

    /// Full related resources.
    ///
    /// Embedded data is returned as is. Identifiers are fetched one request each;
    /// identifiers that fail to resolve are dropped.
    pub async fn resolve(&self, client: &Client) -> Vec<T> {
        match self {
            RelatedList::Unresolved(ids) => resolve_ids(client, ids).await,
            RelatedList::Embedded(collection) => collection.data.clone(),
            RelatedList::Absent | RelatedList::Invalid => Vec::new(),
        }
    }

    /// Like [`RelatedList::resolve`], but an absent field is fetched through the
    /// owner's `relation` link with the given filter and sort. An invalid field is
    /// not followed.
    pub async fn resolve_or_follow<O, F>(
        &self,
        client: &Client,
        owner: &O,
        relation: &str,
        filter: Option<&F>,
        sort: Option<&Sorting>,
    ) -> Vec<T>
    where
        O: HasLinks + ?Sized,
        F: ApplyToUrl + Clone + 'static,
    {
        match self {
            RelatedList::Absent => {
                fetch_collection_link(client, owner.first_link(relation), filter, sort)
                    .await
                    .into_vec()
            }
            _ => self.resolve(client).await,
        }
    }
}

/// Fetch every identifier concurrently, keeping input order and dropping failures
pub async fn resolve_ids<T: Resource>(client: &Client, ids: &[String]) -> Vec<T> {
    let results = join_all(ids.iter().map(|id| fetch_by_id::<T>(client, id))).await;

    results
        .into_iter()
        .zip(ids)
        .filter_map(|(result, id)| match result {
            Ok(resource) => Some(resource),
            Err(err) => {
                tracing::debug!("Dropping unresolvable id {}: {}", id, err);
                None
            }
        })
        .collect()
}

/// Relation to a single resource
#[derive(Debug, Clone)]
pub enum RelatedItem<T> {
    /// Identifier only
    Unresolved(String),
    /// Related resource embedded as `{"data": {...}}`
    Embedded(Box<T>),
    /// Field missing or null
    Absent,
    /// Field present but unusable; never followed
    Invalid,
}

impl<T> Default for RelatedItem<T> {
    fn default() -> Self {
        RelatedItem::Absent
    }
}

impl<T: DeserializeOwned> RelatedItem<T> {
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Null => RelatedItem::Absent,
            Value::String(id) => RelatedItem::Unresolved(id),
            Value::Object(map) if map.contains_key("data") => {
                match serde_json::from_value::<Envelope<T>>(Value::Object(map)) {
                    Ok(envelope) => RelatedItem::Embedded(Box::new(envelope.data)),
                    Err(err) => {
                        tracing::warn!("Embedded resource did not decode: {}", err);
                        RelatedItem::Invalid
                    }
                }
            }
            other => {
                tracing::warn!("Unexpected relation shape: {}", other);
                RelatedItem::Invalid
            }
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for RelatedItem<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from_value)
    }
}

impl<T> RelatedItem<T> {
    pub fn is_embedded(&self) -> bool {
        matches!(self, RelatedItem::Embedded(_))
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, RelatedItem::Absent)
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, RelatedItem::Invalid)
    }
}

impl<T: Resource> RelatedItem<T> {
    pub fn id(&self) -> Option<&str> {
        match self {
            RelatedItem::Unresolved(id) => Some(id.as_str()),
            RelatedItem::Embedded(item) => Some(item.id()),
            RelatedItem::Absent | RelatedItem::Invalid => None,
        }
    }

    /// Embedded data as is, or one fetch for a bare identifier
    pub async fn resolve(&self, client: &Client) -> Option<T> {
        match self {
            RelatedItem::Unresolved(id) => match fetch_by_id(client, id).await {
                Ok(item) => Some(item),
                Err(err) => {
                    tracing::debug!("Dropping unresolvable id {}: {}", id, err);
                    None
                }
            },
            RelatedItem::Embedded(item) => Some(item.as_ref().clone()),
            RelatedItem::Absent | RelatedItem::Invalid => None,
        }
    }

    /// Like [`RelatedItem::resolve`], but an absent field is fetched through the
    /// owner's `relation` link. An invalid field is not followed.
    pub async fn resolve_or_follow<O>(&self, client: &Client, owner: &O, relation: &str) -> Option<T>
    where
        O: HasLinks + ?Sized,
    {
        match self {
            RelatedItem::Absent => {
                fetch_resource_link(client, owner.first_link(relation), NO_FILTER).await
            }
            _ => self.resolve(client).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Link;
    use serde_json::json;

    #[derive(Debug, Clone, Deserialize)]
    struct Thing {
        id: String,
        #[serde(default)]
        links: Vec<Link>,
    }

    impl HasLinks for Thing {
        fn links(&self) -> &[Link] {
            &self.links
        }
    }

    impl Resource for Thing {
        const ENDPOINT: &'static str = "/things";

        fn id(&self) -> &str {
            &self.id
        }
    }

    #[derive(Debug, Deserialize)]
    struct Owner {
        #[serde(default)]
        things: RelatedList<Thing>,
        #[serde(default)]
        thing: RelatedItem<Thing>,
    }

    #[test]
    fn test_identifier_list() {
        let owner: Owner = serde_json::from_value(json!({"things": ["id1", "id2"]})).unwrap();
        assert!(matches!(owner.things, RelatedList::Unresolved(_)));
        assert_eq!(owner.things.ids(), vec!["id1", "id2"]);
    }

    #[test]
    fn test_non_string_entries_skipped() {
        let list = RelatedList::<Thing>::from_value(json!(["a", 1, null, "b"]));
        assert_eq!(list.ids(), vec!["a", "b"]);
    }

    #[test]
    fn test_embedded_collection() {
        let owner: Owner = serde_json::from_value(json!({
            "things": {"data": [{"id": "id1"}, {"id": "id2"}]}
        }))
        .unwrap();
        assert!(owner.things.is_embedded());
        assert_eq!(owner.things.ids(), vec!["id1", "id2"]);
    }

    #[test]
    fn test_identifier_map() {
        let list = RelatedList::<Thing>::from_value(json!({
            "u1": "moderator",
            "u2": "super-moderator"
        }));
        assert_eq!(list.ids(), vec!["u1", "u2"]);
    }

    #[test]
    fn test_missing_and_null_are_absent() {
        let owner: Owner = serde_json::from_value(json!({})).unwrap();
        assert!(owner.things.is_absent());
        assert!(owner.thing.is_absent());
        assert!(owner.things.ids().is_empty());

        let owner: Owner = serde_json::from_value(json!({"things": null, "thing": null})).unwrap();
        assert!(owner.things.is_absent());
        assert!(owner.thing.is_absent());
    }

    #[test]
    fn test_unknown_shapes_are_invalid() {
        let owner: Owner = serde_json::from_value(json!({"things": 5, "thing": true})).unwrap();
        assert!(owner.things.is_invalid());
        assert!(owner.thing.is_invalid());
        assert!(owner.things.ids().is_empty());
        assert_eq!(owner.thing.id(), None);
    }

    #[test]
    fn test_broken_embed_is_invalid() {
        let list = RelatedList::<Thing>::from_value(json!({"data": [{"name": "no id"}]}));
        assert!(list.is_invalid());
        assert!(!list.is_absent());

        let item = RelatedItem::<Thing>::from_value(json!({"data": {"name": "no id"}}));
        assert!(item.is_invalid());
    }

    #[test]
    fn test_single_item_shapes() {
        let item = RelatedItem::<Thing>::from_value(json!("xyz"));
        assert_eq!(item.id(), Some("xyz"));
        assert!(!item.is_embedded());

        let item = RelatedItem::<Thing>::from_value(json!({"data": {"id": "xyz"}}));
        assert!(item.is_embedded());
        assert_eq!(item.id(), Some("xyz"));
    }
}
