//! Tests against an in-process transport
//!
//! The fake answers from a fixed path-to-body table and records every request, so
//! these tests can assert exactly how many fetches an operation costs.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{json, Value};
use srapi::{Category, Client, Error, Game, Level, Request, Result, Run, Transport, Variable};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

const ROOT: &str = "https://fake.test/api/v1";

#[derive(Clone, Default)]
struct FakeTransport {
    responses: Arc<HashMap<String, Value>>,
    requested: Arc<Mutex<Vec<String>>>,
}

impl FakeTransport {
    fn new(responses: Vec<(&str, Value)>) -> Self {
        Self {
            responses: Arc::new(
                responses
                    .into_iter()
                    .map(|(path, body)| (path.to_string(), body))
                    .collect(),
            ),
            requested: Arc::default(),
        }
    }

    fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn execute(&self, request: &Request) -> Result<Value> {
        let url = request.url(ROOT)?;
        let key = match url.query() {
            Some(query) => format!("{}?{}", url.path(), query),
            None => url.path().to_string(),
        };
        self.requested.lock().unwrap().push(key.clone());

        self.responses.get(&key).cloned().ok_or(Error::Status {
            status: StatusCode::NOT_FOUND,
            message: None,
        })
    }
}

fn user_body(id: &str) -> Value {
    json!({"data": {"id": id, "names": {"international": format!("user-{}", id)}}})
}

fn run_json(players: Value) -> Value {
    json!({
        "id": "r1",
        "status": {"status": "verified"},
        "players": players,
        "links": [
            {"rel": "self", "uri": format!("{}/runs/r1", ROOT)},
            {"rel": "category", "uri": format!("{}/categories/c1", ROOT)}
        ]
    })
}

mod player_tests {
    use super::*;

    #[tokio::test]
    async fn test_embedded_players_cost_nothing() {
        let fake = FakeTransport::new(vec![]);
        let client = Client::with_transport(ROOT, fake.clone());

        let run: Run = serde_json::from_value(run_json(json!({
            "data": [
                {"rel": "user", "id": "u1", "names": {"international": "One"}},
                {"rel": "guest", "name": "visitor"}
            ]
        })))
        .unwrap();

        let users = run.player_users(&client).await;
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].names.international, "One");
        assert!(fake.requested().is_empty());
    }

    #[tokio::test]
    async fn test_player_references_resolve_in_order() {
        let fake = FakeTransport::new(vec![
            ("/api/v1/users/u1", user_body("u1")),
            ("/api/v1/users/u2", user_body("u2")),
        ]);
        let client = Client::with_transport(ROOT, fake.clone());

        let run: Run = serde_json::from_value(run_json(json!([
            {"rel": "user", "id": "u2", "uri": format!("{}/users/u2", ROOT)},
            {"rel": "guest", "name": "visitor", "uri": format!("{}/guests/visitor", ROOT)},
            {"rel": "user", "id": "u1", "uri": format!("{}/users/u1", ROOT)}
        ])))
        .unwrap();

        let users = run.player_users(&client).await;
        let ids: Vec<_> = users.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, vec!["u2", "u1"]);

        let mut requested = fake.requested();
        requested.sort();
        assert_eq!(requested, vec!["/api/v1/users/u1", "/api/v1/users/u2"]);
    }

    #[tokio::test]
    async fn test_unresolvable_players_are_dropped() {
        let fake = FakeTransport::new(vec![("/api/v1/users/u1", user_body("u1"))]);
        let client = Client::with_transport(ROOT, fake.clone());

        let run: Run = serde_json::from_value(run_json(json!([
            {"rel": "user", "id": "gone", "uri": format!("{}/users/gone", ROOT)},
            {"rel": "user", "id": "u1", "uri": format!("{}/users/u1", ROOT)}
        ])))
        .unwrap();

        let users = run.player_users(&client).await;
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].id, "u1");
        assert_eq!(fake.requested().len(), 2);
    }

    #[tokio::test]
    async fn test_listing_survives_malformed_player() {
        let broken_user = json!({
            "rel": "user",
            "id": "u1",
            "names": {"international": "One"},
            "signup": "2015-03-01"
        });
        let fake = FakeTransport::new(vec![(
            "/api/v1/runs",
            json!({"data": [run_json(json!({"data": [broken_user]})), run_json(json!([]))]}),
        )]);
        let client = Client::with_transport(ROOT, fake.clone());

        let listing = Run::list(&client, None, None, None).await;
        assert!(listing.is_ok());
        assert_eq!(listing.collection.len(), 2);
        assert!(listing.collection.data[0].player_ids().is_empty());
    }
}

mod relation_tests {
    use super::*;

    #[tokio::test]
    async fn test_moderator_map_resolves_keys() {
        let fake = FakeTransport::new(vec![
            ("/api/v1/users/m1", user_body("m1")),
            ("/api/v1/users/m2", user_body("m2")),
        ]);
        let client = Client::with_transport(ROOT, fake.clone());

        let game: Game = serde_json::from_value(json!({
            "id": "g1",
            "names": {"international": "Game"},
            "moderators": {"m1": "moderator", "m2": "super-moderator"}
        }))
        .unwrap();

        let moderators = game.moderators(&client).await;
        assert_eq!(moderators.len(), 2);
        assert_eq!(fake.requested().len(), 2);
    }

    #[tokio::test]
    async fn test_embedded_levels_cost_nothing() {
        let fake = FakeTransport::new(vec![]);
        let client = Client::with_transport(ROOT, fake.clone());

        let game: Game = serde_json::from_value(json!({
            "id": "g1",
            "names": {"international": "Game"},
            "levels": {"data": [
                {"id": "id1", "name": "Bianco Hills"},
                {"id": "id2", "name": "Ricco Harbor"}
            ]},
            "links": [{"rel": "levels", "uri": format!("{}/games/g1/levels", ROOT)}]
        }))
        .unwrap();

        assert_eq!(game.level_ids(), vec!["id1", "id2"]);
        let levels = game.levels(&client, None).await;
        assert_eq!(levels[1].name, "Ricco Harbor");
        assert!(fake.requested().is_empty());
    }

    fn category_with_variables(variables: Value) -> Category {
        serde_json::from_value(json!({
            "id": "c1",
            "name": "Any%",
            "variables": variables,
            "links": [{"rel": "variables", "uri": format!("{}/categories/c1/variables", ROOT)}]
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_unusable_variables_are_not_followed() {
        for variables in [json!(5), json!({"data": [{"bad": 1}]})] {
            let fake = FakeTransport::new(vec![]);
            let client = Client::with_transport(ROOT, fake.clone());

            let category = category_with_variables(variables);
            assert!(category.variables(&client, None).await.is_empty());
            assert!(fake.requested().is_empty());
        }
    }

    #[tokio::test]
    async fn test_null_variables_follow_link() {
        let fake = FakeTransport::new(vec![(
            "/api/v1/categories/c1/variables",
            json!({"data": [{"id": "v1", "name": "Difficulty", "scope": {"type": "global"}}]}),
        )]);
        let client = Client::with_transport(ROOT, fake.clone());

        let category = category_with_variables(Value::Null);
        let variables = category.variables(&client, None).await;

        assert_eq!(variables.len(), 1);
        assert_eq!(fake.requested(), vec!["/api/v1/categories/c1/variables"]);
    }

    #[tokio::test]
    async fn test_embedded_level_categories_cost_nothing() {
        let fake = FakeTransport::new(vec![]);
        let client = Client::with_transport(ROOT, fake.clone());

        let level: Level = serde_json::from_value(json!({
            "id": "l1",
            "name": "Bianco Hills",
            "categories": {"data": [{"id": "c1", "name": "Any%"}]},
            "links": [{"rel": "categories", "uri": format!("{}/levels/l1/categories", ROOT)}]
        }))
        .unwrap();

        let categories = level.categories(&client, None, None).await;
        assert_eq!(categories[0].id, "c1");
        assert!(fake.requested().is_empty());
    }

    #[tokio::test]
    async fn test_embedded_game_on_run() {
        let fake = FakeTransport::new(vec![]);
        let client = Client::with_transport(ROOT, fake.clone());

        let mut run = run_json(json!([]));
        run["game"] = json!({"data": {"id": "g1", "names": {"international": "Game"}}});
        let run: Run = serde_json::from_value(run).unwrap();

        assert_eq!(run.game_id(), Some("g1"));
        let game = run.game(&client).await.unwrap();
        assert_eq!(game.names.international, "Game");
        assert!(fake.requested().is_empty());
    }

    #[tokio::test]
    async fn test_game_id_on_run_costs_one_fetch() {
        let fake = FakeTransport::new(vec![(
            "/api/v1/games/g1",
            json!({"data": {"id": "g1", "names": {"international": "Game"}}}),
        )]);
        let client = Client::with_transport(ROOT, fake.clone());

        let mut run = run_json(json!([]));
        run["game"] = json!("g1");
        let run: Run = serde_json::from_value(run).unwrap();

        assert!(run.game(&client).await.is_some());
        assert_eq!(fake.requested(), vec!["/api/v1/games/g1"]);
    }

    #[tokio::test]
    async fn test_absent_category_follows_link() {
        let fake = FakeTransport::new(vec![(
            "/api/v1/categories/c1",
            json!({"data": {"id": "c1", "name": "Any%"}}),
        )]);
        let client = Client::with_transport(ROOT, fake.clone());

        let run: Run = serde_json::from_value(run_json(json!([]))).unwrap();

        assert_eq!(run.category_id(), None);
        let category = run.category(&client).await.unwrap();
        assert_eq!(category.name, "Any%");
        assert_eq!(fake.requested(), vec!["/api/v1/categories/c1"]);
    }

    #[tokio::test]
    async fn test_variable_without_category_link() {
        let fake = FakeTransport::new(vec![]);
        let client = Client::with_transport(ROOT, fake.clone());

        let variable: Variable = serde_json::from_value(json!({
            "id": "v1",
            "name": "Difficulty",
            "scope": {"type": "global"},
            "links": [{"rel": "game", "uri": format!("{}/games/g1", ROOT)}]
        }))
        .unwrap();

        assert!(variable.category(&client).await.is_none());
        assert!(fake.requested().is_empty());

        // Game link present but the fake has no answer: logged and reported as nothing
        assert!(variable.game(&client).await.is_none());
        assert_eq!(fake.requested(), vec!["/api/v1/games/g1"]);
    }
}
