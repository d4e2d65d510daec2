//! Typed API resources
//!
//! One module per resource kind, all built on the same generic machinery:
//!
//! - [`fetcher`] - singular and listing fetches, plus their follow-a-link variants
//! - [`collection`] - pages of resources and navigation between them
//! - [`embed`] - relation fields that hold either identifiers or embedded data
//!
//! # Example
//!
//! ```ignore
//! use srapi::{Client, Config, Game, GameFilter};
//!
//! async fn list_romhacks(client: &Client) -> srapi::Result<Vec<Game>> {
//!     let filter = GameFilter { romhack: Some(true), ..Default::default() };
//!     let first = Game::list(client, Some(&filter), None, None).await.into_result()?;
//!     first.collect_all(client).await
//! }
//! ```

pub mod collection;
pub mod embed;
pub mod fetcher;

mod category;
mod game;
mod leaderboard;
mod level;
mod platform;
mod region;
mod run;
mod user;
mod variable;

use crate::api::HasLinks;
use serde::de::DeserializeOwned;

pub use category::{Category, CategoryFilter, CategoryType, Players};
pub use collection::{Collection, Listing, Pagination};
pub use embed::{RelatedItem, RelatedList};
pub use game::{AssetLink, Game, GameFilter, Names, Ruleset, TimingMethod};
pub use leaderboard::{
    Leaderboard, LeaderboardFilter, LeaderboardOptions, LeaderboardScope, RankedRun,
};
pub use level::Level;
pub use platform::Platform;
pub use region::Region;
pub use run::{
    EmbeddedPlayer, Guest, PlayerRef, Run, RunFilter, RunPlayers, RunStatus, RunSystem,
    RunTimes, VerificationStatus, Video, Videos,
};
pub use user::{Location, NameColor, NameStyle, SocialLink, User, UserFilter, UserLocation};
pub use variable::{Variable, VariableScope, VariableValue, VariableValues};

/// A top-level entity with an identifier, fetchable at `ENDPOINT/<id>`
pub trait Resource: DeserializeOwned + HasLinks + Clone {
    /// Collection path, e.g. `/games`
    const ENDPOINT: &'static str;

    fn id(&self) -> &str;
}
