//! Typed client for the speedrun.com REST API
//!
//! Resources (games, categories, levels, runs, users, leaderboards...) are fetched
//! through a [`Client`]. Related resources are reached either through data embedded
//! in the response that produced them or by following the hyperlinks each resource carries,
//! and listings page through their `next`/`prev` links.
//!
//! ```ignore
//! use srapi::{Category, Client};
//!
//! #[tokio::main]
//! async fn main() -> srapi::Result<()> {
//!     let client = Client::from_env()?;
//!     let category = Category::by_id(&client, "n2y3r8do").await?;
//!     if let Some(board) = category.primary_leaderboard(&client, None).await {
//!         for ranked in &board.runs {
//!             println!("{} {}", ranked.place, ranked.run.times.primary_t);
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod resource;

pub use api::{
    first_link, ApplyToUrl, Client, Cursor, Direction, HasLinks, HttpTransport, Link, Request,
    Sorting, Transport,
};
pub use config::Config;
pub use error::{Error, ErrorKind, Result};
pub use resource::{
    Category, CategoryFilter, CategoryType, Collection, Game, GameFilter, Guest, Leaderboard,
    LeaderboardFilter, LeaderboardOptions, LeaderboardScope, Level, Listing, Names, Pagination,
    Platform, PlayerRef, RankedRun, Region, RelatedItem, RelatedList, Resource, Run, RunFilter,
    RunPlayers, TimingMethod, User, UserFilter, Variable, VerificationStatus,
};
