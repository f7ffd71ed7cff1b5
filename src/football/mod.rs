//! football-data.org data layer: domain records, HTTP client, and the
//! TTL-cached team service.

pub mod cache;
pub mod client;
pub mod model;
pub mod service;

pub use cache::TeamCache;
pub use client::{FootballApiClient, TeamsApi};
pub use model::{Player, Team};
pub use service::TeamService;
