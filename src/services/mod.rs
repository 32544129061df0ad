pub mod aggregator;
pub mod favorites;
pub mod recents;
pub mod refresh_engine;
