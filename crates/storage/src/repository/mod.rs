pub mod client;
pub mod competition;
pub mod competition_sport;
pub mod sport;
pub mod stage;
