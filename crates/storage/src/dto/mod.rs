pub mod account;
pub mod common;
pub mod competition;
pub mod competition_sport;
pub mod sport;
pub mod stage;
