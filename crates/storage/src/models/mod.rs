mod client;
mod competition;
mod competition_sport;
mod sport;
mod stage;
mod user;

pub use client::Client;
pub use competition::Competition;
pub use competition_sport::CompetitionSport;
pub use sport::Sport;
pub use stage::Stage;
pub use user::User;
