pub mod accounts;
pub mod competition_sport;
pub mod competitions;
pub mod pages;
pub mod sports;
pub mod stages;
