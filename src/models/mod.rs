pub mod delivery;
pub mod health;
pub mod message;
pub mod response;
pub mod submission;
pub mod telegram;
pub mod validation;
