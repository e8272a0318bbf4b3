pub mod chat;
pub mod health;
pub mod metrics;
pub mod orders;
