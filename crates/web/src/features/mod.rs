pub mod activities;
pub mod health;
pub mod personal_records;
pub mod sessions;
pub mod transitions;
