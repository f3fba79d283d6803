pub mod activity;
pub mod personal_record;
pub mod session;
pub mod transition;
