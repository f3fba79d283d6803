pub mod personal_records;
pub mod session_totals;
