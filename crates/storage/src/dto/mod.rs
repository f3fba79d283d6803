pub mod activity;
pub mod common;
pub mod personal_record;
pub mod session;
pub mod transition;

use validator::ValidationError;

pub(crate) fn validation_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}
