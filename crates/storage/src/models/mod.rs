pub mod activity;
pub mod personal_record;
pub mod sport;
pub mod training_session;
pub mod transition;

pub use activity::Activity;
pub use personal_record::{NewPersonalRecord, PersonalRecord};
pub use sport::{DISTANCE_TOLERANCE_KM, Sport};
pub use training_session::TrainingSession;
pub use transition::{Transition, TransitionKind};
