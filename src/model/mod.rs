pub use activity::Activity;
pub use api_response::{ErrorDetail, SignupMessage};
pub use snapshot::RosterSnapshot;

mod activity;
mod api_response;
mod snapshot;
