pub use banner::Banner;
pub use form::SignupForm;
pub use render::{
    render, ActivityCard, CapacityRatio, ListView, ParticipantList, ParticipantRow, RosterView,
    WithdrawAction,
};

mod banner;
mod form;
mod render;
