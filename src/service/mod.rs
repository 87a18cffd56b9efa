pub use api_error::ApiError;
pub use rest_client::ActivitiesApi;
pub use roster_service::RosterService;

mod api_error;
mod rest_client;
mod roster_service;
