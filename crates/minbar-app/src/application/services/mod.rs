mod auth_service;
mod connect_service;
mod coordinator;
mod member_service;
mod poller;

#[cfg(test)]
pub(crate) mod test_support;

pub use auth_service::{AuthService, RegisterOutcome};
pub use connect_service::{ConnectOutcome, ConnectService};
pub use coordinator::{RefreshCoordinator, PAYMENTS_PAGE_SIZE};
pub use member_service::MemberService;
pub use poller::RefreshPoller;
