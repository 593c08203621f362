pub mod application;

pub use application::services::{RefreshCoordinator, RefreshPoller};
