pub mod connectivity;
pub mod envelope;
pub mod rest_gateway;

pub use rest_gateway::{RestApiGateway, RetryConfig};
