//! Provider adapters: one per external performance-testing service.

pub mod lighthouse;
pub mod mock;
pub mod pagespeed;
pub mod registry;
pub mod webpagetest;

pub use lighthouse::LighthouseProvider;
pub use mock::{MockProvider, MockResponse};
pub use pagespeed::PageSpeedProvider;
pub use registry::ProviderRegistry;
pub use webpagetest::WebPageTestProvider;
