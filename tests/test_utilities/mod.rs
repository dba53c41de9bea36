/// Shared test doubles for integration tests
pub mod mocks;
