mod api_port;

pub use api_port::ApiPort;

#[cfg(test)]
pub mod mocks {
    pub use super::api_port::MockApiPort;
    pub use super::api_port::mock::{InMemoryBackend, Recorded};
}
