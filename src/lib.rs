//! Tokoterm - a terminal client for a small shop's REST backend.
//!
//! The crate maintains customer (pelanggan), goods (barang) and sales order
//! (penjualan) records through list-and-form screens, following a clean
//! architecture split into domain, application, infrastructure and
//! presentation layers.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing screen state machines and DTOs.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing the REST client and configuration.
pub mod infrastructure;
/// Presentation layer containing UI components and event handling.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "tokoterm";

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tracing::subscriber::DefaultGuard;
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    /// Counts `ERROR` events emitted on the current thread while alive.
    pub struct ErrorCounter {
        count: Arc<AtomicUsize>,
        _guard: DefaultGuard,
    }

    struct CountingLayer {
        count: Arc<AtomicUsize>,
    }

    impl<S: Subscriber> Layer<S> for CountingLayer {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() == Level::ERROR {
                self.count.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    impl ErrorCounter {
        pub fn install() -> Self {
            let count = Arc::new(AtomicUsize::new(0));
            let subscriber = tracing_subscriber::registry().with(CountingLayer {
                count: Arc::clone(&count),
            });
            Self {
                count,
                _guard: tracing::subscriber::set_default(subscriber),
            }
        }

        pub fn count(&self) -> usize {
            self.count.load(Ordering::SeqCst)
        }
    }
}
