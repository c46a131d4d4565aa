use errchain::{Error, Kind, Location, chain};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

#[allow(dead_code)]
pub const BAD: Kind = Kind::new(1);
#[allow(dead_code)]
pub const WORSE: Kind = Kind::new(2);
#[allow(dead_code)]
pub const WORST: Kind = Kind::new(3);

/// Binary encoding of [`three_level_chain`].
#[allow(dead_code)]
pub const THREE_LEVEL_BYTES: &[u8] = b"\x06\x11errors_test.rs:19\x00\
\x04\x11errors_test.rs:18\x18three_level_chain_middle\
\x02\x11errors_test.rs:17\x17things are gonna be bad";

#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()))
        .with_test_writer()
        .try_init();
}

/// Counts `WARN` events seen while installed.
#[derive(Clone, Default)]
struct WarnCounter(Arc<AtomicUsize>);

impl<S: tracing::Subscriber> Layer<S> for WarnCounter {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == tracing::Level::WARN {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Run `f` with a thread-local subscriber and return how many warnings it logged.
#[allow(dead_code)]
pub fn count_warnings<R>(f: impl FnOnce() -> R) -> (R, usize) {
    let counter = WarnCounter::default();
    let subscriber = tracing_subscriber::registry().with(counter.clone());
    let out = tracing::subscriber::with_default(subscriber, f);
    (out, counter.0.load(Ordering::SeqCst))
}

#[allow(dead_code)]
pub fn three_level_chain() -> Error {
    let a = chain!(BAD, Location::new("errors_test.rs:17"), "things are gonna be bad");
    let b = chain!(WORSE, "three_level_chain_middle", Location::new("errors_test.rs:18"), a);
    chain!(WORST, Location::new("errors_test.rs:19"), b)
}
