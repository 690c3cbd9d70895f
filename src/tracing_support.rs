//! Subscriber setup and per-stage timing.
//!
//! With the `tracing` feature enabled, [`init_tracing`] installs a fmt
//! subscriber on stderr plus a layer that accumulates how long each named
//! span (`decompose`, `balance`, `extract`, `stitch`, ...) stayed open.
//! Without the feature every function here is a no-op; the library still
//! emits events through the `tracing` facade.

#[cfg(feature = "tracing")]
mod enabled {
    use std::{
        cell::RefCell,
        collections::BTreeMap,
        sync::Once,
        time::{Duration, Instant},
    };

    use tracing::Level;
    use tracing_subscriber::{
        Layer, Registry, filter::LevelFilter, layer::Context, layer::SubscriberExt,
        registry::LookupSpan, util::SubscriberInitExt,
    };

    thread_local! {
        static STAGE_TIMINGS: RefCell<BTreeMap<&'static str, (Duration, usize)>> =
            const { RefCell::new(BTreeMap::new()) };
    }

    struct StageTimingLayer;

    impl<S> Layer<S> for StageTimingLayer
    where
        S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    {
        fn on_new_span(
            &self,
            _attrs: &tracing::span::Attributes<'_>,
            id: &tracing::Id,
            ctx: Context<'_, S>,
        ) {
            if let Some(span) = ctx.span(id) {
                span.extensions_mut().insert(Instant::now());
            }
        }

        fn on_close(&self, id: tracing::Id, ctx: Context<'_, S>) {
            if let Some(span) = ctx.span(&id) {
                let name = span.metadata().name();
                if let Some(start) = span.extensions().get::<Instant>() {
                    let elapsed = start.elapsed();
                    STAGE_TIMINGS.with(|totals| {
                        let mut totals = totals.borrow_mut();
                        let entry = totals.entry(name).or_insert((Duration::ZERO, 0));
                        entry.0 += elapsed;
                        entry.1 += 1;
                    });
                }
            }
        }
    }

    /// Installs the global subscriber once; later calls do nothing.  Events
    /// above `max_level` are not printed, but spans are always timed.
    pub fn init_tracing(max_level: Level) {
        static INIT: Once = Once::new();
        INIT.call_once(|| {
            let fmt = tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_filter(LevelFilter::from_level(max_level));
            let _ = Registry::default().with(fmt).with(StageTimingLayer).try_init();
        });
    }

    /// Accumulated `(span name, total time, times closed)` on this thread,
    /// slowest first.
    pub fn stage_timings() -> Vec<(&'static str, Duration, usize)> {
        STAGE_TIMINGS.with(|totals| {
            let mut entries: Vec<_> = totals
                .borrow()
                .iter()
                .map(|(name, (duration, count))| (*name, *duration, *count))
                .collect();
            entries.sort_by(|a, b| b.1.cmp(&a.1));
            entries
        })
    }

    pub fn reset_stage_timings() {
        STAGE_TIMINGS.with(|totals| totals.borrow_mut().clear());
    }

    pub fn dump_stage_timings() {
        eprintln!("Stage timings (desc):");
        for (name, duration, count) in stage_timings() {
            eprintln!("  {name}: {duration:?} ({count}x)");
        }
    }
}

#[cfg(not(feature = "tracing"))]
mod disabled {
    use std::time::Duration;

    use tracing::Level;

    pub fn init_tracing(_max_level: Level) {
        // No-op when tracing is disabled
    }

    pub fn stage_timings() -> Vec<(&'static str, Duration, usize)> {
        Vec::new()
    }

    pub fn reset_stage_timings() {
        // No-op when tracing is disabled
    }

    pub fn dump_stage_timings() {
        // No-op when tracing is disabled
    }
}

#[cfg(feature = "tracing")]
pub use enabled::*;

#[cfg(not(feature = "tracing"))]
pub use disabled::*;
