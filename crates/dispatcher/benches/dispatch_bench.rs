use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use criterion::{Criterion, criterion_group, criterion_main};
use dispatcher::{Event, EventDispatcher, EventHandler, HandlerError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum BenchKind {
    Created,
}

impl fmt::Display for BenchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Created")
    }
}

struct BenchEvent {
    occurred_at: DateTime<Utc>,
}

impl Event for BenchEvent {
    type Kind = BenchKind;

    fn kind(&self) -> BenchKind {
        BenchKind::Created
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}

struct Counter(AtomicU64);

impl EventHandler<BenchEvent> for Counter {
    fn handle(&self, _event: &BenchEvent) -> Result<(), HandlerError> {
        self.0.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

fn dispatcher_with(handlers: usize) -> EventDispatcher<BenchEvent> {
    let mut dispatcher = EventDispatcher::new();
    for _ in 0..handlers {
        dispatcher.register(BenchKind::Created, Arc::new(Counter(AtomicU64::new(0))));
    }
    dispatcher
}

fn bench_notify_single_handler(c: &mut Criterion) {
    let dispatcher = dispatcher_with(1);
    let event = BenchEvent {
        occurred_at: Utc::now(),
    };

    c.bench_function("dispatcher/notify_1_handler", |b| {
        b.iter(|| dispatcher.notify(&event));
    });
}

fn bench_notify_ten_handlers(c: &mut Criterion) {
    let dispatcher = dispatcher_with(10);
    let event = BenchEvent {
        occurred_at: Utc::now(),
    };

    c.bench_function("dispatcher/notify_10_handlers", |b| {
        b.iter(|| dispatcher.notify(&event));
    });
}

fn bench_register_and_clear(c: &mut Criterion) {
    c.bench_function("dispatcher/register_100_then_clear", |b| {
        b.iter(|| {
            let mut dispatcher = dispatcher_with(100);
            dispatcher.unregister_all();
        });
    });
}

criterion_group!(
    benches,
    bench_notify_single_handler,
    bench_notify_ten_handlers,
    bench_register_and_clear
);
criterion_main!(benches);
