//! Shared fixtures for pipeline tests.

#![allow(dead_code)]

use hygiene_core::Field;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

/// Route pipeline trace output to the test harness.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Geo {
    pub zone: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub geo: Geo,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Contact {
    pub name: String,
    pub phone: String,
    pub address: Address,
}

pub fn contact() -> Contact {
    Contact {
        name: "  Ada  ".into(),
        phone: " 555-555-5555 ".into(),
        address: Address {
            street: " 1 Main St ".into(),
            city: "springfield".into(),
            geo: Geo {
                zone: "utc-5".into(),
            },
        },
    }
}

/// Read and write counts recorded by [`counted`] fields.
#[derive(Debug, Clone, Default)]
pub struct AccessLog {
    reads: Arc<AtomicUsize>,
    writes: Arc<AtomicUsize>,
}

impl AccessLog {
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

/// Wrap a field so every read and write through it is counted in `log`.
pub fn counted<T, V>(field: Field<T, V>, log: &AccessLog) -> Field<T, V>
where
    T: 'static,
    V: 'static,
{
    let name = field.name();
    let reader = field.clone();
    let reads = Arc::clone(&log.reads);
    let writes = Arc::clone(&log.writes);

    Field::new(
        name,
        move |owner: &T| {
            reads.fetch_add(1, Ordering::SeqCst);
            reader.read(owner)
        },
        move |owner: &mut T, value: V| {
            writes.fetch_add(1, Ordering::SeqCst);
            field
                .write(owner, value)
                .expect("fixture fields are writable");
        },
    )
}

/// A future that returns `Pending` once before completing.
///
/// Suspends without a reactor, so it also works under the blocking entry point.
#[derive(Debug, Default)]
pub struct YieldNow {
    yielded: bool,
}

impl Future for YieldNow {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.yielded {
            Poll::Ready(())
        } else {
            self.yielded = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }
}

pub fn yield_now() -> YieldNow {
    YieldNow::default()
}
