//! Outbound queue benchmark suite.
//!
//! Measures payloads emitted while the channel is still connecting, then
//! flushed in one go when it opens:
//! - Queue depths: 16, 256, 4096
//! - Direct sends on an open channel for comparison
//!
//! Run with: cargo bench --bench outbound_queue
//! Results saved to: target/criterion/

use std::hint::black_box;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use parking_lot::Mutex;
use serde_json::{Value, json};
use socket_monitor::transport::{ChannelHandler, ChannelRequest};
use socket_monitor::{
    Channel, ChannelEvent, ChannelState, ConnectionConfig, ConnectionManager, Connector, Result,
};

// ============================================================================
// Benchmark Parameters
// ============================================================================

const QUEUE_DEPTHS: &[usize] = &[16, 256, 4096];

const ENDPOINT: &str = "ws://bench.local/socket";

// ============================================================================
// In-Memory Transport
// ============================================================================

/// Channel that counts frames instead of writing them.
struct CountingChannel {
    state: AtomicU8,
    frames: AtomicUsize,
    handler: ChannelHandler,
}

impl CountingChannel {
    fn open(&self) {
        self.state.store(ChannelState::Open as u8, Ordering::Release);
        (self.handler)(ChannelEvent::Open);
    }
}

impl Channel for CountingChannel {
    fn state(&self) -> ChannelState {
        ChannelState::from_u8(self.state.load(Ordering::Acquire))
    }

    fn send(&self, text: &str) -> Result<()> {
        black_box(text);
        self.frames.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn close(&self) {
        self.state.store(ChannelState::Closed as u8, Ordering::Release);
    }
}

#[derive(Default)]
struct CountingConnector {
    last: Mutex<Option<Arc<CountingChannel>>>,
}

impl Connector for CountingConnector {
    fn open(&self, _: &ChannelRequest, handler: ChannelHandler) -> Result<Arc<dyn Channel>> {
        let channel = Arc::new(CountingChannel {
            state: AtomicU8::new(ChannelState::Connecting as u8),
            frames: AtomicUsize::new(0),
            handler,
        });
        *self.last.lock() = Some(Arc::clone(&channel));
        Ok(channel)
    }
}

fn manager() -> (ConnectionManager, Arc<CountingChannel>) {
    let connector = Arc::new(CountingConnector::default());
    let manager = ConnectionManager::<Value>::builder()
        .config(ConnectionConfig::new(ENDPOINT).with_verbose(false))
        .connector(Arc::clone(&connector) as Arc<dyn Connector>)
        .build();
    let channel = connector
        .last
        .lock()
        .clone()
        .expect("manager constructs a channel");
    (manager, channel)
}

// ============================================================================
// Benchmark: Queue Then Flush
// ============================================================================

fn bench_queue_then_flush(c: &mut Criterion) {
    let mut group = c.benchmark_group("queue_then_flush");

    for &depth in QUEUE_DEPTHS {
        group.throughput(Throughput::Elements(depth as u64));
        group.bench_with_input(BenchmarkId::new("emit_open", depth), &depth, |b, &depth| {
            b.iter(|| {
                let (manager, channel) = manager();
                for n in 0..depth {
                    manager
                        .emit(&json!({ "type": "tick", "n": n }))
                        .expect("emit");
                }
                channel.open();
                assert_eq!(channel.frames.load(Ordering::Relaxed), depth);
            });
        });
    }

    group.finish();
}

// ============================================================================
// Benchmark: Direct Send
// ============================================================================

fn bench_direct_send(c: &mut Criterion) {
    let (manager, channel) = manager();
    channel.open();
    let payload = json!({ "type": "tick", "n": 1 });

    c.bench_function("direct_send", |b| {
        b.iter(|| manager.emit(black_box(&payload)).expect("emit"));
    });
}

criterion_group!(benches, bench_queue_then_flush, bench_direct_send);
criterion_main!(benches);
