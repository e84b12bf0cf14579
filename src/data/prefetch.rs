// ============================================================
// Layer 4 — Prefetcher
// ============================================================
// Overlaps batch preparation with the consumer.
//
//   producer thread:  [batch 1][batch 2][batch 3]...
//   training loop:            [step 1 ][step 2 ]...
//
// The producer runs ahead by at most `depth` items. A bounded
// channel gives the backpressure: once it is full, send()
// blocks until the consumer takes the next item.
//
// Dropping the Prefetcher drops the receiver, which makes the
// producer's next send() fail, and the producer returns.
//
// A producer that panics closes the channel early. The consumer
// joins it on the next recv() failure and re-raises the panic, so
// a failed pass is never mistaken for a short one.
//
// Reference: Rust Book §16 (Message Passing with Channels)

use std::{
    panic,
    sync::mpsc::{sync_channel, Receiver},
    thread::{self, JoinHandle},
};

pub struct Prefetcher<T> {
    receiver: Option<Receiver<T>>,
    worker:   Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Prefetcher<T> {
    /// Start draining `producer` on a background thread, keeping up to
    /// `depth` items ready. A depth of 0 is treated as 1.
    pub fn spawn<I>(producer: I, depth: usize) -> Self
    where
        I: Iterator<Item = T> + Send + 'static,
    {
        let (sender, receiver) = sync_channel(depth.max(1));

        let worker = thread::spawn(move || {
            for item in producer {
                if sender.send(item).is_err() {
                    tracing::debug!("Prefetch consumer dropped; stopping producer");
                    break;
                }
            }
        });

        Self { receiver: Some(receiver), worker: Some(worker) }
    }
}

impl<T> Iterator for Prefetcher<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        match self.receiver.as_ref()?.recv() {
            Ok(item) => Some(item),
            Err(_) => {
                // Channel closed: the producer either finished or panicked
                self.receiver.take();
                if let Some(worker) = self.worker.take() {
                    if let Err(payload) = worker.join() {
                        panic::resume_unwind(payload);
                    }
                }
                None
            }
        }
    }
}

impl<T> Drop for Prefetcher<T> {
    fn drop(&mut self) {
        // Receiver first, so a producer blocked in send() wakes up and exits
        self.receiver.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                tracing::warn!("Prefetch producer panicked");
            }
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };
    use std::time::Duration;

    #[test]
    fn test_yields_items_in_order() {
        let items: Vec<u32> = Prefetcher::spawn(0..10u32, 2).collect();
        assert_eq!(items, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_zero_depth_still_works() {
        let items: Vec<u32> = Prefetcher::spawn(0..3u32, 0).collect();
        assert_eq!(items, vec![0, 1, 2]);
    }

    #[test]
    fn test_producer_runs_at_most_depth_ahead() {
        let produced = Arc::new(AtomicUsize::new(0));
        let counter  = Arc::clone(&produced);
        let source   = (0..100).inspect(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let mut prefetcher = Prefetcher::spawn(source, 2);
        assert_eq!(prefetcher.next(), Some(0));
        thread::sleep(Duration::from_millis(50));

        // One consumed, two buffered, one blocked in send()
        assert!(produced.load(Ordering::SeqCst) <= 4);
    }

    #[test]
    fn test_producer_panic_reaches_consumer() {
        let source = (0..5u32).map(|i| {
            if i == 2 {
                panic!("bad sample");
            }
            i
        });

        let mut prefetcher = Prefetcher::spawn(source, 1);
        let mut seen = Vec::new();
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            for item in prefetcher.by_ref() {
                seen.push(item);
            }
        }));

        assert!(outcome.is_err());
        assert_eq!(seen, vec![0, 1]);
        // Already joined; dropping afterwards is a no-op
        drop(prefetcher);
    }

    #[test]
    fn test_finished_producer_keeps_returning_none() {
        let mut prefetcher = Prefetcher::spawn(0..1u32, 1);
        assert_eq!(prefetcher.next(), Some(0));
        assert_eq!(prefetcher.next(), None);
        assert_eq!(prefetcher.next(), None);
    }

    #[test]
    fn test_drop_stops_infinite_producer() {
        let mut prefetcher = Prefetcher::spawn(0u64.., 1);
        assert_eq!(prefetcher.next(), Some(0));
        // Must not hang
        drop(prefetcher);
    }
}
