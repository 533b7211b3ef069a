use std::time::{Duration, Instant};

use vardiff_core::{Sink, Variant};

/// Sink wrapper that logs a line every `interval` accepted records.
///
/// An interval of zero turns the periodic lines off; [`ProgressSink::finish`]
/// still logs the total.
pub struct ProgressSink<S> {
    inner: S,
    interval: u64,
    count: u64,
    started: Instant,
    last_batch: Instant,
}

impl<S> ProgressSink<S> {
    pub fn new(inner: S, interval: u64) -> Self {
        let now = Instant::now();
        Self {
            inner,
            interval,
            count: 0,
            started: now,
            last_batch: now,
        }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// Log the final count and hand back the wrapped sink.
    pub fn finish(self) -> S {
        tracing::info!(
            records = self.count,
            elapsed = %format_duration(self.started.elapsed()),
            "finished writing"
        );
        self.inner
    }
}

impl<S: Sink<Variant>> Sink<Variant> for ProgressSink<S> {
    type Error = S::Error;

    fn accept(&mut self, record: Variant) -> Result<(), S::Error> {
        let locus = if self.interval > 0 && (self.count + 1) % self.interval == 0 {
            Some(record.locus())
        } else {
            None
        };
        self.inner.accept(record)?;
        self.count += 1;

        if let Some(locus) = locus {
            tracing::info!(
                records = self.count,
                elapsed = %format_duration(self.started.elapsed()),
                batch = %format_duration(self.last_batch.elapsed()),
                last = %locus,
                "written"
            );
            self.last_batch = Instant::now();
        }
        Ok(())
    }
}

fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs / 60) % 60, secs % 60)
}
