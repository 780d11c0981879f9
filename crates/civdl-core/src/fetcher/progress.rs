//! Console progress for a single transfer (KB done, rate, ETA when known).

use std::io::Write;
use std::time::{Duration, Instant};

const PRINT_INTERVAL: Duration = Duration::from_millis(500);

/// Snapshot of transfer progress.
#[derive(Debug, Clone)]
pub struct ProgressStats {
    /// Bytes written so far.
    pub bytes_done: u64,
    /// Total size from `Content-Length`; `None` when absent or zero.
    pub total_bytes: Option<u64>,
    /// Elapsed time since the transfer started (seconds).
    pub elapsed_secs: f64,
}

impl ProgressStats {
    /// Download rate in bytes per second (0 if elapsed is 0).
    pub fn bytes_per_sec(&self) -> f64 {
        if self.elapsed_secs <= 0.0 {
            return 0.0;
        }
        self.bytes_done as f64 / self.elapsed_secs
    }

    /// Estimated seconds remaining (None if the total is unknown or rate is 0).
    pub fn eta_secs(&self) -> Option<f64> {
        let total = self.total_bytes?;
        let remaining = total.saturating_sub(self.bytes_done);
        if remaining == 0 {
            return Some(0.0);
        }
        let rate = self.bytes_per_sec();
        if rate <= 0.0 {
            return None;
        }
        Some(remaining as f64 / rate)
    }

    /// Fraction complete in [0.0, 1.0], if the total is known.
    pub fn fraction(&self) -> Option<f64> {
        let total = self.total_bytes?;
        Some((self.bytes_done as f64 / total as f64).min(1.0))
    }

    /// One-line rendering, e.g. `  512 / 2048 KB (25.0%)  1.20 MiB/s  ETA 3s`.
    pub fn render(&self) -> String {
        let done_kb = self.bytes_done / 1024;
        let rate_mib = self.bytes_per_sec() / 1_048_576.0;
        match (self.total_bytes, self.fraction()) {
            (Some(total), Some(fraction)) => {
                let eta = self
                    .eta_secs()
                    .map(|s| format!("{:.0}s", s))
                    .unwrap_or_else(|| "?".to_string());
                format!(
                    "  {} / {} KB ({:.1}%)  {:.2} MiB/s  ETA {}",
                    done_kb,
                    total / 1024,
                    fraction * 100.0,
                    rate_mib,
                    eta
                )
            }
            _ => format!("  {} KB  {:.2} MiB/s", done_kb, rate_mib),
        }
    }
}

/// Prints `ProgressStats` to stdout at most every 500 ms, overwriting the line.
pub(crate) struct ConsoleProgress {
    enabled: bool,
    start: Instant,
    last_print: Option<Instant>,
}

impl ConsoleProgress {
    pub(crate) fn new(enabled: bool) -> Self {
        Self {
            enabled,
            start: Instant::now(),
            last_print: None,
        }
    }

    pub(crate) fn stats(&self, bytes_done: u64, content_length: Option<u64>) -> ProgressStats {
        ProgressStats {
            bytes_done,
            total_bytes: content_length.filter(|n| *n > 0),
            elapsed_secs: self.start.elapsed().as_secs_f64(),
        }
    }

    pub(crate) fn update(&mut self, bytes_done: u64, content_length: Option<u64>) {
        if !self.enabled {
            return;
        }
        let now = Instant::now();
        let due = self
            .last_print
            .map_or(true, |t| now.duration_since(t) >= PRINT_INTERVAL);
        if !due {
            return;
        }
        let line = self.stats(bytes_done, content_length).render();
        let mut out = std::io::stdout().lock();
        let _ = write!(out, "\r{:<60}", line);
        let _ = out.flush();
        self.last_print = Some(now);
    }

    /// Terminate a drawn line without a final snapshot (transfer failed).
    pub(crate) fn end_line(&mut self) {
        if self.enabled && self.last_print.take().is_some() {
            println!();
        }
    }

    #[cfg(test)]
    fn line_open(&self) -> bool {
        self.last_print.is_some()
    }

    /// Print the final snapshot and end the line.
    pub(crate) fn finish(&mut self, bytes_done: u64, content_length: Option<u64>) {
        if !self.enabled || self.last_print.is_none() {
            return;
        }
        let line = self.stats(bytes_done, content_length).render();
        println!("\r{:<60}", line);
        self.last_print = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_total() {
        let s = ProgressStats {
            bytes_done: 512 * 1024,
            total_bytes: Some(2048 * 1024),
            elapsed_secs: 1.0,
        };
        assert_eq!(s.fraction(), Some(0.25));
        assert_eq!(s.eta_secs(), Some(3.0));
        assert!(s.render().starts_with("  512 / 2048 KB (25.0%)"));
    }

    #[test]
    fn unknown_total() {
        let s = ProgressStats {
            bytes_done: 4096,
            total_bytes: None,
            elapsed_secs: 0.0,
        };
        assert_eq!(s.fraction(), None);
        assert_eq!(s.eta_secs(), None);
        assert_eq!(s.bytes_per_sec(), 0.0);
        assert!(s.render().starts_with("  4 KB"));
    }

    #[test]
    fn end_line_closes_a_drawn_line_once() {
        let mut p = ConsoleProgress::new(true);
        p.end_line();
        assert!(!p.line_open());
        p.update(1024, Some(4096));
        assert!(p.line_open());
        p.end_line();
        assert!(!p.line_open());

        let mut quiet = ConsoleProgress::new(false);
        quiet.update(1024, Some(4096));
        assert!(!quiet.line_open());
    }

    #[test]
    fn zero_content_length_is_unknown() {
        let p = ConsoleProgress::new(false);
        assert_eq!(p.stats(10, Some(0)).total_bytes, None);
        assert_eq!(p.stats(10, Some(100)).total_bytes, Some(100));
    }
}
