// Copyright 2025 JiangLong.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Bounded "is it up yet" polling

use crate::shared::error::{Result, ShipError};
use backon::{ConstantBuilder, Retryable};
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tracing::warn;

/// Deadline used when the requested timeout does not fit in an `Instant`.
const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub timeout: Duration,
}

impl PollPolicy {
    pub fn new(interval: Duration, timeout: Duration) -> Self {
        Self { interval, timeout }
    }
}

/// Repeats `probe` until it succeeds or `policy.timeout` runs out.
///
/// Any probe error counts as "not available yet". Another attempt is made only
/// if it would start before the deadline, so a 30s interval with a 1 minute
/// timeout gives at most two attempts. A zero timeout never probes.
pub async fn poll_until_available<F, Fut>(target: &str, policy: PollPolicy, probe: F) -> Result<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<()>>,
{
    let timed_out = || ShipError::AvailabilityTimeout {
        target: target.to_string(),
        timeout: policy.timeout,
    };

    if policy.timeout.is_zero() {
        return Err(timed_out());
    }

    let now = Instant::now();
    let deadline = now.checked_add(policy.timeout).unwrap_or(now + FAR_FUTURE);
    let backoff = ConstantBuilder::default()
        .with_delay(policy.interval)
        .with_max_times(usize::MAX);

    probe
        .retry(backoff)
        .sleep(tokio::time::sleep)
        .when(|_| Instant::now() + policy.interval < deadline)
        .notify(|err: &ShipError, delay: Duration| {
            warn!(target, error = %err, "not available yet");
            println!(
                "{} unavailable. Waiting {} seconds before retrying.",
                target,
                delay.as_secs()
            );
        })
        .await
        .map_err(|err| {
            warn!(target, error = %err, "giving up");
            timed_out()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn not_ready() -> ShipError {
        ShipError::NotReady {
            target: "test".to_string(),
            reason: "down".to_string(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_never_available_stops_after_two_attempts() {
        let counter = AtomicUsize::new(0);
        let attempts = &counter;
        let policy = PollPolicy::new(Duration::from_secs(30), Duration::from_secs(60));

        let result = poll_until_available("Kubernetes server", policy, move || async move {
            attempts.fetch_add(1, Ordering::SeqCst);
            Err(not_ready())
        })
        .await;

        assert!(matches!(result, Err(ShipError::AvailabilityTimeout { .. })));
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_default_timeout_attempt_count() {
        let counter = AtomicUsize::new(0);
        let attempts = &counter;
        let policy = PollPolicy::new(Duration::from_secs(15), Duration::from_secs(300));

        let result = poll_until_available("Helm tiller", policy, move || async move {
            attempts.fetch_add(1, Ordering::SeqCst);
            Err(not_ready())
        })
        .await;

        assert!(result.is_err());
        // attempts at 0, 15, ..., 285
        assert_eq!(attempts.load(Ordering::SeqCst), 20);
    }

    #[tokio::test(start_paused = true)]
    async fn test_succeeds_on_second_attempt() {
        let counter = AtomicUsize::new(0);
        let attempts = &counter;
        let started = Instant::now();
        let policy = PollPolicy::new(Duration::from_secs(30), Duration::from_secs(300));

        poll_until_available("Kubernetes server", policy, move || async move {
            let n = attempts.fetch_add(1, Ordering::SeqCst);
            if n == 0 {
                Err(not_ready())
            } else {
                Ok(())
            }
        })
        .await
        .unwrap();

        assert_eq!(attempts.load(Ordering::SeqCst), 2);
        assert_eq!(started.elapsed(), Duration::from_secs(30));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_timeout_never_probes() {
        let counter = AtomicUsize::new(0);
        let attempts = &counter;
        let policy = PollPolicy::new(Duration::from_secs(30), Duration::ZERO);

        let result = poll_until_available("Kubernetes server", policy, move || async move {
            attempts.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
        .await;

        assert!(result.is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unbounded_timeout_still_polls() {
        let counter = AtomicUsize::new(0);
        let attempts = &counter;
        let policy = PollPolicy::new(Duration::from_secs(30), Duration::MAX);

        poll_until_available("Kubernetes server", policy, move || async move {
            match attempts.fetch_add(1, Ordering::SeqCst) {
                0 | 1 => Err(not_ready()),
                _ => Ok(()),
            }
        })
        .await
        .unwrap();

        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_error_names_target() {
        let policy = PollPolicy::new(Duration::from_secs(15), Duration::from_secs(15));
        let err = poll_until_available("Helm tiller", policy, move || async move { Err(not_ready()) })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Helm tiller could not be contacted within 15s");
    }
}
