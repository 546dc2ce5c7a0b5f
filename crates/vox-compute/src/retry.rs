//! Retry logic with exponential backoff for VoxCLOUD HTTP calls.
//!
//! Retries only on transient transport errors (connection failures,
//! timeouts). Non-retryable outcomes — any response the server actually
//! produced, including 4xx and 5xx — are handed back immediately; the
//! caller inspects the status code.

use std::time::Duration;

/// Maximum number of retry attempts after the initial request.
const MAX_RETRIES: u32 = 3;

/// Base delay before the first retry; doubles each attempt.
const BASE_DELAY_MS: u64 = 200;

/// Backoff delay after the given zero-based failed attempt.
fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_millis(BASE_DELAY_MS << attempt)
}

/// Send an HTTP request with exponential backoff retry on transport
/// errors.
///
/// The closure `f` builds and sends a fresh request each call; it is
/// invoked up to `MAX_RETRIES + 1` times with delays of 200ms, 400ms
/// and 800ms between attempts. Only [`reqwest::Error`] transport
/// failures trigger a retry; the last attempt's error is what the
/// caller sees.
pub(crate) async fn retry_send<F, Fut>(f: F) -> Result<reqwest::Response, reqwest::Error>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<reqwest::Response, reqwest::Error>>,
{
    let mut attempt = 0;
    loop {
        match f().await {
            Ok(resp) => return Ok(resp),
            Err(e) if attempt < MAX_RETRIES => {
                let delay = backoff_delay(attempt);
                tracing::warn!(
                    attempt = attempt + 1,
                    max_retries = MAX_RETRIES,
                    "VoxCLOUD request failed, retrying in {delay:?}: {e}"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn probe_client() -> reqwest::Client {
        reqwest::Client::builder()
            .timeout(Duration::from_millis(200))
            .build()
            .unwrap()
    }

    #[test]
    fn backoff_doubles_per_attempt() {
        assert_eq!(backoff_delay(0), Duration::from_millis(200));
        assert_eq!(backoff_delay(1), Duration::from_millis(400));
        assert_eq!(backoff_delay(2), Duration::from_millis(800));
    }

    #[tokio::test]
    async fn retry_exhausts_all_attempts_on_transport_failure() {
        let call_count = Arc::new(AtomicU32::new(0));
        let cc = call_count.clone();

        let result = retry_send(|| {
            let cc = cc.clone();
            async move {
                cc.fetch_add(1, Ordering::SeqCst);
                // Request to a guaranteed-closed port → connection refused.
                probe_client().get("http://127.0.0.1:1/").send().await
            }
        })
        .await;

        assert!(result.is_err(), "request to closed port must fail");
        assert_eq!(
            call_count.load(Ordering::SeqCst),
            MAX_RETRIES + 1,
            "should exhaust all retry attempts"
        );
    }

    #[tokio::test]
    async fn retry_recovers_once_transport_comes_back() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/probe"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        // First attempt hits a closed port, the retry hits the live server.
        let attempts = Arc::new(AtomicU32::new(0));
        let a = attempts.clone();
        let good_url = format!("{}/probe", server.uri());

        let result = retry_send(|| {
            let a = a.clone();
            let good_url = good_url.clone();
            async move {
                let url = if a.fetch_add(1, Ordering::SeqCst) == 0 {
                    "http://127.0.0.1:1/probe".to_string()
                } else {
                    good_url
                };
                probe_client().get(&url).send().await
            }
        })
        .await;

        assert!(result.is_ok(), "retry should recover");
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn error_responses_are_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/probe"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let url = format!("{}/probe", server.uri());
        let resp = retry_send(|| probe_client().get(&url).send())
            .await
            .expect("a produced response is not a transport failure");
        assert_eq!(resp.status().as_u16(), 500);
    }
}
