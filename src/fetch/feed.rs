use std::time::Duration;

use reqwest::Client;
use tokio::time::sleep;
use tracing::warn;

use crate::error::FatalError;

const MAX_RETRIES: u32 = 3;
const RETRY_DELAY: Duration = Duration::from_secs(5);

/// Download the CSV feed body as text. Transient failures are retried with a
/// linear backoff (5s, 10s); once retries are exhausted the run aborts with a
/// `FatalError::Fetch`.
pub async fn download_feed(client: &Client, feed_url: &str) -> Result<String, FatalError> {
    let mut attempt = 0;

    loop {
        attempt += 1;

        let err = match client.get(feed_url).send().await {
            Ok(resp) => match resp.error_for_status() {
                Ok(resp) => match resp.text().await {
                    Ok(body) => return Ok(body),
                    Err(e) => e,
                },
                Err(e) => e,
            },
            Err(e) => e,
        };

        if attempt < MAX_RETRIES {
            let wait = RETRY_DELAY * attempt;
            warn!(attempt, error = %err, "feed fetch failed, retrying in {wait:?}");
            sleep(wait).await;
        } else {
            return Err(FatalError::Fetch(format!(
                "{feed_url} unreachable after {MAX_RETRIES} attempts: {err}"
            )));
        }
    }
}
