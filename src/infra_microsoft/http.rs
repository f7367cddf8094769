use reqwest::Client;
use std::time::Duration;

/// HTTP request timeout in seconds, applied to every provider and directory
/// call so a wedged upstream cannot hang a request forever.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Build a pooled client. Clone is cheap, `reqwest::Client` shares its
/// connection pool internally.
pub(crate) fn pooled_client() -> reqwest::Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
}
