use crate::{SavecastError, ServiceResult};
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue},
    Client, Response,
};
use serde::Serialize;
use std::time::Duration;

/// Build an HTTP client whose requests give up after `timeout`.
pub fn build_client(timeout: Duration) -> ServiceResult<Client> {
    Ok(Client::builder().timeout(timeout).build()?)
}

/// Create a JSON POST request and return the raw response.
/// Status codes are left to the caller.
pub async fn post_json<T: Serialize + ?Sized>(
    client: &Client,
    url: &str,
    data: &T,
    headers: HeaderMap,
) -> ServiceResult<Response> {
    Ok(client.post(url).headers(headers).json(data).send().await?)
}

/// Create a form-encoded POST request and return the raw response.
/// Status codes are left to the caller.
pub async fn post_form<T: Serialize + ?Sized>(
    client: &Client,
    url: &str,
    data: &T,
    headers: HeaderMap,
) -> ServiceResult<Response> {
    Ok(client.post(url).headers(headers).form(data).send().await?)
}

/// Insert a header, rejecting values that cannot travel in HTTP.
/// `what` names the value in the error without echoing it, since headers
/// here usually carry credentials.
pub fn insert_header(
    headers: &mut HeaderMap,
    name: &'static str,
    value: &str,
    what: &str,
) -> ServiceResult<()> {
    let value = HeaderValue::from_str(value)
        .map_err(|error| SavecastError::InvalidInput(format!("Invalid {what}: {error}")))?;
    headers.insert(HeaderName::from_static(name), value);
    Ok(())
}

/// Read the body of a failed response for error reporting.
pub async fn error_text(response: Response) -> String {
    response.text().await.unwrap_or_default()
}
