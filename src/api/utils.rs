use anyhow::{Context, Error, Result};
use reqwest::{Client, RequestBuilder, header};
use serde::de::DeserializeOwned;
use serde_json::Value;

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36";

pub async fn make_request(client: &Client, url: &str) -> Result<String> {
    send_request(client.get(url).header(header::USER_AGENT, USER_AGENT)).await
}

pub async fn send_request(request: RequestBuilder) -> Result<String> {
    let res = request.send().await?;
    let status = res.status();

    if !status.is_success() {
        let body = res.text().await.unwrap_or_default();
        return Err(Error::msg(format!("Request failed: {} {}", status, body)));
    }

    Ok(res.text().await?)
}

pub fn parse_response_array<T>(text: &str, error_msg: &str) -> Result<Vec<T>>
where
    T: DeserializeOwned,
{
    let data = serde_json::from_str::<Value>(text).with_context(|| error_msg.to_string())?;
    match data {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(idx, item)| {
                serde_json::from_value(item).with_context(|| format!("{} (row {})", error_msg, idx))
            })
            .collect(),
        _ => Err(Error::msg("Unexpected API response format: not an array")),
    }
}

pub fn parse_response_object<T>(text: &str, error_msg: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    match serde_json::from_str::<Value>(text).with_context(|| error_msg.to_string())? {
        Value::Object(obj) => serde_json::from_value(Value::Object(obj))
            .map_err(|e| Error::msg(format!("{}: {}", error_msg, e))),
        _ => Err(Error::msg("Unexpected API response format: not an object")),
    }
}
