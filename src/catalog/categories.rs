use regex::Regex;
use serde_json::Value;
use tracing::warn;

use super::CatalogClient;

/// Fetch the category list and normalize it to sorted, de-duplicated slugs.
/// Failure is benign: the browser degrades to the "all" filter, so any error
/// is logged and an empty list returned.
pub async fn fetch_slugs(client: &CatalogClient) -> Vec<String> {
    let url = format!("{}/categories", client.base());

    let value = match request_json(client, &url).await {
        Ok(value) => value,
        Err(err) => {
            warn!(%url, error = %err, "category list unavailable");
            return Vec::new();
        }
    };

    parse_slugs(&value)
}

async fn request_json(client: &CatalogClient, url: &str) -> Result<Value, super::CatalogError> {
    let response = client.http().get(url).send().await?;
    if !response.status().is_success() {
        return Err(super::CatalogError::Status(response.status()));
    }
    Ok(response.json::<Value>().await?)
}

/// Accepts the two shapes the API has shipped over time: plain strings, or
/// objects carrying `slug` (preferred) or a display `name`.
fn parse_slugs(value: &Value) -> Vec<String> {
    let Some(entries) = value.as_array() else {
        warn!("category payload was not an array");
        return Vec::new();
    };

    let mut slugs: Vec<String> = entries
        .iter()
        .filter_map(|entry| {
            if let Some(s) = entry.as_str() {
                return Some(s.to_string());
            }
            if let Some(slug) = entry.get("slug").and_then(Value::as_str) {
                return Some(slug.to_string());
            }
            entry.get("name").and_then(Value::as_str).map(slugify)
        })
        .filter(|s| !s.is_empty())
        .collect();

    slugs.sort();
    slugs.dedup();
    slugs
}

/// Lowercase, whitespace runs collapsed to single hyphens.
fn slugify(name: &str) -> String {
    let whitespace = Regex::new(r"\s+").expect("valid regex");
    whitespace
        .replace_all(name.trim(), "-")
        .to_lowercase()
        .to_string()
}
