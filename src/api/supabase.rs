use anyhow::{Context, Result};
use reqwest::{Client, RequestBuilder, header};

use crate::models::AssetRecord;

use super::{
    supabase_dto::{SupabasePasswordGrantDto, SupabaseSessionDto},
    utils::{parse_response_array, parse_response_object, send_request},
};

const ASSETS_TABLE: &str = "assets";

fn with_keys(request: RequestBuilder, anon_key: &str, access_token: Option<&str>) -> RequestBuilder {
    let bearer = access_token.unwrap_or(anon_key);
    request
        .header("apikey", anon_key)
        .header(header::AUTHORIZATION, format!("Bearer {}", bearer))
}

pub async fn sign_in_with_password(
    email: &str,
    password: &str,
    client: &Client,
    base_url: &str,
    anon_key: &str,
) -> Result<SupabaseSessionDto> {
    let url = format!("{}/auth/v1/token?grant_type=password", base_url);
    let request = client
        .post(&url)
        .json(&SupabasePasswordGrantDto { email, password });
    let res = send_request(with_keys(request, anon_key, None))
        .await
        .with_context(|| format!("Supabase sign-in ({})", email))?;

    parse_response_object::<SupabaseSessionDto>(
        &res,
        &format!("Supabase sign-in ({}): unexpected session payload", email),
    )
}

pub async fn sign_out(
    access_token: &str,
    client: &Client,
    base_url: &str,
    anon_key: &str,
) -> Result<()> {
    let url = format!("{}/auth/v1/logout", base_url);
    send_request(with_keys(client.post(&url), anon_key, Some(access_token)))
        .await
        .with_context(|| "Supabase sign-out")?;
    Ok(())
}

/// All rows visible to the token's user, largest amount first.
pub async fn fetch_assets(
    access_token: &str,
    client: &Client,
    base_url: &str,
    anon_key: &str,
) -> Result<Vec<AssetRecord>> {
    let url = format!(
        "{}/rest/v1/{}?select=*&order=amount.desc",
        base_url, ASSETS_TABLE
    );
    let res = send_request(with_keys(client.get(&url), anon_key, Some(access_token)))
        .await
        .with_context(|| format!("Supabase ({})", ASSETS_TABLE))?;

    parse_response_array::<AssetRecord>(
        &res,
        &format!("Supabase ({}): failed to parse rows", ASSETS_TABLE),
    )
}
