//! AWS Signature Version 4
//!
//! Adds `x-amz-date`, `x-amz-content-sha256` and `authorization` headers to a
//! `reqwest::Request`. `host` is signed from the URL; the client sends it.
//! Query strings are not used by any call here, so the canonical query string
//! is always empty.

use hmac::{Hmac, Mac};
use reqwest::Request;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use sha2::{Digest, Sha256};

use super::RemoteError;
use crate::config::Credentials;

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "AWS4-HMAC-SHA256";
const X_AMZ_DATE: &str = "x-amz-date";
const X_AMZ_CONTENT_SHA256: &str = "x-amz-content-sha256";

/// Who signs, where, and when
pub struct SigningParams<'a> {
    pub credentials: &'a Credentials,
    pub region: &'a str,
    pub service: &'a str,
    /// Unix time (ms)
    pub timestamp_ms: f64,
}

/// Sign `request` in place
pub fn sign(request: &mut Request, params: &SigningParams<'_>) -> Result<(), RemoteError> {
    if params.credentials.is_empty() {
        return Err(RemoteError::MissingCredentials);
    }

    let (amz_date, date) = format_timestamp(params.timestamp_ms)?;
    let payload = request.body().and_then(|b| b.as_bytes()).unwrap_or_default();
    let payload_hash = hex::encode(Sha256::digest(payload));
    let host = request
        .url()
        .host_str()
        .ok_or_else(|| RemoteError::InvalidUrl(format!("no host in {}", request.url())))?
        .to_string();

    let headers = request.headers_mut();
    headers.remove(AUTHORIZATION);
    headers.insert(X_AMZ_DATE, header_value(&amz_date)?);
    headers.insert(X_AMZ_CONTENT_SHA256, header_value(&payload_hash)?);

    let (canonical_headers, signed_headers) = canonical_headers(&host, request.headers())?;
    let canonical_request = format!(
        "{}\n{}\n\n{}\n{}\n{}",
        request.method().as_str(),
        request.url().path(),
        canonical_headers,
        signed_headers,
        payload_hash
    );

    let scope = format!("{}/{}/{}/aws4_request", date, params.region, params.service);
    let string_to_sign = format!(
        "{}\n{}\n{}\n{}",
        ALGORITHM,
        amz_date,
        scope,
        hex::encode(Sha256::digest(canonical_request.as_bytes()))
    );

    let key = signing_key(
        &params.credentials.secret_access_key,
        &date,
        params.region,
        params.service,
    )?;
    let signature = hex::encode(hmac(&key, string_to_sign.as_bytes())?);

    let authorization = format!(
        "{} Credential={}/{}, SignedHeaders={}, Signature={}",
        ALGORITHM, params.credentials.access_key_id, scope, signed_headers, signature
    );
    request
        .headers_mut()
        .insert(AUTHORIZATION, header_value(&authorization)?);
    Ok(())
}

/// Derive the per-day, per-region, per-service signing key
pub fn signing_key(
    secret: &str,
    date: &str,
    region: &str,
    service: &str,
) -> Result<Vec<u8>, RemoteError> {
    let k_date = hmac(format!("AWS4{}", secret).as_bytes(), date.as_bytes())?;
    let k_region = hmac(&k_date, region.as_bytes())?;
    let k_service = hmac(&k_region, service.as_bytes())?;
    hmac(&k_service, b"aws4_request")
}

/// Percent-encode a path per the SigV4 rules (unreserved characters kept)
pub fn uri_encode(input: &str, encode_slash: bool) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            b'/' if !encode_slash => out.push('/'),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

fn hmac(key: &[u8], data: &[u8]) -> Result<Vec<u8>, RemoteError> {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(key)
        .map_err(|e| RemoteError::Signing(e.to_string()))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// `(20240102T030405Z, 20240102)`
fn format_timestamp(timestamp_ms: f64) -> Result<(String, String), RemoteError> {
    let time = chrono::DateTime::from_timestamp_millis(timestamp_ms as i64)
        .ok_or_else(|| RemoteError::Signing(format!("timestamp out of range: {}", timestamp_ms)))?;
    Ok((
        time.format("%Y%m%dT%H%M%SZ").to_string(),
        time.format("%Y%m%d").to_string(),
    ))
}

fn header_value(value: &str) -> Result<HeaderValue, RemoteError> {
    HeaderValue::from_str(value).map_err(|e| RemoteError::Signing(e.to_string()))
}

/// Sorted `name:value\n` lines (names are already lowercase) plus the
/// `;`-joined name list. `host` comes from the URL.
fn canonical_headers(host: &str, headers: &HeaderMap) -> Result<(String, String), RemoteError> {
    let mut lines = vec![("host".to_string(), host.to_string())];
    for (name, value) in headers {
        let value = value
            .to_str()
            .map_err(|e| RemoteError::Signing(format!("{}: {}", name, e)))?;
        lines.push((name.as_str().to_string(), value.trim().to_string()));
    }
    lines.sort();

    let canonical = lines
        .iter()
        .map(|(n, v)| format!("{}:{}\n", n, v))
        .collect::<String>();
    let signed = lines
        .iter()
        .map(|(n, _)| n.as_str())
        .collect::<Vec<_>>()
        .join(";");
    Ok((canonical, signed))
}
