//! HTTP Client
//!
//! Thin wrapper over `reqwest`: base URL, bearer token, status mapping.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::header::{AUTHORIZATION, ETAG, IF_MATCH};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;

/// Characters escaped inside a single path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Percent-encode an id for use as one path segment
pub fn seg(raw: impl AsRef<str>) -> String {
    utf8_percent_encode(raw.as_ref(), SEGMENT).to_string()
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, token: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => req.header(AUTHORIZATION, format!("Bearer {}", token)),
            None => req,
        }
    }

    async fn send(&self, method: &str, path: &str, req: RequestBuilder) -> Result<Response, ApiError> {
        debug!("[API] {} {}", method, path);
        let resp = self
            .authorize(req)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        debug!("[API] {} {} -> {}", method, path, status.as_u16());
        Err(ApiError::from_status(status.as_u16(), &body))
    }

    async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
        resp.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let resp = self.send("GET", path, self.http.get(self.url(path))).await?;
        Self::decode(resp).await
    }

    /// GET that also returns the response `ETag`
    pub async fn get_json_versioned<T: DeserializeOwned>(&self, path: &str) -> Result<(T, Option<String>), ApiError> {
        let resp = self.send("GET", path, self.http.get(self.url(path))).await?;
        let version = etag(&resp);
        Ok((Self::decode(resp).await?, version))
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let resp = self.send("POST", path, self.http.post(self.url(path)).json(body)).await?;
        Self::decode(resp).await
    }

    /// POST whose response body is ignored; returns the `ETag`
    pub async fn post_versioned<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Option<String>, ApiError> {
        let resp = self.send("POST", path, self.http.post(self.url(path)).json(body)).await?;
        Ok(etag(&resp))
    }

    pub async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let resp = self.send("PUT", path, self.http.put(self.url(path)).json(body)).await?;
        Self::decode(resp).await
    }

    /// PUT with an optional `If-Match`; response body is ignored
    pub async fn put_versioned<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        if_match: Option<&str>,
    ) -> Result<Option<String>, ApiError> {
        let req = with_if_match(self.http.put(self.url(path)).json(body), if_match);
        let resp = self.send("PUT", path, req).await?;
        Ok(etag(&resp))
    }

    pub async fn delete(&self, path: &str, if_match: Option<&str>) -> Result<Option<String>, ApiError> {
        let req = with_if_match(self.http.delete(self.url(path)), if_match);
        let resp = self.send("DELETE", path, req).await?;
        Ok(etag(&resp))
    }
}

fn with_if_match(req: RequestBuilder, if_match: Option<&str>) -> RequestBuilder {
    match if_match {
        Some(version) => req.header(IF_MATCH, version),
        None => req,
    }
}

fn etag(resp: &Response) -> Option<String> {
    resp.headers()
        .get(ETAG)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_encoding() {
        assert_eq!(seg("42"), "42");
        assert_eq!(seg("a/b c"), "a%2Fb%20c");
        assert_eq!(seg("x?y#z"), "x%3Fy%23z");
    }

    #[test]
    fn test_url_joins_base() {
        let client = ApiClient::new("https://oj.example.com/api/", None);
        assert_eq!(client.url("/problems/"), "https://oj.example.com/api/problems/");
        assert!(!client.is_authenticated());
    }
}
