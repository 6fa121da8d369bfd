// HTTP series source - one GET against the series endpoint
use crate::application::series_source::{FetchError, SeriesSource};
use crate::domain::series::SeriesNode;
use async_trait::async_trait;

#[derive(Debug, Clone)]
pub struct HttpSeriesSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSeriesSource {
    pub fn new(url: String, accept_invalid_certs: bool) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(accept_invalid_certs)
            .build()?;

        Ok(Self { client, url })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl SeriesSource for HttpSeriesSource {
    async fn fetch_series(&self) -> Result<Vec<SeriesNode>, FetchError> {
        tracing::debug!("Fetching series from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: self.url.clone(),
                source,
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                url: self.url.clone(),
                status,
                body,
            });
        }

        // The series server answers `null` when it has nothing stored
        let nodes = response
            .json::<Option<Vec<SeriesNode>>>()
            .await
            .map_err(|source| FetchError::Body {
                url: self.url.clone(),
                source,
            })?;

        Ok(nodes.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, Json, Router};
    use serde_json::{json, Value};

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
        format!("http://{}/", addr)
    }

    #[tokio::test]
    async fn test_fetch_series() {
        let url = serve(Router::new().route(
            "/",
            get(|| async {
                Json(json!([{
                    "name": "StatSta",
                    "columns": ["time", "a", "b", "c", "snr"],
                    "values": [["2019-01-01T00:00:00Z", 1, 2, 3, 42]]
                }]))
            }),
        ))
        .await;

        let source = HttpSeriesSource::new(url, false).unwrap();
        let nodes = source.fetch_series().await.unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].name, "StatSta");
        assert_eq!(nodes[0].values[0][4], json!(42));
    }

    #[tokio::test]
    async fn test_null_body_is_empty() {
        let url = serve(Router::new().route("/", get(|| async { Json(Value::Null) }))).await;

        let source = HttpSeriesSource::new(url, false).unwrap();
        assert!(source.fetch_series().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_error_status() {
        let url = serve(Router::new().route(
            "/",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "database unavailable") }),
        ))
        .await;

        let source = HttpSeriesSource::new(url, false).unwrap();
        match source.fetch_series().await {
            Err(FetchError::Status { status, body, .. }) => {
                assert_eq!(status, 500);
                assert_eq!(body, "database unavailable");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_connection_refused() {
        let source = HttpSeriesSource::new("http://127.0.0.1:1/".to_string(), false).unwrap();
        assert!(matches!(
            source.fetch_series().await,
            Err(FetchError::Transport { .. })
        ));
    }
}
