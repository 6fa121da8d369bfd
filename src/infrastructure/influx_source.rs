// InfluxDB series source - serves the stored station statistics directly
use crate::application::series_source::{FetchError, SeriesSource};
use crate::domain::series::SeriesNode;
use async_trait::async_trait;
use serde::Deserialize;

#[derive(Debug, Clone)]
pub struct InfluxSeriesSource {
    client: reqwest::Client,
    host: String,
    token: String,
    database: String,
    query: String,
}

#[derive(Debug, Deserialize)]
struct InfluxQLResponse {
    #[serde(default)]
    results: Vec<InfluxQLResult>,
}

#[derive(Debug, Deserialize)]
struct InfluxQLResult {
    #[serde(default)]
    series: Option<Vec<SeriesNode>>,
    #[serde(default)]
    error: Option<String>,
}

impl InfluxSeriesSource {
    pub fn new(host: String, token: String, database: String, query: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            host: host.trim_end_matches('/').to_string(),
            token,
            database,
            query,
        }
    }

    fn build_query_url(&self) -> String {
        format!(
            "{}/query?db={}&q={}",
            self.host,
            urlencoding::encode(&self.database),
            urlencoding::encode(&self.query)
        )
    }

    fn first_series(response: InfluxQLResponse) -> Result<Vec<SeriesNode>, FetchError> {
        match response.results.into_iter().next() {
            Some(InfluxQLResult {
                error: Some(error), ..
            }) => Err(FetchError::Query(error)),
            Some(result) => Ok(result.series.unwrap_or_default()),
            None => Ok(Vec::new()),
        }
    }
}

#[async_trait]
impl SeriesSource for InfluxSeriesSource {
    async fn fetch_series(&self) -> Result<Vec<SeriesNode>, FetchError> {
        let url = self.build_query_url();
        tracing::debug!("Executing series query: {}", self.query);

        let mut request = self.client.get(&url).header("Accept", "application/json");
        if !self.token.is_empty() {
            request = request.header("Authorization", format!("Token {}", self.token));
        }

        let response = request.send().await.map_err(|source| FetchError::Transport {
            url: self.host.clone(),
            source,
        })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                url: self.host.clone(),
                status,
                body,
            });
        }

        let data = response
            .json::<InfluxQLResponse>()
            .await
            .map_err(|source| FetchError::Body {
                url: self.host.clone(),
                source,
            })?;

        let series = Self::first_series(data)?;
        tracing::debug!("Series query returned {} series", series.len());
        Ok(series)
    }
}
