use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde::Deserialize;

use crate::config::BanxicoConfig;
use crate::domain::catalog::ExchangeRate;
use crate::domain::errors::DomainError;
use crate::domain::ports::ExchangeRateSource;

#[derive(Debug, Deserialize)]
struct SieResponse {
    bmx: SieBody,
}

#[derive(Debug, Deserialize)]
struct SieBody {
    #[serde(default)]
    series: Vec<SieSeries>,
}

#[derive(Debug, Deserialize)]
struct SieSeries {
    #[serde(rename = "idSerie", default)]
    id: String,
    #[serde(rename = "titulo", default)]
    title: String,
    #[serde(rename = "datos", default)]
    data: Vec<SieDatum>,
}

#[derive(Debug, Deserialize)]
struct SieDatum {
    #[serde(rename = "fecha")]
    date: String,
    #[serde(rename = "dato")]
    value: String,
}

/// Latest FIX exchange rate from Banxico's SIE API.
#[derive(Clone)]
pub struct BanxicoClient {
    http: reqwest::Client,
    config: BanxicoConfig,
}

impl BanxicoClient {
    pub fn new(config: BanxicoConfig, http: reqwest::Client) -> Self {
        Self { http, config }
    }
}

#[async_trait]
impl ExchangeRateSource for BanxicoClient {
    async fn latest(&self) -> Result<ExchangeRate, DomainError> {
        let url = format!(
            "{}/series/{}/datos/oportuno",
            self.config.base_url.trim_end_matches('/'),
            self.config.series
        );

        let mut request = self.http.get(url).header(ACCEPT, "application/json");
        if let Some(token) = &self.config.token {
            request = request.header("Bmx-Token", token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| DomainError::Unavailable(e.to_string()))?
            .error_for_status()
            .map_err(|e| DomainError::Upstream(e.to_string()))?;

        let body: SieResponse = response
            .json()
            .await
            .map_err(|e| DomainError::Upstream(e.to_string()))?;

        let series = body
            .bmx
            .series
            .into_iter()
            .next()
            .ok_or(DomainError::NotFound("Exchange rate data"))?;
        let latest = series
            .data
            .into_iter()
            .next()
            .ok_or(DomainError::NotFound("Exchange rate data"))?;

        Ok(ExchangeRate {
            series_id: series.id,
            title: series.title,
            date: latest.date,
            value: latest.value,
        })
    }
}
