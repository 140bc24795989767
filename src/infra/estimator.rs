//! Thin asynchronous client for the price estimation service.
//!
//! - Catalog lookups (`/marques`, `/modeles`) report failures as [`CatalogError`];
//!   callers absorb them with fallbacks.
//! - `/predict` failures are normalized into [`PredictionError`], whose
//!   [`PredictionError::user_message`] is what the form displays.

use std::time::Duration;

use log::{debug, info, warn};
use reqwest::{Client, StatusCode, Url};
use serde::{de::DeserializeOwned, Deserialize};
use thiserror::Error;

use crate::domain::{PredictionResult, VehicleQuery};

const DEFAULT_BASE_URL: &str = "https://flaskprediction.fly.dev/";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);
const USER_AGENT: &str = concat!("car-price-estimator/", env!("CARGO_PKG_VERSION"));

pub const GENERIC_PREDICTION_FAILURE: &str = "Erreur lors de la prédiction";
pub const TRANSPORT_FAILURE: &str =
    "Impossible de joindre le service d'estimation. Vérifiez votre connexion et réessayez.";

#[derive(Debug, Error)]
pub enum EstimatorClientError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

/// The brand or model list could not be fetched.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("catalog request failed: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum PredictionError {
    /// The service answered with an error (or an unusable body).
    #[error("service error: {0}")]
    Service(String),
    /// The service could not be reached: timeout, DNS, refused connection, broken body.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl PredictionError {
    pub fn user_message(&self) -> String {
        match self {
            PredictionError::Service(message) => message.clone(),
            PredictionError::Transport(_) | PredictionError::InvalidUrl(_) => {
                TRANSPORT_FAILURE.to_string()
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct BrandsReply {
    marques: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ModelsReply {
    modeles: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct PriceReply {
    #[serde(default)]
    price: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ErrorReply {
    #[serde(default)]
    error: Option<String>,
}

#[derive(Clone)]
pub struct EstimatorClient {
    http: Client,
    base_url: Url,
    timeout: Duration,
}

impl EstimatorClient {
    pub fn new() -> Result<Self, EstimatorClientError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base: &str) -> Result<Self, EstimatorClientError> {
        let base_url = Url::parse(base)?;
        let http = build_http(DEFAULT_TIMEOUT)?;
        Ok(Self {
            http,
            base_url,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, EstimatorClientError> {
        self.http = build_http(timeout)?;
        self.timeout = timeout;
        Ok(self)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn brands(&self) -> Result<Vec<String>, CatalogError> {
        let url = self.url("marques")?;
        debug!("Requesting brands from {url}");
        let reply: BrandsReply = self.fetch_json(self.http.get(url)).await?;
        Ok(reply.marques)
    }

    pub async fn models(&self, brand: &str) -> Result<Vec<String>, CatalogError> {
        let mut url = self.url("modeles")?;
        url.query_pairs_mut().append_pair("marque", brand);
        debug!("Requesting models from {url}");
        let reply: ModelsReply = self.fetch_json(self.http.get(url)).await?;
        Ok(reply.modeles)
    }

    /// One round trip to `/predict`. Never retries.
    pub async fn predict(&self, query: &VehicleQuery) -> Result<PredictionResult, PredictionError> {
        let url = self.url("predict")?;
        info!(
            "Requesting estimate for {} {} ({})",
            query.brand, query.model, query.year
        );

        let response = self.http.post(url).json(query).send().await?;
        let status = response.status();
        let body = response.text().await?;
        let outcome = interpret_prediction(status, &body, query);
        if let Err(err) = &outcome {
            warn!("Estimate request failed with status {status}: {err}");
        }
        outcome
    }

    async fn fetch_json<T>(&self, builder: reqwest::RequestBuilder) -> Result<T, CatalogError>
    where
        T: DeserializeOwned,
    {
        let response = builder.send().await?.error_for_status()?;
        Ok(response.json().await?)
    }

    fn url(&self, path: &str) -> Result<Url, url::ParseError> {
        self.base_url.join(path)
    }
}

fn build_http(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
}

/// Maps a `/predict` reply onto the result or a service error.
fn interpret_prediction(
    status: StatusCode,
    body: &str,
    query: &VehicleQuery,
) -> Result<PredictionResult, PredictionError> {
    if !status.is_success() {
        let message = serde_json::from_str::<ErrorReply>(body)
            .ok()
            .and_then(|reply| reply.error)
            .map(|message| message.trim().to_string())
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| GENERIC_PREDICTION_FAILURE.to_string());
        return Err(PredictionError::Service(message));
    }

    let price = serde_json::from_str::<PriceReply>(body)
        .ok()
        .and_then(|reply| reply.price)
        .filter(|price| price.is_finite() && *price >= 0.0)
        .ok_or_else(|| PredictionError::Service(GENERIC_PREDICTION_FAILURE.to_string()))?;

    Ok(PredictionResult {
        price: price.round() as u64,
        query: query.clone(),
    })
}
