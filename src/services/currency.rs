//! Exchange-rate cache for the currency converter.
//!
//! Holds the most recent snapshot of units-per-USD rates. A snapshot younger
//! than the freshness window is served without touching the network; an older
//! (or missing) one triggers a refresh. A failed refresh keeps whatever
//! snapshot was there before, however stale.

use serde::Deserialize;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use crate::error::{LumenError, LumenResult};

use super::units::{Conversion, ConversionKind, ConversionRequest};

/// Default freshness window for fetched rates.
pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(3600);

/// Default budget for one rate fetch.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(3);

/// Point-in-time copy of exchange rates, relative to USD.
#[derive(Debug, Clone)]
pub struct RateSnapshot {
    pub rates: HashMap<String, f64>,
    pub fetched_at: Instant,
}

impl RateSnapshot {
    pub fn new(rates: HashMap<String, f64>) -> Self {
        Self {
            rates,
            fetched_at: Instant::now(),
        }
    }

    /// Units of `code` per one US dollar; zero or missing rates are unusable
    pub fn rate(&self, code: &str) -> Option<f64> {
        self.rates
            .get(&code.to_uppercase())
            .copied()
            .filter(|r| r.is_finite() && *r != 0.0)
    }

    /// Convert through USD: amount / rate(from) * rate(to)
    pub fn convert(&self, request: &ConversionRequest) -> Option<Conversion> {
        if !is_currency_code(&request.from) || !is_currency_code(&request.to) {
            return None;
        }

        let from_rate = self.rate(&request.from)?;
        let to_rate = self.rate(&request.to)?;

        Some(Conversion {
            kind: ConversionKind::Currency,
            from_value: request.amount,
            from_unit: request.from.clone(),
            to_value: request.amount / from_rate * to_rate,
            to_unit: request.to.clone(),
        })
    }
}

/// Three ASCII letters, e.g. "usd"
pub fn is_currency_code(token: &str) -> bool {
    token.len() == 3 && token.chars().all(|c| c.is_ascii_alphabetic())
}

#[derive(Debug, Deserialize)]
struct RatesResponse {
    rates: Option<HashMap<String, f64>>,
}

/// Process-wide exchange-rate cache.
pub struct RateCache {
    client: reqwest::Client,
    endpoint: String,
    max_age: Duration,
    timeout: Duration,
    snapshot: RwLock<Option<Arc<RateSnapshot>>>,
    /// Serializes refreshes so concurrent callers share one fetch
    refresh_gate: tokio::sync::Mutex<()>,
}

impl RateCache {
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>, max_age: Duration) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            max_age,
            timeout: DEFAULT_FETCH_TIMEOUT,
            snapshot: RwLock::new(None),
            refresh_gate: tokio::sync::Mutex::new(()),
        }
    }

    /// Give up on a fetch after `timeout`; the refresh then counts as failed
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Install a known snapshot (e.g. restored by the host at startup)
    pub fn with_snapshot(self, snapshot: RateSnapshot) -> Self {
        self.store(snapshot);
        self
    }

    /// The current snapshot without any freshness check or network access
    pub fn current(&self) -> Option<Arc<RateSnapshot>> {
        match self.snapshot.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn fresh(&self) -> Option<Arc<RateSnapshot>> {
        self.current()
            .filter(|snapshot| snapshot.fetched_at.elapsed() < self.max_age)
    }

    fn store(&self, snapshot: RateSnapshot) -> Arc<RateSnapshot> {
        let snapshot = Arc::new(snapshot);
        match self.snapshot.write() {
            Ok(mut guard) => *guard = Some(snapshot.clone()),
            Err(poisoned) => *poisoned.into_inner() = Some(snapshot.clone()),
        }
        snapshot
    }

    /// Get rates, refreshing if the snapshot is missing or stale.
    /// Falls back to the previous snapshot when the refresh fails.
    pub async fn get_rates(&self) -> Option<Arc<RateSnapshot>> {
        if let Some(snapshot) = self.fresh() {
            return Some(snapshot);
        }

        let _gate = self.refresh_gate.lock().await;

        // Another caller may have refreshed while we waited
        if let Some(snapshot) = self.fresh() {
            return Some(snapshot);
        }

        match self.fetch().await {
            Ok(snapshot) => Some(self.store(snapshot)),
            Err(e) => {
                tracing::warn!("Failed to fetch exchange rates: {}", e);
                self.current()
            }
        }
    }

    /// Force a refresh regardless of the snapshot age
    pub async fn refresh(&self) -> LumenResult<Arc<RateSnapshot>> {
        let _gate = self.refresh_gate.lock().await;
        let snapshot = self.fetch().await?;
        Ok(self.store(snapshot))
    }

    async fn fetch(&self) -> LumenResult<RateSnapshot> {
        match tokio::time::timeout(self.timeout, self.fetch_rates()).await {
            Ok(result) => result,
            Err(_) => Err(LumenError::Timeout(self.timeout.as_millis() as u64)),
        }
    }

    async fn fetch_rates(&self) -> LumenResult<RateSnapshot> {
        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await?
            .error_for_status()?;

        let body: RatesResponse = response.json().await?;
        let rates = body
            .rates
            .ok_or_else(|| LumenError::Response("missing `rates` object".to_string()))?;

        tracing::info!(count = rates.len(), "Fetched exchange rates");
        Ok(RateSnapshot::new(rates))
    }
}
