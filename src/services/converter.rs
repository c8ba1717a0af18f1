//! Unit, temperature and currency conversion.

use std::sync::Arc;

use super::currency::{is_currency_code, RateCache};
use super::units::{self, Conversion};

/// Evaluates conversion queries; currency pairs go through the shared
/// [`RateCache`].
#[derive(Clone)]
pub struct Converter {
    rates: Arc<RateCache>,
}

impl Converter {
    pub fn new(rates: Arc<RateCache>) -> Self {
        Self { rates }
    }

    pub fn rate_cache(&self) -> &Arc<RateCache> {
        &self.rates
    }

    /// Try temperature, then the unit table, then currency.
    /// Returns None if the query is not a conversion or no branch applies.
    pub async fn convert(&self, query: &str) -> Option<Conversion> {
        let request = units::parse(query)?;

        if let Some(conversion) = units::convert(&request) {
            return Some(conversion);
        }

        // Skip the rate lookup entirely for tokens that can't be currencies
        if !is_currency_code(&request.from) || !is_currency_code(&request.to) {
            return None;
        }

        let snapshot = self.rates.get_rates().await?;
        snapshot.convert(&request)
    }
}
