use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::NumbersConfig;

pub const NO_FUN_FACT: &str = "No fun fact found.";

#[derive(Debug, Error)]
pub enum FunFactError {
    #[error("Fun fact lookup failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Fun fact service returned status {0}")]
    Status(reqwest::StatusCode),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NumberReport {
    pub number: i64,
    pub is_prime: bool,
    pub is_perfect: bool,
    pub properties: Vec<&'static str>,
    pub digit_sum: u64,
    pub fun_fact: String,
}

impl NumberReport {
    /// every property except the fun fact, which needs a network round trip
    pub fn classify(number: i64, fun_fact: String) -> Self {
        let mut properties = vec![];
        if is_armstrong(number) {
            properties.push("armstrong");
        }
        properties.push(if number % 2 != 0 { "odd" } else { "even" });

        NumberReport {
            number,
            is_prime: is_prime(number),
            is_perfect: is_perfect(number),
            properties,
            digit_sum: digit_sum(number),
            fun_fact,
        }
    }
}

pub fn is_prime(number: i64) -> bool {
    if number <= 1 {
        return false;
    }
    let n = number as u64;
    let mut i = 2u64;
    while i <= n / i {
        if n % i == 0 {
            return false;
        }
        i += 1;
    }
    true
}

/// sum of proper divisors equals the number; only positive numbers qualify
pub fn is_perfect(number: i64) -> bool {
    if number <= 1 {
        return false;
    }
    let n = number as u64;
    let mut sum: u128 = 1;
    let mut i = 2u64;
    while i <= n / i {
        if n % i == 0 {
            sum += i as u128;
            let pair = n / i;
            if pair != i {
                sum += pair as u128;
            }
        }
        i += 1;
    }
    sum == n as u128
}

fn digits(number: u64) -> Vec<u64> {
    number
        .to_string()
        .bytes()
        .map(|b| (b - b'0') as u64)
        .collect()
}

pub fn is_armstrong(number: i64) -> bool {
    if number < 0 {
        return false;
    }
    let digits = digits(number as u64);
    let power = digits.len() as u32;
    let sum: u128 = digits.iter().map(|&d| (d as u128).pow(power)).sum();
    sum == number as u128
}

pub fn digit_sum(number: i64) -> u64 {
    digits(number.unsigned_abs()).iter().sum()
}

#[derive(Debug, Deserialize)]
struct FunFactResponse {
    text: Option<String>,
}

/// client for the math fact lookup, degrading to a placeholder on any failure
#[derive(Debug, Clone)]
pub struct FunFactClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl FunFactClient {
    pub fn from_config(config: &NumbersConfig) -> Self {
        FunFactClient {
            client: reqwest::Client::new(),
            base_url: config.fun_fact_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    async fn lookup(&self, number: i64) -> Result<Option<String>, FunFactError> {
        let url = format!("{}/{}/math?json", self.base_url, number);
        let response = self.client.get(&url).timeout(self.timeout).send().await?;

        if !response.status().is_success() {
            return Err(FunFactError::Status(response.status()));
        }

        let fact: FunFactResponse = response.json().await?;
        Ok(fact.text)
    }

    pub async fn fun_fact(&self, number: i64) -> String {
        match self.lookup(number).await {
            Ok(Some(text)) => text,
            Ok(None) => NO_FUN_FACT.to_string(),
            Err(e) => {
                debug!("{}", e);
                NO_FUN_FACT.to_string()
            }
        }
    }
}
