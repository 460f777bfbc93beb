use reqwest::Method;
use std::fmt;
use std::str::FromStr;

use super::ApiClient;
use crate::error::Result;
use crate::models::TopCustomersResponse;

/// Reporting windows accepted by `/api/user/toptransactions`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    SevenDays,
    FourteenDays,
    #[default]
    OneMonth,
    ThreeMonths,
    SixMonths,
    OneYear,
}

impl Period {
    pub const ALL: [Period; 6] = [
        Period::SevenDays,
        Period::FourteenDays,
        Period::OneMonth,
        Period::ThreeMonths,
        Period::SixMonths,
        Period::OneYear,
    ];

    /// The value the API expects, e.g. `"1 month"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Period::SevenDays => "7 days",
            Period::FourteenDays => "14 days",
            Period::OneMonth => "1 month",
            Period::ThreeMonths => "3 months",
            Period::SixMonths => "6 months",
            Period::OneYear => "1 year",
        }
    }

    pub fn label(self) -> String {
        format!("Last {}", self.as_str())
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = String;

    /// Accepts the API form (`"3 months"`) and a compact form (`3m`, `7d`, `1y`).
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        let period = match normalized.as_str() {
            "7 days" | "7d" => Period::SevenDays,
            "14 days" | "14d" => Period::FourteenDays,
            "1 month" | "1m" => Period::OneMonth,
            "3 months" | "3m" => Period::ThreeMonths,
            "6 months" | "6m" => Period::SixMonths,
            "1 year" | "1y" => Period::OneYear,
            _ => {
                return Err(format!(
                    "Invalid period '{}'. Use one of: 7 days, 14 days, 1 month, 3 months, 6 months, 1 year",
                    s
                ))
            }
        };
        Ok(period)
    }
}

impl ApiClient {
    /// `GET /api/user/toptransactions?period=...`. Ranking order is the server's.
    pub async fn top_customers(&self, period: Period) -> Result<TopCustomersResponse> {
        let mut url = self.endpoint("/api/user/toptransactions")?;
        url.query_pairs_mut().append_pair("period", period.as_str());

        self.send_json(self.request(Method::GET, url)).await
    }
}
