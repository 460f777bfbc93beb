use crate::api::{ApiClient, Period};
use crate::models::{Money, TopCustomer};

/// Display totals over the customers the server returned.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TopBuyersSummary {
    pub total_customers: usize,
    pub total_orders: i64,
    pub total_revenue: Money,
}

pub struct TopBuyersPage {
    api: ApiClient,
    pub period: Period,
    pub customers: Vec<TopCustomer>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl TopBuyersPage {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            period: Period::default(),
            customers: Vec::new(),
            is_loading: true,
            error: None,
        }
    }

    pub async fn mount(&mut self) {
        self.fetch().await;
    }

    /// Changing the period always re-fetches.
    pub async fn set_period(&mut self, period: Period) {
        self.period = period;
        self.fetch().await;
    }

    pub async fn fetch(&mut self) {
        self.is_loading = true;
        self.error = None;

        match self.api.top_customers(self.period).await {
            Ok(response) => self.customers = response.customers,
            Err(e) => {
                tracing::error!("Error fetching top customers: {}", e);
                self.error =
                    Some("Failed to load top customers data. Please try again later.".to_string());
            }
        }

        self.is_loading = false;
    }

    pub fn summary(&self) -> TopBuyersSummary {
        summarize(&self.customers)
    }

    pub fn description(&self) -> String {
        format!(
            "Showing the top {} customers in the last {}",
            self.customers.len(),
            self.period
        )
    }
}

pub fn summarize(customers: &[TopCustomer]) -> TopBuyersSummary {
    TopBuyersSummary {
        total_customers: customers.len(),
        total_orders: customers.iter().map(|c| c.order_count).sum(),
        total_revenue: Money(customers.iter().map(|c| c.total_spent.value()).sum()),
    }
}

/// Rank column text; the top spender gets a marker.
pub fn rank_label(index: usize) -> String {
    if index == 0 {
        format!("▲ #{}", index + 1)
    } else {
        format!("#{}", index + 1)
    }
}
