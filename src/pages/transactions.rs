use std::fmt;
use std::str::FromStr;

use crate::api::ApiClient;
use crate::models::{Payment, Transaction};
use crate::notify::Toaster;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeTone {
    Neutral,
    Secondary,
    Info,
    Success,
    Warning,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub label: String,
    pub tone: BadgeTone,
}

impl Badge {
    fn new(label: impl Into<String>, tone: BadgeTone) -> Self {
        Self {
            label: label.into(),
            tone,
        }
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.label)
    }
}

/// Order status badge. Unknown statuses show verbatim on a neutral badge.
pub fn order_status_badge(status: &str) -> Badge {
    match status {
        "pending" => Badge::new("Pending", BadgeTone::Neutral),
        "processing" => Badge::new("Processing", BadgeTone::Secondary),
        "shipped" => Badge::new("Shipped", BadgeTone::Info),
        "delivered" => Badge::new("Delivered", BadgeTone::Success),
        "cancelled" => Badge::new("Cancelled", BadgeTone::Danger),
        other => Badge::new(other, BadgeTone::Neutral),
    }
}

/// Payment status badge. Unknown statuses show verbatim on a neutral badge.
pub fn payment_status_badge(status: &str) -> Badge {
    match status {
        "pending" => Badge::new("Pending", BadgeTone::Neutral),
        "success" => Badge::new("Success", BadgeTone::Success),
        "failure" => Badge::new("Failed", BadgeTone::Danger),
        "challenge" => Badge::new("Challenge", BadgeTone::Warning),
        other => Badge::new(other, BadgeTone::Neutral),
    }
}

/// Payment badge on the order list, where an order without payment reads "Pending".
pub fn list_payment_badge(payment: Option<&Payment>) -> Badge {
    payment
        .map(|p| payment_status_badge(&p.status))
        .unwrap_or_else(|| Badge::new("Pending", BadgeTone::Neutral))
}

/// Payment badge in the detail view, where an order without payment reads "Not Paid".
pub fn detail_payment_badge(payment: Option<&Payment>) -> Badge {
    payment
        .map(|p| payment_status_badge(&p.status))
        .unwrap_or_else(|| Badge::new("Not Paid", BadgeTone::Neutral))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusTab {
    #[default]
    All,
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl StatusTab {
    pub const ALL: [StatusTab; 6] = [
        StatusTab::All,
        StatusTab::Pending,
        StatusTab::Processing,
        StatusTab::Shipped,
        StatusTab::Delivered,
        StatusTab::Cancelled,
    ];

    pub fn value(self) -> &'static str {
        match self {
            StatusTab::All => "all",
            StatusTab::Pending => "pending",
            StatusTab::Processing => "processing",
            StatusTab::Shipped => "shipped",
            StatusTab::Delivered => "delivered",
            StatusTab::Cancelled => "cancelled",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusTab::All => "All Orders",
            StatusTab::Pending => "Pending",
            StatusTab::Processing => "Processing",
            StatusTab::Shipped => "Shipped",
            StatusTab::Delivered => "Delivered",
            StatusTab::Cancelled => "Cancelled",
        }
    }

    fn matches(self, transaction: &Transaction) -> bool {
        self == StatusTab::All || transaction.status == self.value()
    }
}

impl FromStr for StatusTab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().to_lowercase();
        StatusTab::ALL
            .into_iter()
            .find(|tab| tab.value() == value)
            .ok_or_else(|| {
                format!(
                    "Invalid status '{}'. Use all, pending, processing, shipped, delivered or cancelled",
                    s
                )
            })
    }
}

pub struct TransactionsPage {
    api: ApiClient,
    pub transactions: Vec<Transaction>,
    pub loading: bool,
    pub error: Option<String>,
    pub tab: StatusTab,
    pub selected: Option<Transaction>,
    /// Independent of `loading`: the list stays usable while a detail loads.
    pub detail_loading: bool,
    pub toasts: Toaster,
}

impl TransactionsPage {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            transactions: Vec::new(),
            loading: true,
            error: None,
            tab: StatusTab::All,
            selected: None,
            detail_loading: false,
            toasts: Toaster::default(),
        }
    }

    pub async fn mount(&mut self) {
        self.fetch_transactions().await;
    }

    pub async fn fetch_transactions(&mut self) {
        self.loading = true;
        self.error = None;

        match self.api.list_transactions().await {
            Ok(transactions) => self.transactions = transactions,
            Err(e) => {
                tracing::error!("Error fetching transactions: {}", e);
                self.error =
                    Some("Failed to load transactions. Please try again later.".to_string());
            }
        }

        self.loading = false;
    }

    pub fn visible_transactions(&self) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|t| self.tab.matches(t))
            .collect()
    }

    /// Opens the detail dialog, fetching the transaction afresh.
    pub async fn open_detail(&mut self, id: i64) {
        self.detail_loading = true;

        match self.api.get_transaction(id).await {
            Ok(transaction) => self.selected = Some(transaction),
            Err(e) => {
                tracing::warn!("Loading transaction {} failed: {}", id, e);
                self.toasts.error(
                    "Error",
                    Some(e.user_message("Failed to load transaction details")),
                );
            }
        }

        self.detail_loading = false;
    }

    pub fn close_detail(&mut self) {
        self.selected = None;
    }
}
