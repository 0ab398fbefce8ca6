//! State and rendering of the block insights panel.
//!
//! The panel is a single immutable [`InsightsState`] record. Every change goes
//! through [`InsightsState::apply`], so the search status can never disagree
//! with the receipts it describes.
//!
//! The total number of pages is never computed: a page is assumed to have a
//! successor whenever it is full. When the receipt count is an exact multiple
//! of [`ITEMS_PER_PAGE`], the last "Next" therefore leads to an empty page.

use crate::{
    chain::Chain,
    receipt::{format_ether, TransactionReceipt},
};

pub const ITEMS_PER_PAGE: usize = 10;

pub const LOADING_MESSAGE: &str = "Loading...";
pub const NO_TRANSACTIONS_MESSAGE: &str = "No transactions found.";

/// Identifies one search. Only the result of the latest search is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchStatus {
    Idle,
    Loading,
    Loaded,
    Empty,
    Failed(String),
}

#[derive(Debug, Clone)]
pub enum Action {
    SearchStarted(RequestId),
    SearchFinished {
        request: RequestId,
        receipts: Vec<TransactionReceipt>,
    },
    SearchFailed {
        request: RequestId,
        message: String,
    },
    NextPage,
    PrevPage,
}

#[derive(Debug, Clone, Default, PartialEq)]
enum Phase {
    #[default]
    Idle,
    Searching(RequestId),
    Settled,
    Failed(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InsightsState {
    phase: Phase,
    receipts: Vec<TransactionReceipt>,
    page: usize,
    last_request: u64,
}

impl InsightsState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new search, discarding the current results.
    pub fn begin_search(self) -> (Self, RequestId) {
        let request = RequestId(self.last_request + 1);
        (self.apply(Action::SearchStarted(request)), request)
    }

    pub fn next_page(self) -> Self {
        self.apply(Action::NextPage)
    }

    pub fn prev_page(self) -> Self {
        self.apply(Action::PrevPage)
    }

    pub fn apply(self, action: Action) -> Self {
        match action {
            Action::SearchStarted(request) => Self {
                phase: Phase::Searching(request),
                receipts: Vec::new(),
                page: 0,
                last_request: request.0.max(self.last_request),
            },
            Action::SearchFinished { request, receipts } if self.is_pending(request) => Self {
                phase: Phase::Settled,
                receipts,
                page: 0,
                ..self
            },
            Action::SearchFailed { request, message } if self.is_pending(request) => Self {
                phase: Phase::Failed(message),
                receipts: Vec::new(),
                page: 0,
                ..self
            },
            Action::SearchFinished { request, .. } | Action::SearchFailed { request, .. } => {
                tracing::debug!("Dropping stale result of {request:?}");
                self
            }
            Action::NextPage if self.has_next() => Self {
                page: self.page + 1,
                ..self
            },
            Action::PrevPage if self.has_prev() => Self {
                page: self.page - 1,
                ..self
            },
            Action::NextPage | Action::PrevPage => self,
        }
    }

    fn is_pending(&self, request: RequestId) -> bool {
        self.phase == Phase::Searching(request)
    }

    pub fn status(&self) -> SearchStatus {
        match &self.phase {
            Phase::Idle => SearchStatus::Idle,
            Phase::Searching(_) => SearchStatus::Loading,
            Phase::Settled if self.receipts.is_empty() => SearchStatus::Empty,
            Phase::Settled => SearchStatus::Loaded,
            Phase::Failed(message) => SearchStatus::Failed(message.clone()),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn total(&self) -> usize {
        self.receipts.len()
    }

    pub fn receipts(&self) -> &[TransactionReceipt] {
        &self.receipts
    }

    /// Receipts of the current page.
    pub fn transactions_to_show(&self) -> &[TransactionReceipt] {
        let start = (self.page * ITEMS_PER_PAGE).min(self.receipts.len());
        let end = (start + ITEMS_PER_PAGE).min(self.receipts.len());
        &self.receipts[start..end]
    }

    pub fn has_next(&self) -> bool {
        self.phase == Phase::Settled && self.transactions_to_show().len() == ITEMS_PER_PAGE
    }

    pub fn has_prev(&self) -> bool {
        self.phase == Phase::Settled && self.page > 0
    }

    /// Message shown in place of the receipts, if any.
    pub fn status_message(&self) -> Option<String> {
        if !self.transactions_to_show().is_empty() {
            return None;
        }

        match self.status() {
            SearchStatus::Loading => Some(LOADING_MESSAGE.to_string()),
            SearchStatus::Empty => Some(NO_TRANSACTIONS_MESSAGE.to_string()),
            SearchStatus::Failed(message) => Some(format!("Search failed: {message}")),
            SearchStatus::Idle | SearchStatus::Loaded => None,
        }
    }
}

/// Renders the panel as plain text, with explorer links for `chain`.
pub fn render(state: &InsightsState, chain: Chain) -> String {
    let mut out = String::from("Block Insights\n");
    let transactions = state.transactions_to_show();

    if !transactions.is_empty() {
        out.push_str(&format!("Total transactions in block: {}\n", state.total()));
        out.push_str(&format!("Page {}\n", state.page() + 1));
    }

    for receipt in transactions {
        out.push('\n');
        out.push_str(&render_receipt(receipt, chain));
    }

    if let Some(message) = state.status_message() {
        out.push_str(&format!("{message}\n"));
    }

    let controls = [
        state.has_prev().then_some("Previous"),
        state.has_next().then_some("Next"),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>();

    if !controls.is_empty() {
        out.push_str(&format!("\n{}\n", controls.join(" | ")));
    }

    out
}

fn render_receipt(receipt: &TransactionReceipt, chain: Chain) -> String {
    let hash = &receipt.transaction_hash;
    let to = match &receipt.to {
        Some(to) => format!("{to} ({})", chain.address_url(to)),
        None => "contract creation".to_string(),
    };

    format!(
        "Transaction Hash: {hash} ({})\nGas Used: {} Eth\nFrom: {} ({})\nTo: {to}\n",
        chain.tx_url(hash),
        format_ether(receipt.gas_used),
        receipt.from,
        chain.address_url(&receipt.from),
    )
}
