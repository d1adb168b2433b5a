use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-account crawl yield history.
///
/// One row per tracked account, created on its first crawl and updated once
/// per crawl cycle. `avg_new_rate` is an exponentially smoothed ratio of new
/// items to returned items and stays in [0, 1] for consistent inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchYieldState {
    pub account_id: String,
    pub last_fetch_at: DateTime<Utc>,
    pub last_requested_count: u32,
    pub last_new_count: u32,
    pub total_fetches: u64,
    pub avg_new_rate: f64,
    pub consecutive_empty_fetches: u32,
}

impl FetchYieldState {
    /// Fold one crawl observation into the account's yield history.
    ///
    /// Total function: seeds fresh state when `prev` is `None`, otherwise
    /// smooths the new-item rate with `alpha`. A crawl that returned nothing
    /// (`requested_count == 0`) contributes no rate observation; the empty
    /// streak is driven by `new_count` alone.
    pub fn update(
        prev: Option<&FetchYieldState>,
        account_id: &str,
        requested_count: u32,
        new_count: u32,
        now: DateTime<Utc>,
        alpha: f64,
    ) -> FetchYieldState {
        let Some(prev) = prev else {
            return FetchYieldState {
                account_id: account_id.to_string(),
                last_fetch_at: now,
                last_requested_count: requested_count,
                last_new_count: new_count,
                total_fetches: 1,
                avg_new_rate: if requested_count > 0 {
                    f64::from(new_count) / f64::from(requested_count)
                } else {
                    0.0
                },
                consecutive_empty_fetches: if new_count > 0 { 0 } else { 1 },
            };
        };

        let avg_new_rate = if requested_count > 0 {
            let current_rate = f64::from(new_count) / f64::from(requested_count);
            alpha * current_rate + (1.0 - alpha) * prev.avg_new_rate
        } else {
            prev.avg_new_rate
        };

        FetchYieldState {
            account_id: prev.account_id.clone(),
            last_fetch_at: now,
            last_requested_count: requested_count,
            last_new_count: new_count,
            total_fetches: prev.total_fetches + 1,
            avg_new_rate,
            consecutive_empty_fetches: if new_count == 0 {
                prev.consecutive_empty_fetches + 1
            } else {
                0
            },
        }
    }
}
