use chrono::{DateTime, Utc};
use tracing::debug;

use crate::config::CrawlConfig;
use crate::domain::FetchYieldState;
use crate::errors::WeirResult;
use crate::limiter;
use crate::storage::traits::YieldRepository;

/// Read-modify-write wrapper around the yield tracker and limit controller.
///
/// Callers serialize crawls of the same account: the update rule is not
/// commutative, so two interleaved `record_fetch` calls for one account
/// would smear the history.
pub struct CrawlService<Y: YieldRepository> {
    yield_repository: Y,
    config: CrawlConfig,
}

impl<Y: YieldRepository> CrawlService<Y> {
    pub fn new(yield_repository: Y, config: CrawlConfig) -> Self {
        Self {
            yield_repository,
            config,
        }
    }

    /// How many items the next crawl of `account_id` should request.
    pub fn next_limit(&self, account_id: &str) -> WeirResult<u32> {
        let state = self.yield_repository.get(account_id)?;
        Ok(limiter::next_limit(state.as_ref(), &self.config))
    }

    /// Fold one crawl outcome into the account's yield history and persist it.
    pub fn record_fetch(
        &self,
        account_id: &str,
        requested_count: u32,
        new_count: u32,
        now: DateTime<Utc>,
    ) -> WeirResult<FetchYieldState> {
        let prev = self.yield_repository.get(account_id)?;
        let state = FetchYieldState::update(
            prev.as_ref(),
            account_id,
            requested_count,
            new_count,
            now,
            self.config.smoothing_alpha,
        );

        self.yield_repository.upsert(&state)?;
        debug!(
            account_id,
            requested_count,
            new_count,
            avg_new_rate = state.avg_new_rate,
            consecutive_empty_fetches = state.consecutive_empty_fetches,
            "recorded crawl outcome"
        );

        Ok(state)
    }
}
