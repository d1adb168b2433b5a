use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::domain::{Item, RankedItem, SortMode, DEFAULT_PRIORITY};
use crate::errors::WeirResult;
use crate::scoring::{KeywordScorer, RelevanceScorer};
use crate::storage::traits::{
    AccountRegistry, FilterRuleRepository, ItemRepository, ScopeRepository,
};

/// Parameters of one feed request.
#[derive(Debug, Clone)]
pub struct FeedRequest {
    pub sort: SortMode,
    pub keywords: Option<Vec<String>>,
    pub since: Option<DateTime<Utc>>,
    pub limit: usize,
}

/// The curation pipeline: scope -> filter -> score -> sort -> cap.
pub struct CurationService<S, F, I, A>
where
    S: ScopeRepository,
    F: FilterRuleRepository,
    I: ItemRepository,
    A: AccountRegistry,
{
    scope_repository: S,
    rule_repository: F,
    item_repository: I,
    registry: A,
    scorer: RelevanceScorer,
}

impl<S, F, I, A> CurationService<S, F, I, A>
where
    S: ScopeRepository,
    F: FilterRuleRepository,
    I: ItemRepository,
    A: AccountRegistry,
{
    pub fn new(
        scope_repository: S,
        rule_repository: F,
        item_repository: I,
        registry: A,
        scorer: RelevanceScorer,
    ) -> Self {
        Self {
            scope_repository,
            rule_repository,
            item_repository,
            registry,
            scorer,
        }
    }

    /// Build a consumer's feed.
    ///
    /// Output is at most `request.limit` items, all authored by accounts in
    /// the consumer's scope, none matching a filter rule, ordered per the
    /// requested mode's tie-break policy.
    pub fn curate(&self, consumer_id: &str, request: &FeedRequest) -> WeirResult<Vec<RankedItem>> {
        self.ensure_scope(consumer_id)?;

        let scope = self.scope_repository.get_scope(consumer_id)?;
        if scope.is_empty() {
            return Ok(Vec::new());
        }

        let author_ids: Vec<String> = scope.iter().map(|e| e.account_id.clone()).collect();
        let mut candidates = self
            .item_repository
            .list_by_authors(&author_ids, request.since)?;
        let candidate_count = candidates.len();

        let rules = self.rule_repository.get_rules(consumer_id)?;
        candidates.retain(|item| !rules.iter().any(|rule| rule.matches(item)));
        debug!(
            consumer_id,
            candidates = candidate_count,
            surviving = candidates.len(),
            rules = rules.len(),
            "applied filter rules"
        );

        let mut ranked = match request.sort {
            SortMode::Time => rank_by_time(candidates),
            SortMode::Priority => {
                let priorities: HashMap<&str, u8> = scope
                    .iter()
                    .map(|e| (e.account_id.as_str(), e.priority))
                    .collect();

                let mut ranked: Vec<RankedItem> = candidates
                    .into_iter()
                    .map(|item| {
                        let priority = priorities
                            .get(item.author_id.as_str())
                            .copied()
                            .unwrap_or(DEFAULT_PRIORITY);
                        RankedItem {
                            item,
                            relevance_score: None,
                            priority: Some(priority),
                        }
                    })
                    .collect();

                // Newest-first baseline, then a stable pass on priority so
                // equal priorities keep their relative time order.
                ranked.sort_by(|a, b| b.item.created_at.cmp(&a.item.created_at));
                ranked.sort_by(|a, b| b.priority.cmp(&a.priority));
                ranked
            }
            SortMode::Relevance => self.rank_by_relevance(consumer_id, request, candidates),
        };

        ranked.truncate(request.limit);
        Ok(ranked)
    }

    /// First curation for a consumer copies the active roster into their
    /// scope. A consumer with any existing scope, however partial, is left
    /// untouched.
    fn ensure_scope(&self, consumer_id: &str) -> WeirResult<()> {
        if self.scope_repository.has_scope(consumer_id)? {
            return Ok(());
        }

        let accounts = self.registry.list_active()?;
        if accounts.is_empty() {
            return Ok(());
        }

        self.scope_repository.bulk_add(consumer_id, &accounts)?;
        info!(
            consumer_id,
            accounts = accounts.len(),
            "initialized scope from active roster"
        );
        Ok(())
    }

    fn rank_by_relevance(
        &self,
        consumer_id: &str,
        request: &FeedRequest,
        candidates: Vec<Item>,
    ) -> Vec<RankedItem> {
        let RelevanceScorer::Keyword(scorer) = &self.scorer else {
            // Scoring disabled at configuration time: serve the feed
            // time-ordered with no score field at all.
            debug!(consumer_id, "relevance requested with scoring disabled");
            return rank_by_time(candidates);
        };

        let keywords = request
            .keywords
            .as_deref()
            .filter(|k| !k.is_empty());

        let Some(keywords) = keywords else {
            // Nothing to score against: time order, explicit zero scores.
            let mut ranked = rank_by_time(candidates);
            for entry in &mut ranked {
                entry.relevance_score = Some(0.0);
            }
            return ranked;
        };

        let mut ranked: Vec<RankedItem> = candidates
            .into_iter()
            .map(|item| {
                let score = self.score_or_zero(scorer, &item, keywords);
                RankedItem {
                    item,
                    relevance_score: Some(score),
                    priority: None,
                }
            })
            .collect();

        ranked.sort_by(|a, b| {
            let a_score = a.relevance_score.unwrap_or(0.0);
            let b_score = b.relevance_score.unwrap_or(0.0);
            b_score
                .total_cmp(&a_score)
                .then_with(|| b.item.created_at.cmp(&a.item.created_at))
        });
        ranked
    }

    /// The single place the degrade-on-failure policy lives: a scorer error
    /// never aborts curation, it costs the item its score.
    fn score_or_zero(&self, scorer: &KeywordScorer, item: &Item, keywords: &[String]) -> f64 {
        match scorer.score(&item.text, keywords) {
            Ok(score) => score,
            Err(e) => {
                warn!(item_id = %item.id, error = %e, "scoring failed, degrading to 0.0");
                0.0
            }
        }
    }
}

fn rank_by_time(candidates: Vec<Item>) -> Vec<RankedItem> {
    let mut ranked: Vec<RankedItem> = candidates
        .into_iter()
        .map(|item| RankedItem {
            item,
            relevance_score: None,
            priority: None,
        })
        .collect();

    ranked.sort_by(|a, b| b.item.created_at.cmp(&a.item.created_at));
    ranked
}
