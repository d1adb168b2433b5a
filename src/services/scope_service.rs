use tracing::info;

use crate::domain::{ScopeEntry, PRIORITY_RANGE};
use crate::errors::{WeirError, WeirResult};
use crate::storage::traits::{AccountRegistry, ScopeRepository};

/// Follow-list administration for a consumer.
pub struct ScopeService<S: ScopeRepository, A: AccountRegistry> {
    scope_repository: S,
    registry: A,
}

impl<S: ScopeRepository, A: AccountRegistry> ScopeService<S, A> {
    pub fn new(scope_repository: S, registry: A) -> Self {
        Self {
            scope_repository,
            registry,
        }
    }

    /// Add an account to the consumer's scope.
    ///
    /// Strict semantics: following an already-followed account surfaces
    /// `ScopeAlreadyExists`; callers wanting idempotence match on it.
    pub fn follow(&self, consumer_id: &str, account_id: &str, priority: u8) -> WeirResult<()> {
        if !PRIORITY_RANGE.contains(&priority) {
            return Err(WeirError::InvalidInput(format!(
                "priority must be in [{}, {}], got {}",
                PRIORITY_RANGE.start(),
                PRIORITY_RANGE.end(),
                priority
            )));
        }

        if !self.registry.is_active(account_id)? {
            return Err(WeirError::AccountNotFound(account_id.to_string()));
        }

        self.scope_repository.add(consumer_id, account_id, priority)?;
        info!(consumer_id, account_id, priority, "account followed");
        Ok(())
    }

    /// Remove an account from the consumer's scope; no-op if absent.
    pub fn unfollow(&self, consumer_id: &str, account_id: &str) -> WeirResult<()> {
        self.scope_repository.remove(consumer_id, account_id)
    }

    pub fn scope(&self, consumer_id: &str) -> WeirResult<Vec<ScopeEntry>> {
        self.scope_repository.get_scope(consumer_id)
    }
}
