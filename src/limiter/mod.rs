use crate::config::CrawlConfig;
use crate::domain::FetchYieldState;

/// One decision rule: `applies` guards, `compute` produces the limit.
struct LimitRule {
    name: &'static str,
    applies: fn(&FetchYieldState) -> bool,
    compute: fn(&FetchYieldState, &CrawlConfig) -> u32,
}

// Evaluated top to bottom; the first matching rule wins. The order is the
// tie-break policy: saturation detection outranks backoff, backoff outranks
// the steady-state predictor.
static RULES: &[LimitRule] = &[
    // Every returned item was new: the crawl likely missed older new items,
    // so double the ask.
    LimitRule {
        name: "full_fetch_boost",
        applies: |s| {
            s.last_new_count > 0
                && s.last_requested_count > 0
                && s.last_new_count == s.last_requested_count
        },
        compute: |s, cfg| clamp_limit(s.last_requested_count.saturating_mul(2), cfg),
    },
    // The account has gone quiet: throttle to the floor.
    LimitRule {
        name: "empty_backoff",
        applies: |s| s.consecutive_empty_fetches >= 3,
        compute: |_, cfg| cfg.min_limit,
    },
    // Steady state: predict demand from the smoothed rate, padded by the
    // safety margin to damp oscillation.
    LimitRule {
        name: "rate_prediction",
        applies: |s| s.avg_new_rate > 0.0 && s.last_new_count > 0,
        compute: |s, cfg| {
            let predicted = f64::from(s.last_new_count) / s.avg_new_rate;
            clamp_limit((predicted * cfg.safety_margin).round() as u32, cfg)
        },
    },
];

/// Decide how many items to request on the next crawl of an account.
///
/// Total function: unknown accounts and degenerate histories fall back to
/// `default_limit`; every other output is clamped to
/// `[min_limit, max_limit]`.
pub fn next_limit(state: Option<&FetchYieldState>, config: &CrawlConfig) -> u32 {
    let Some(state) = state.filter(|s| s.total_fetches > 0) else {
        return config.default_limit;
    };

    for rule in RULES {
        if (rule.applies)(state) {
            let limit = (rule.compute)(state, config);
            tracing::debug!(
                account_id = %state.account_id,
                rule = rule.name,
                limit,
                "limit decided"
            );
            return limit;
        }
    }

    config.default_limit
}

fn clamp_limit(value: u32, config: &CrawlConfig) -> u32 {
    value.max(config.min_limit).min(config.max_limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn state(requested: u32, new: u32, rate: f64, empties: u32) -> FetchYieldState {
        FetchYieldState {
            account_id: "acct-1".to_string(),
            last_fetch_at: Utc::now(),
            last_requested_count: requested,
            last_new_count: new,
            total_fetches: 10,
            avg_new_rate: rate,
            consecutive_empty_fetches: empties,
        }
    }

    fn cfg() -> CrawlConfig {
        CrawlConfig {
            default_limit: 20,
            min_limit: 5,
            max_limit: 200,
            safety_margin: 1.2,
            smoothing_alpha: 0.3,
        }
    }

    #[test]
    fn test_no_state_returns_default() {
        assert_eq!(next_limit(None, &cfg()), 20);
    }

    #[test]
    fn test_zero_fetches_returns_default() {
        let mut s = state(10, 5, 0.5, 0);
        s.total_fetches = 0;
        assert_eq!(next_limit(Some(&s), &cfg()), 20);
    }

    #[test]
    fn test_full_fetch_boost_doubles() {
        let s = state(50, 50, 0.5, 0);
        assert_eq!(next_limit(Some(&s), &cfg()), 100);
    }

    #[test]
    fn test_full_fetch_boost_clamped_to_max() {
        let s = state(150, 150, 0.5, 0);
        assert_eq!(next_limit(Some(&s), &cfg()), 200);
    }

    #[test]
    fn test_boost_outranks_backoff() {
        // Contrived state, but documents the rule ordering: a saturated last
        // crawl wins even with a stale empty streak on record.
        let s = state(50, 50, 0.5, 4);
        assert_eq!(next_limit(Some(&s), &cfg()), 100);
    }

    #[test]
    fn test_backoff_at_three_empties() {
        let s = state(10, 0, 0.4, 3);
        assert_eq!(next_limit(Some(&s), &cfg()), 5);
    }

    #[test]
    fn test_two_empties_does_not_back_off() {
        let s = state(10, 4, 0.4, 2);
        // rate prediction: 4 / 0.4 * 1.2 = 12
        assert_eq!(next_limit(Some(&s), &cfg()), 12);
    }

    #[test]
    fn test_rate_prediction_rounds_and_clamps() {
        let s = state(100, 3, 0.9, 0);
        // 3 / 0.9 * 1.2 = 4.0 -> below floor, clamps to 5
        assert_eq!(next_limit(Some(&s), &cfg()), 5);

        let s = state(100, 90, 0.5, 0);
        // 90 / 0.5 * 1.2 = 216 -> above ceiling, clamps to 200
        assert_eq!(next_limit(Some(&s), &cfg()), 200);
    }

    #[test]
    fn test_zero_rate_falls_back_to_default() {
        let s = state(10, 2, 0.0, 0);
        assert_eq!(next_limit(Some(&s), &cfg()), 20);
    }

    #[test]
    fn test_zero_new_without_backoff_falls_back_to_default() {
        let s = state(10, 0, 0.4, 1);
        assert_eq!(next_limit(Some(&s), &cfg()), 20);
    }

    #[test]
    fn test_output_always_within_bounds() {
        let cfg = cfg();
        let cases = [
            state(0, 0, 0.0, 0),
            state(1, 1, 0.001, 0),
            state(u32::MAX, u32::MAX, 1.0, 0),
            state(100, 99, 0.0001, 2),
            state(10, 0, 0.9, 7),
        ];
        for s in &cases {
            let limit = next_limit(Some(s), &cfg);
            assert!(limit >= cfg.min_limit && limit <= cfg.max_limit);
        }
    }
}
