//! Daily rebalance pass.
//!
//! One transition per trading day: size the day's long and short lists from
//! the allocation split, submit target-percentage orders for names not
//! already held, then flatten anything held that has dropped out of the
//! universe. Orders go through [`BrokerPort`] fire-and-forget; securities
//! the broker reports as untradeable are silently skipped.

use crate::domain::day_plan::DayPlan;
use crate::domain::portfolio::Portfolio;
use crate::ports::broker_port::BrokerPort;

/// Per-security weights for the day, or `None` when either list is empty.
pub fn day_weights(plan: &DayPlan) -> Option<(f64, f64)> {
    let longs = plan.universe.longs.len();
    let shorts = plan.universe.shorts.len();
    if longs == 0 || shorts == 0 {
        return None;
    }
    Some((
        plan.allocation.long_allocations / longs as f64,
        plan.allocation.short_allocations / shorts as f64,
    ))
}

pub fn rebalance_day(plan: &DayPlan, portfolio: &Portfolio, broker: &mut dyn BrokerPort) {
    // No new orders unless both sides of the book have candidates.
    if let Some((long_weight, short_weight)) = day_weights(plan) {
        for code in &plan.universe.longs {
            if broker.can_trade(code) && !portfolio.has_position(code) {
                broker.order_target_percent(code, long_weight);
            }
        }
        for code in &plan.universe.shorts {
            if broker.can_trade(code) && !portfolio.has_position(code) {
                broker.order_target_percent(code, -short_weight);
            }
        }
    }

    // Cleanup runs unconditionally: anything held that no longer qualifies
    // is flattened, provided it can still trade.
    for code in portfolio.held_codes() {
        if !plan.universe.contains(&code) && broker.can_trade(&code) {
            broker.order_target_percent(&code, 0.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::allocation::AllocationState;
    use crate::domain::portfolio::Position;
    use crate::domain::screen::DayUniverse;
    use chrono::NaiveDate;
    use std::collections::HashSet;

    struct RecordingBroker {
        halted: HashSet<String>,
        orders: Vec<(String, f64)>,
    }

    impl RecordingBroker {
        fn new() -> Self {
            RecordingBroker {
                halted: HashSet::new(),
                orders: Vec::new(),
            }
        }

        fn halt(mut self, code: &str) -> Self {
            self.halted.insert(code.to_string());
            self
        }
    }

    impl BrokerPort for RecordingBroker {
        fn can_trade(&self, code: &str) -> bool {
            !self.halted.contains(code)
        }

        fn order_target_percent(&mut self, code: &str, target: f64) {
            self.orders.push((code.to_string(), target));
        }
    }

    fn plan(longs: &[&str], shorts: &[&str], long_alloc: f64) -> DayPlan {
        DayPlan::new(
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            AllocationState {
                signal: long_alloc - 0.5,
                long_allocations: long_alloc,
                short_allocations: 1.0 - long_alloc,
            },
            DayUniverse {
                longs: longs.iter().map(|s| s.to_string()).collect(),
                shorts: shorts.iter().map(|s| s.to_string()).collect(),
            },
        )
    }

    fn held(portfolio: &mut Portfolio, code: &str, quantity: i64) {
        portfolio.positions.insert(
            code.to_string(),
            Position {
                code: code.to_string(),
                quantity,
                entry_price: 10.0,
                entry_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            },
        );
    }

    #[test]
    fn weights_split_allocation_across_lists() {
        let plan = plan(&["AAA", "BBB"], &["CCC"], 0.6);
        let (long_w, short_w) = day_weights(&plan).unwrap();
        assert!((long_w - 0.3).abs() < 1e-12);
        assert!((short_w - 0.4).abs() < 1e-12);
    }

    #[test]
    fn no_weights_when_either_list_empty() {
        assert!(day_weights(&plan(&["AAA"], &[], 0.6)).is_none());
        assert!(day_weights(&plan(&[], &["CCC"], 0.6)).is_none());
    }

    #[test]
    fn orders_longs_positive_shorts_negative() {
        let plan = plan(&["AAA", "BBB"], &["CCC"], 0.6);
        let portfolio = Portfolio::new(100_000.0);
        let mut broker = RecordingBroker::new();

        rebalance_day(&plan, &portfolio, &mut broker);

        assert_eq!(broker.orders.len(), 3);
        assert_eq!(broker.orders[0].0, "AAA");
        assert!((broker.orders[0].1 - 0.3).abs() < 1e-12);
        assert_eq!(broker.orders[2].0, "CCC");
        assert!((broker.orders[2].1 + 0.4).abs() < 1e-12);
    }

    #[test]
    fn already_held_names_are_not_reordered() {
        let plan = plan(&["AAA"], &["CCC"], 0.5);
        let mut portfolio = Portfolio::new(100_000.0);
        held(&mut portfolio, "AAA", 100);
        let mut broker = RecordingBroker::new();

        rebalance_day(&plan, &portfolio, &mut broker);

        assert_eq!(broker.orders.len(), 1);
        assert_eq!(broker.orders[0].0, "CCC");
    }

    #[test]
    fn untradeable_names_are_skipped() {
        let plan = plan(&["AAA"], &["CCC"], 0.5);
        let portfolio = Portfolio::new(100_000.0);
        let mut broker = RecordingBroker::new().halt("AAA");

        rebalance_day(&plan, &portfolio, &mut broker);

        assert_eq!(broker.orders.len(), 1);
        assert_eq!(broker.orders[0].0, "CCC");
    }

    #[test]
    fn empty_side_places_no_new_orders() {
        let plan = plan(&["AAA", "BBB"], &[], 0.6);
        let portfolio = Portfolio::new(100_000.0);
        let mut broker = RecordingBroker::new();

        rebalance_day(&plan, &portfolio, &mut broker);

        assert!(broker.orders.is_empty());
    }

    #[test]
    fn dropped_holding_is_flattened() {
        let plan = plan(&["AAA"], &["CCC"], 0.5);
        let mut portfolio = Portfolio::new(100_000.0);
        held(&mut portfolio, "OLD", 100);
        let mut broker = RecordingBroker::new();

        rebalance_day(&plan, &portfolio, &mut broker);

        assert!(broker
            .orders
            .iter()
            .any(|(code, target)| code == "OLD" && *target == 0.0));
    }

    #[test]
    fn cleanup_runs_even_when_no_new_orders() {
        let plan = plan(&[], &[], 0.5);
        let mut portfolio = Portfolio::new(100_000.0);
        held(&mut portfolio, "OLD", 100);
        let mut broker = RecordingBroker::new();

        rebalance_day(&plan, &portfolio, &mut broker);

        assert_eq!(broker.orders, vec![("OLD".to_string(), 0.0)]);
    }

    #[test]
    fn cleanup_skips_untradeable_holdings() {
        let plan = plan(&[], &[], 0.5);
        let mut portfolio = Portfolio::new(100_000.0);
        held(&mut portfolio, "OLD", 100);
        let mut broker = RecordingBroker::new().halt("OLD");

        rebalance_day(&plan, &portfolio, &mut broker);

        assert!(broker.orders.is_empty());
    }

    #[test]
    fn holdings_still_in_universe_are_kept() {
        let plan = plan(&["AAA"], &["CCC"], 0.5);
        let mut portfolio = Portfolio::new(100_000.0);
        held(&mut portfolio, "CCC", -100);
        let mut broker = RecordingBroker::new();

        rebalance_day(&plan, &portfolio, &mut broker);

        // AAA is new, CCC is held and still qualifies: only one order
        assert_eq!(broker.orders.len(), 1);
        assert_eq!(broker.orders[0].0, "AAA");
    }
}
