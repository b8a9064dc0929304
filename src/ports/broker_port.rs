//! Order submission port trait.
//!
//! The rebalancer is fire-and-forget: it asks whether a security can be
//! traded right now and, if so, submits a target-percentage order. No
//! confirmation or retry flows back into the domain.

pub trait BrokerPort {
    /// Whether the security can currently be bought or sold.
    fn can_trade(&self, code: &str) -> bool;

    /// Request that the position in `code` be brought to `target` as a
    /// fraction of total portfolio value. Negative targets are short,
    /// zero flattens.
    fn order_target_percent(&mut self, code: &str, target: f64);
}
