use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{sha256_hex, Amount, Clock, Timestamp};

/// An immutable record of a transfer between two parties.
///
/// The content hash is computed once in the constructor and stored; the
/// fields are private so the record cannot drift from its hash.  Nothing is
/// validated: empty identifiers, negative amounts and duplicates are all
/// recorded as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    sender: String,
    recipient: String,
    amount: Amount,
    timestamp: Timestamp,
    hash: String,
}

impl Transaction {
    /// Create a transaction stamped with the current time of `clock`.
    pub fn new(
        sender: impl Into<String>,
        recipient: impl Into<String>,
        amount: impl Into<Amount>,
        clock: &impl Clock,
    ) -> Self {
        Self::at(sender, recipient, amount, clock.now())
    }

    /// Create a transaction with an explicit timestamp.
    pub fn at(
        sender: impl Into<String>,
        recipient: impl Into<String>,
        amount: impl Into<Amount>,
        timestamp: Timestamp,
    ) -> Self {
        let sender = sender.into();
        let recipient = recipient.into();
        let amount = amount.into();
        let hash = Self::calculate_hash(&sender, &recipient, &amount, &timestamp);
        trace!(%sender, %recipient, %amount, %hash, "transaction created");
        Self {
            sender,
            recipient,
            amount,
            timestamp,
            hash,
        }
    }

    /// `sha256_hex(sender || recipient || amount || timestamp)` over the
    /// display forms, with no separators.
    pub fn calculate_hash(
        sender: &str,
        recipient: &str,
        amount: &Amount,
        timestamp: &Timestamp,
    ) -> String {
        sha256_hex(format!("{sender}{recipient}{amount}{timestamp}"))
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// Hex-encoded content hash fixed at construction.
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// True when the stored hash still matches the fields.  Only fails for
    /// records deserialised from tampered input.
    pub fn is_intact(&self) -> bool {
        self.hash
            == Self::calculate_hash(&self.sender, &self.recipient, &self.amount, &self.timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{digest::is_hex_digest, FixedClock};

    fn ts(secs: f64) -> Timestamp {
        Timestamp::from_secs_f64(secs)
    }

    #[test]
    fn hash_is_sha256_of_concatenated_fields() {
        let tx = Transaction::at("Alice", "Bob", 10, ts(1700000000.5));
        assert_eq!(tx.hash(), sha256_hex("AliceBob101700000000.5"));
        assert!(is_hex_digest(tx.hash()));
    }

    #[test]
    fn same_fields_same_tick_give_same_hash() {
        let clock = FixedClock::at_secs(1.0);
        let a = Transaction::new("Alice", "Bob", 10, &clock);
        let b = Transaction::new("Alice", "Bob", 10, &clock);
        assert_eq!(a.hash(), b.hash());
    }

    #[test]
    fn integer_and_decimal_amounts_hash_differently() {
        let a = Transaction::at("Alice", "Bob", 10, ts(1.0));
        let b = Transaction::at("Alice", "Bob", 10.0, ts(1.0));
        assert_ne!(a.hash(), b.hash());
    }

    #[test]
    fn permissive_inputs_are_recorded() {
        let tx = Transaction::at("", "", -3, ts(0.0));
        assert_eq!(tx.sender(), "");
        assert_eq!(tx.amount(), Amount::Integer(-3));
        assert_eq!(tx.hash(), sha256_hex("-30.0"));
    }

    #[test]
    fn tiny_decimal_amount_hashes_in_exponent_form() {
        let tx = Transaction::at("Alice", "Bob", 1e-5, ts(1.0));
        assert_eq!(tx.hash(), sha256_hex("AliceBob1e-051.0"));
    }

    #[test]
    fn non_finite_amount_survives_json() {
        let tx = Transaction::at("Alice", "Bob", f64::INFINITY, ts(1.0));
        let json = serde_json::to_string(&tx).unwrap();
        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tx);
        assert!(back.is_intact());
    }

    #[test]
    fn tampered_json_is_detected() {
        let tx = Transaction::at("Alice", "Bob", 10, ts(5.0));
        assert!(tx.is_intact());

        let json = serde_json::to_string(&tx).unwrap().replace("\"Bob\"", "\"Eve\"");
        let forged: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(forged.recipient(), "Eve");
        assert!(!forged.is_intact());
    }
}
