//! Attaching signature material to a record.
//!
//! Nothing here computes a signature. These helpers merge an already
//! produced signature or public key into a COPY of the record, so the
//! unsigned original stays available for comparison and re-encoding.

use super::Transaction;
use crate::address::PublicKey;

/// Returns a copy of `tx` with `TxnSignature` set to `signature` (hex).
///
/// Any existing signature on the copy is replaced. `tx` itself is left
/// untouched.
///
/// ```
/// use xrpl_codec::{sample_payment, transaction::attach_signature};
///
/// let unsigned = sample_payment().unwrap();
/// let signed = attach_signature(&unsigned, "DEADBEEF");
/// assert!(!unsigned.is_signed());
/// assert!(signed.is_signed());
/// ```
pub fn attach_signature(tx: &Transaction, signature: impl Into<String>) -> Transaction {
    let mut signed = tx.clone();
    signed.common_mut().txn_signature = Some(signature.into());
    signed
}

/// Returns a copy of `tx` with `SigningPubKey` set to `public_key`.
pub fn attach_public_key(tx: &Transaction, public_key: PublicKey) -> Transaction {
    let mut keyed = tx.clone();
    keyed.common_mut().signing_pub_key = Some(public_key);
    keyed
}

impl Transaction {
    /// See [`attach_signature`].
    pub fn with_signature(&self, signature: impl Into<String>) -> Self {
        attach_signature(self, signature)
    }

    /// See [`attach_public_key`].
    pub fn with_public_key(&self, public_key: PublicKey) -> Self {
        attach_public_key(self, public_key)
    }

    /// Returns `true` if the record carries a `TxnSignature`.
    pub fn is_signed(&self) -> bool {
        self.common().txn_signature.is_some()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::AccountId;
    use crate::transaction::{CurrencyAmount, PaymentBuilder};

    fn unsigned() -> Transaction {
        let account = AccountId::from_bytes([1u8; 20]);
        PaymentBuilder::new()
            .account(account)
            .destination(account)
            .amount(CurrencyAmount::drops(100))
            .build()
            .unwrap()
            .into()
    }

    #[test]
    fn attaching_leaves_original_unchanged() {
        let tx = unsigned();
        let snapshot = tx.clone();
        let signed = tx.with_signature("AABB");
        assert_eq!(tx, snapshot);
        assert!(!tx.is_signed());
        assert_eq!(signed.common().txn_signature.as_deref(), Some("AABB"));
    }

    #[test]
    fn re_attaching_overwrites_previous_signature() {
        let tx = unsigned().with_signature("AA");
        let resigned = tx.with_signature("BB");
        assert_eq!(resigned.common().txn_signature.as_deref(), Some("BB"));
        assert_eq!(tx.common().txn_signature.as_deref(), Some("AA"));
    }

    #[test]
    fn public_key_is_attached_to_copy() {
        let tx = unsigned();
        let key = PublicKey::from_slice(&[0xED; 33]).unwrap();
        let keyed = tx.with_public_key(key);
        assert_eq!(keyed.common().signing_pub_key, Some(key));
        assert!(tx.common().signing_pub_key.is_none());
    }

    #[test]
    fn only_the_signature_differs() {
        let tx = unsigned();
        let mut signed = tx.with_signature("CC");
        signed.common_mut().txn_signature = None;
        assert_eq!(signed, tx);
    }
}
