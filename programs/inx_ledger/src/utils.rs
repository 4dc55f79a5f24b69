use anchor_lang::prelude::*;

use crate::errors::LedgerError;
use crate::state::{EntryKind, UserProfile, Wallet, PLAN_NONE};

// -----------------
// Seeds / constants
// -----------------
pub const CONFIG_SEED: &[u8] = b"config_v1";
pub const WALLET_SEED: &[u8] = b"wallet_v1";
pub const ENTRY_SEED: &[u8] = b"entry_v1";
pub const THEME_SEED: &[u8] = b"theme_v1";
pub const OWNERSHIP_SEED: &[u8] = b"ownership_v1";
pub const THEME_SALE_SEED: &[u8] = b"theme_sale_v1";
pub const REFERRAL_SEED: &[u8] = b"referral_v1";
pub const PROFILE_SEED: &[u8] = b"profile_v1";

// Companion referral-reward entries are seeded per role under the
// referral PDA, so a settlement replay cannot create a second one.
pub const REFERRER_ROLE: &[u8] = b"referrer";
pub const REFEREE_ROLE: &[u8] = b"referee";

/// Display name embedded in generated payment instructions.
pub const UPI_PAYEE_NAME: &str = "INX Games";

// -------------------------
// UPI payment instruction
// -------------------------

/// Builds the upi:// deep link shown to the user for a pending deposit or
/// purchase. Pure formatting; the ledger never reads these back.
pub fn upi_deep_link(payee_vpa: &str, amount: u64, note: &str) -> String {
    format!(
        "upi://pay?pa={}&pn={}&am={}&cu=INR&tn={}",
        payee_vpa,
        url_component(UPI_PAYEE_NAME),
        amount,
        url_component(note),
    )
}

/// Minimal percent-encoding for the characters UPI notes actually contain.
fn url_component(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            ' ' => out.push_str("%20"),
            '&' => out.push_str("%26"),
            '#' => out.push_str("%23"),
            '?' => out.push_str("%3F"),
            '=' => out.push_str("%3D"),
            _ => out.push(c),
        }
    }
    out
}

/// Human-readable transfer note for a pending entry, keyed by kind and
/// sequence so the admin can match screenshots against the ledger.
pub fn payment_note(kind: EntryKind, seq: u64) -> String {
    let tag = match kind {
        EntryKind::Deposit => "deposit",
        EntryKind::PremiumPayment => "premium",
        EntryKind::StorePayment => "store",
        EntryKind::Withdrawal => "withdrawal",
        EntryKind::GameReward => "game reward",
        EntryKind::ReferralReward => "referral reward",
    };
    format!("INX {} #{}", tag, seq)
}

// -------------------------
// Amount policy checks
// -------------------------

pub fn check_deposit_amount(amount: u64, min_deposit: u64) -> Result<()> {
    require!(amount > 0, LedgerError::InvalidAmount);
    require!(amount >= min_deposit, LedgerError::AmountBelowMinimum);
    Ok(())
}

pub fn check_withdrawal_amount(amount: u64, min: u64, max: u64) -> Result<()> {
    require!(amount > 0, LedgerError::InvalidAmount);
    require!(
        amount >= min && amount <= max,
        LedgerError::WithdrawalOutOfBounds
    );
    Ok(())
}

// -------------------------
// Lazy per-user accounts
// -------------------------

/// Wallets are created on first access and never deleted. Fills identity
/// fields when the account is fresh and stamps `updated_at` either way.
pub fn ensure_wallet(wallet: &mut Wallet, user: Pubkey, bump: u8, now: i64) {
    if wallet.user == Pubkey::default() {
        wallet.user = user;
        wallet.bump = bump;
        wallet.created_at = now;
    }
    wallet.updated_at = now;
}

pub fn ensure_profile(profile: &mut UserProfile, user: Pubkey, bump: u8, now: i64) {
    if profile.user == Pubkey::default() {
        profile.user = user;
        profile.bump = bump;
        profile.premium_plan = PLAN_NONE;
        profile.created_at = now;
    }
}

/// Whether bumping `referral_count` to `new_count` crosses the bonus-theme
/// threshold. Crossing happens on exactly one settlement, which is what
/// keeps the theme unlock single-shot.
pub fn crosses_referral_threshold(new_count: u32, threshold: u32) -> bool {
    threshold > 0 && new_count == threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upi_link_format() {
        let link = upi_deep_link("merchant@upi", 300, "INX store #7");
        assert_eq!(
            link,
            "upi://pay?pa=merchant@upi&pn=INX%20Games&am=300&cu=INR&tn=INX%20store%20%237"
        );
    }

    #[test]
    fn upi_note_escapes_reserved_chars() {
        assert_eq!(url_component("a&b=c?d#e"), "a%26b%3Dc%3Fd%23e");
    }

    #[test]
    fn payment_notes_carry_kind_and_seq() {
        assert_eq!(payment_note(EntryKind::Deposit, 0), "INX deposit #0");
        assert_eq!(payment_note(EntryKind::PremiumPayment, 12), "INX premium #12");
        assert_eq!(payment_note(EntryKind::StorePayment, 3), "INX store #3");
    }

    #[test]
    fn deposit_amount_policy() {
        assert!(check_deposit_amount(0, 10).is_err());
        assert!(check_deposit_amount(9, 10).is_err());
        assert!(check_deposit_amount(10, 10).is_ok());
        assert!(check_deposit_amount(5_000, 10).is_ok());
    }

    #[test]
    fn withdrawal_amount_policy() {
        assert!(check_withdrawal_amount(0, 100, 10_000).is_err());
        assert!(check_withdrawal_amount(99, 100, 10_000).is_err());
        assert!(check_withdrawal_amount(100, 100, 10_000).is_ok());
        assert!(check_withdrawal_amount(10_000, 100, 10_000).is_ok());
        assert!(check_withdrawal_amount(10_001, 100, 10_000).is_err());
    }

    #[test]
    fn referral_threshold_crossing_is_single_shot() {
        // threshold 5: counts 1..=4 do not unlock, 5 does, 6+ never again
        assert!(!crosses_referral_threshold(4, 5));
        assert!(crosses_referral_threshold(5, 5));
        assert!(!crosses_referral_threshold(6, 5));
        // threshold 0 = feature disabled
        assert!(!crosses_referral_threshold(0, 0));
        assert!(!crosses_referral_threshold(5, 0));
    }
}
