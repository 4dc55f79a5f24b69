use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::LedgerError;

/// Status of a ledger entry. Transitions are monotone: Pending may move to
/// Completed or Failed exactly once, terminal states never move again.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum EntryStatus {
    Pending = 0,
    Completed = 1,
    Failed = 2,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum EntryKind {
    Deposit = 0,
    Withdrawal = 1,
    GameReward = 2,
    ReferralReward = 3,
    PremiumPayment = 4,
    StorePayment = 5,
}

impl EntryKind {
    pub fn from_u8(v: u8) -> Result<Self> {
        Ok(match v {
            0 => EntryKind::Deposit,
            1 => EntryKind::Withdrawal,
            2 => EntryKind::GameReward,
            3 => EntryKind::ReferralReward,
            4 => EntryKind::PremiumPayment,
            5 => EntryKind::StorePayment,
            _ => return Err(LedgerError::InvalidKind.into()),
        })
    }
}

/// Sentinel for entries that carry no premium plan.
pub const PLAN_NONE: u8 = u8::MAX;

/// Structured premium plan code, carried from initiation through settlement.
/// Replaces free-text description parsing of "monthly"/"yearly".
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum PlanCode {
    Daily = 0,
    Weekly = 1,
    Monthly = 2,
    Quarterly = 3,
    SemiAnnual = 4,
    Yearly = 5,
    Lifetime = 6,
}

impl PlanCode {
    pub fn from_u8(v: u8) -> Result<Self> {
        Ok(match v {
            0 => PlanCode::Daily,
            1 => PlanCode::Weekly,
            2 => PlanCode::Monthly,
            3 => PlanCode::Quarterly,
            4 => PlanCode::SemiAnnual,
            5 => PlanCode::Yearly,
            6 => PlanCode::Lifetime,
            _ => return Err(LedgerError::InvalidPlan.into()),
        })
    }

    /// Plan duration in seconds; None = lifetime (no expiry).
    pub fn duration_secs(self) -> Option<i64> {
        let days = match self {
            PlanCode::Daily => 1,
            PlanCode::Weekly => 7,
            PlanCode::Monthly => 30,
            PlanCode::Quarterly => 90,
            PlanCode::SemiAnnual => 180,
            PlanCode::Yearly => 365,
            PlanCode::Lifetime => return None,
        };
        Some(days * SECONDS_PER_DAY)
    }

    pub fn price(self) -> u64 {
        match self {
            PlanCode::Daily => PRICE_DAILY,
            PlanCode::Weekly => PRICE_WEEKLY,
            PlanCode::Monthly => PRICE_MONTHLY,
            PlanCode::Quarterly => PRICE_QUARTERLY,
            PlanCode::SemiAnnual => PRICE_SEMI_ANNUAL,
            PlanCode::Yearly => PRICE_YEARLY,
            PlanCode::Lifetime => PRICE_LIFETIME,
        }
    }

    /// Expiry computed from `now`. Re-activation overwrites from `now`
    /// rather than extending remaining time. 0 = no expiry (lifetime).
    pub fn expires_at(self, now: i64) -> i64 {
        match self.duration_secs() {
            Some(d) => now.saturating_add(d),
            None => 0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PlanCode::Daily => "daily",
            PlanCode::Weekly => "weekly",
            PlanCode::Monthly => "monthly",
            PlanCode::Quarterly => "quarterly",
            PlanCode::SemiAnnual => "semi_annual",
            PlanCode::Yearly => "yearly",
            PlanCode::Lifetime => "lifetime",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum RewardKind {
    Cash = 0,
    Theme = 1,
}

impl RewardKind {
    pub fn from_u8(v: u8) -> Result<Self> {
        Ok(match v {
            0 => RewardKind::Cash,
            1 => RewardKind::Theme,
            _ => return Err(LedgerError::InvalidRewardKind.into()),
        })
    }
}

#[repr(u8)]
pub enum ReferralStatus {
    Pending = 0,
    Completed = 1,
}

#[account]
#[derive(InitSpace)]
pub struct Config {
    pub admin: Pubkey,
    pub bump: u8,

    pub paused: bool,

    /// Payee VPA used when formatting UPI payment instructions.
    #[max_len(MAX_UPI_ID_LEN)]
    pub payee_upi_id: String,

    /// The one signer allowed to record self-settling game rewards.
    pub game_authority: Pubkey,

    /// Policy actor allowed to settle referrals. Defaults to admin;
    /// permissive environments inject a different key instead of
    /// weakening the check.
    pub referral_authority: Pubkey,

    pub reward_per_referral: u64,
    pub signup_bonus: u64,
    pub referral_theme_threshold: u32,
    /// Theme catalog row unlocked at the referral threshold.
    /// Pubkey::default() = no bonus theme configured.
    pub bonus_theme: Pubkey,

    pub min_deposit: u64,
    pub min_withdrawal: u64,
    pub max_withdrawal: u64,

    /// Seconds before a pending entry becomes expirable by anyone.
    pub pending_ttl_secs: i64,

    pub version: u16,
}

#[account]
#[derive(InitSpace, Default)]
pub struct Wallet {
    pub user: Pubkey,
    pub bump: u8,

    /// Running INX balance. Mutated only by settlement paths and the
    /// withdrawal pre-debit; equals completed credits minus completed
    /// debits at every instruction boundary.
    pub balance: u64,

    /// Monotone counters, bumped on completed settlement only.
    pub total_deposits: u64,
    pub total_withdrawals: u64,

    /// Next entry sequence number. Entries are seeded per (wallet, seq),
    /// so this doubles as the ordered list of entry references.
    pub tx_count: u64,

    pub created_at: i64,
    pub updated_at: i64,
}

impl Wallet {
    pub fn credit(&mut self, amount: u64) -> Result<()> {
        require!(amount > 0, LedgerError::InvalidAmount);
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(LedgerError::MathOverflow)?;
        Ok(())
    }

    /// Balance check and debit in one step; the runtime's per-account
    /// write lock makes this atomic with respect to concurrent debits.
    pub fn debit(&mut self, amount: u64) -> Result<()> {
        require!(amount > 0, LedgerError::InvalidAmount);
        self.balance = self
            .balance
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientBalance)?;
        Ok(())
    }

    pub fn next_seq(&mut self) -> Result<u64> {
        let seq = self.tx_count;
        self.tx_count = seq.checked_add(1).ok_or(LedgerError::MathOverflow)?;
        Ok(seq)
    }
}

/// One value event, pending until an authority settles it. Named
/// LedgerEntry rather than Transaction to avoid colliding with runtime
/// transactions.
#[account]
#[derive(InitSpace, Default)]
pub struct LedgerEntry {
    pub user: Pubkey,
    pub bump: u8,
    pub seq: u64,

    pub kind: u8,
    pub amount: u64,
    pub status: u8,

    /// PlanCode for premium payments, PLAN_NONE otherwise.
    pub plan: u8,
    /// Theme catalog row for store payments, Pubkey::default() otherwise.
    pub theme: Pubkey,
    /// Payout VPA for withdrawals.
    #[max_len(MAX_UPI_ID_LEN)]
    pub payout_upi: String,

    pub proof_attached: bool,
    #[max_len(MAX_PROOF_REF_LEN)]
    pub proof_ref: String,

    pub verified: bool,
    pub verified_at: i64,
    pub verified_by: Pubkey,

    /// Display text only; settlement never parses it.
    #[max_len(MAX_DESCRIPTION_LEN)]
    pub description: String,
    /// Rejection reason or expiry marker.
    #[max_len(MAX_NOTE_LEN)]
    pub review_note: String,

    pub created_at: i64,
    pub settled_at: i64,
}

impl LedgerEntry {
    pub fn is_pending(&self) -> bool {
        self.status == EntryStatus::Pending as u8
    }

    pub fn assert_kind(&self, kind: EntryKind) -> Result<()> {
        require!(self.kind == kind as u8, LedgerError::KindMismatch);
        Ok(())
    }

    /// The single exit from Pending. A second call observes NotPending;
    /// there is no path back.
    pub fn mark_settled(&mut self, outcome: EntryStatus, by: Pubkey, now: i64) -> Result<()> {
        require!(self.is_pending(), LedgerError::NotPending);
        require!(outcome != EntryStatus::Pending, LedgerError::StillPending);

        self.status = outcome as u8;
        self.verified = outcome == EntryStatus::Completed;
        self.verified_at = now;
        self.verified_by = by;
        self.settled_at = now;
        Ok(())
    }

    pub fn attach_proof(&mut self, proof_ref: String) -> Result<()> {
        require!(self.is_pending(), LedgerError::NotPending);
        require!(!self.proof_attached, LedgerError::ProofAlreadySubmitted);

        self.proof_attached = true;
        self.proof_ref = proof_ref;
        Ok(())
    }
}

#[account]
#[derive(InitSpace)]
pub struct Theme {
    pub theme_id: u64,
    pub bump: u8,

    #[max_len(MAX_THEME_NAME_LEN)]
    pub name: String,
    pub price: u64,

    /// Delisted themes refuse new purchases and block settlement of
    /// in-flight ones (entry stays pending for manual retry).
    pub delisted: bool,

    pub created_at: i64,
}

#[account]
#[derive(InitSpace, Default)]
pub struct ThemeOwnership {
    pub user: Pubkey,
    pub theme: Pubkey,
    pub bump: u8,

    pub active: bool,
    pub purchased_at: i64,
}

/// Audit row of a completed theme purchase, keyed by the settling entry.
/// init_if_needed on the keyed PDA gives upsert-by-key, never duplicate.
#[account]
#[derive(InitSpace)]
pub struct ThemeSale {
    pub entry: Pubkey,
    pub user: Pubkey,
    pub theme: Pubkey,
    pub bump: u8,

    pub amount: u64,
    pub sold_at: i64,
}

#[account]
#[derive(InitSpace, Default)]
pub struct Referral {
    pub referrer: Pubkey,
    pub referee: Pubkey,
    pub bump: u8,

    pub status: u8,
    /// Flips false -> true exactly once; settlement re-runs observe
    /// AlreadyRewarded and make no wallet change.
    pub reward_given: bool,
    pub reward_kind: u8,

    pub created_at: i64,
    pub rewarded_at: i64,
}

impl Referral {
    pub fn settle(&mut self, now: i64) -> Result<()> {
        require!(!self.reward_given, LedgerError::AlreadyRewarded);
        self.reward_given = true;
        self.status = ReferralStatus::Completed as u8;
        self.rewarded_at = now;
        Ok(())
    }
}

#[account]
#[derive(InitSpace, Default)]
pub struct UserProfile {
    pub user: Pubkey,
    pub bump: u8,

    pub is_premium: bool,
    /// 0 = lifetime (when is_premium) or not premium at all.
    pub premium_expires_at: i64,
    pub premium_plan: u8,

    pub referral_count: u32,
    /// Cumulative game-reward INX ever granted.
    pub credits: u64,

    /// Catalog row of the currently active theme; Pubkey::default() = none.
    pub active_theme: Pubkey,

    pub created_at: i64,
}

impl UserProfile {
    /// Derived exclusively from a completed premium_payment entry.
    /// Overwrites any running expiry from `now`; does not stack time.
    pub fn activate_premium(&mut self, plan: PlanCode, now: i64) {
        self.is_premium = true;
        self.premium_plan = plan as u8;
        self.premium_expires_at = plan.expires_at(now);
    }
}

// -----------------
// Events
// -----------------

#[event]
pub struct PaymentInstructionIssued {
    pub user: Pubkey,
    pub entry: Pubkey,
    pub kind: u8,
    pub amount: u64,
    pub upi_link: String,
}

#[event]
pub struct EntrySettled {
    pub entry: Pubkey,
    pub user: Pubkey,
    pub kind: u8,
    pub amount: u64,
    pub status: u8,
    pub by: Pubkey,
    pub at: i64,
}

#[event]
pub struct ProofAttached {
    pub entry: Pubkey,
    pub user: Pubkey,
}

#[event]
pub struct PremiumActivated {
    pub user: Pubkey,
    pub plan: u8,
    pub expires_at: i64,
}

#[event]
pub struct ThemeSaleRecorded {
    pub entry: Pubkey,
    pub user: Pubkey,
    pub theme: Pubkey,
    pub amount: u64,
}

#[event]
pub struct ThemeActivated {
    pub user: Pubkey,
    pub theme: Pubkey,
}

#[event]
pub struct ReferralSettled {
    pub referral: Pubkey,
    pub referrer: Pubkey,
    pub referee: Pubkey,
    pub referrer_amount: u64,
    pub signup_bonus: u64,
    pub referral_count: u32,
    pub theme_unlocked: bool,
}

#[event]
pub struct EntryClosed {
    pub entry: Pubkey,
    pub user: Pubkey,
    pub by: Pubkey,
}

#[cfg(test)]
mod state_machine_tests {
    use super::*;

    fn pending_entry(kind: EntryKind, amount: u64) -> LedgerEntry {
        LedgerEntry {
            kind: kind as u8,
            amount,
            status: EntryStatus::Pending as u8,
            plan: PLAN_NONE,
            ..Default::default()
        }
    }

    #[test]
    fn settle_is_monotone_and_single_shot() {
        let admin = Pubkey::new_unique();
        let mut entry = pending_entry(EntryKind::Deposit, 100);

        entry
            .mark_settled(EntryStatus::Completed, admin, 1_000)
            .expect("first settle wins");
        assert_eq!(entry.status, EntryStatus::Completed as u8);
        assert!(entry.verified);
        assert_eq!(entry.verified_by, admin);
        assert_eq!(entry.verified_at, 1_000);

        // second settle (concurrent admin double-click) must error,
        // not produce a second side effect
        let again = entry.mark_settled(EntryStatus::Failed, admin, 2_000);
        assert!(again.is_err());
        assert_eq!(entry.status, EntryStatus::Completed as u8);
        assert_eq!(entry.settled_at, 1_000);
    }

    #[test]
    fn settle_rejects_pending_as_outcome() {
        let mut entry = pending_entry(EntryKind::Deposit, 100);
        let res = entry.mark_settled(EntryStatus::Pending, Pubkey::new_unique(), 5);
        assert!(res.is_err());
        assert!(entry.is_pending());
    }

    #[test]
    fn failed_entries_never_reopen() {
        let admin = Pubkey::new_unique();
        let mut entry = pending_entry(EntryKind::StorePayment, 300);
        entry.mark_settled(EntryStatus::Failed, admin, 10).unwrap();
        assert!(!entry.verified);
        assert!(entry
            .mark_settled(EntryStatus::Completed, admin, 11)
            .is_err());
    }

    #[test]
    fn proof_attaches_once() {
        let mut entry = pending_entry(EntryKind::Deposit, 500);
        entry.attach_proof("ipfs://proof-1".to_string()).unwrap();
        assert!(entry.proof_attached);
        assert_eq!(entry.proof_ref, "ipfs://proof-1");

        let resubmit = entry.attach_proof("ipfs://proof-2".to_string());
        assert!(resubmit.is_err());
        assert_eq!(entry.proof_ref, "ipfs://proof-1");
    }

    #[test]
    fn proof_rejected_after_settlement() {
        let mut entry = pending_entry(EntryKind::Deposit, 500);
        entry
            .mark_settled(EntryStatus::Failed, Pubkey::new_unique(), 7)
            .unwrap();
        assert!(entry.attach_proof("late".to_string()).is_err());
    }

    #[test]
    fn wallet_credit_debit_roundtrip() {
        let mut w = Wallet::default();
        w.credit(150).unwrap();
        assert_eq!(w.balance, 150);
        w.debit(100).unwrap();
        assert_eq!(w.balance, 50);
        // restore (withdrawal rejected)
        w.credit(100).unwrap();
        assert_eq!(w.balance, 150);
    }

    #[test]
    fn debit_beyond_balance_is_rejected_and_balance_unchanged() {
        let mut w = Wallet::default();
        w.credit(99).unwrap();
        assert!(w.debit(100).is_err());
        assert_eq!(w.balance, 99);
    }

    #[test]
    fn zero_amounts_are_precondition_violations() {
        let mut w = Wallet::default();
        assert!(w.credit(0).is_err());
        assert!(w.debit(0).is_err());
    }

    #[test]
    fn wallet_seq_is_ordered() {
        let mut w = Wallet::default();
        assert_eq!(w.next_seq().unwrap(), 0);
        assert_eq!(w.next_seq().unwrap(), 1);
        assert_eq!(w.tx_count, 2);
    }

    #[test]
    fn referral_settles_exactly_once() {
        let mut r = Referral::default();
        r.settle(42).unwrap();
        assert!(r.reward_given);
        assert_eq!(r.status, ReferralStatus::Completed as u8);
        assert_eq!(r.rewarded_at, 42);

        assert!(r.settle(43).is_err());
        assert_eq!(r.rewarded_at, 42);
    }

    #[test]
    fn plan_expiry_overwrites_from_now() {
        let mut p = UserProfile::default();
        p.activate_premium(PlanCode::Monthly, 1_000);
        assert!(p.is_premium);
        assert_eq!(p.premium_expires_at, 1_000 + 30 * SECONDS_PER_DAY);

        // re-activation while active: expiry restarts from now
        p.activate_premium(PlanCode::Monthly, 2_000);
        assert_eq!(p.premium_expires_at, 2_000 + 30 * SECONDS_PER_DAY);

        p.activate_premium(PlanCode::Lifetime, 3_000);
        assert!(p.is_premium);
        assert_eq!(p.premium_expires_at, 0);
    }

    #[test]
    fn kind_and_plan_codes_roundtrip() {
        for k in 0..=5u8 {
            assert_eq!(EntryKind::from_u8(k).unwrap() as u8, k);
        }
        assert!(EntryKind::from_u8(6).is_err());

        for p in 0..=6u8 {
            assert_eq!(PlanCode::from_u8(p).unwrap() as u8, p);
        }
        assert!(PlanCode::from_u8(7).is_err());
        assert!(PlanCode::from_u8(PLAN_NONE).is_err());
    }
}
