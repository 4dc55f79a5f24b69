// Centralized Policy Constants

// Amount Policy (INX, 1 INX = 1 rupee)
// ====================================

/// Minimum deposit request. Anything below this is not worth a manual
/// UPI review round-trip.
pub const DEFAULT_MIN_DEPOSIT: u64 = 10;

/// Withdrawal bounds per request. Enforced at initiation, before the
/// wallet pre-debit.
pub const DEFAULT_MIN_WITHDRAWAL: u64 = 100;
pub const DEFAULT_MAX_WITHDRAWAL: u64 = 10_000;

// Referral Policy Defaults
// ========================

/// INX credited to the referrer per completed referral (cash-kind only).
pub const DEFAULT_REWARD_PER_REFERRAL: u64 = 50;

/// Fixed INX signup bonus credited to the referee at settlement.
pub const DEFAULT_SIGNUP_BONUS: u64 = 20;

/// Completed-referral count at which the referrer unlocks the bonus theme.
pub const DEFAULT_REFERRAL_THEME_THRESHOLD: u32 = 5;

// Pending-Entry Lifecycle
// =======================

/// Seconds a ledger entry may sit pending before anyone can expire it.
/// Bounds how long a withdrawal pre-debit stays locked without an
/// admin decision.
pub const DEFAULT_PENDING_TTL_SECS: i64 = 7 * 86_400;

pub const SECONDS_PER_DAY: i64 = 86_400;

// Premium Plan Price Table (INX)
// ==============================

pub const PRICE_DAILY: u64 = 10;
pub const PRICE_WEEKLY: u64 = 49;
pub const PRICE_MONTHLY: u64 = 99;
pub const PRICE_QUARTERLY: u64 = 249;
pub const PRICE_SEMI_ANNUAL: u64 = 449;
pub const PRICE_YEARLY: u64 = 799;
pub const PRICE_LIFETIME: u64 = 1_999;

// Account Field Sizing
// ====================

pub const MAX_UPI_ID_LEN: usize = 64;
pub const MAX_PROOF_REF_LEN: usize = 128;
pub const MAX_DESCRIPTION_LEN: usize = 64;
pub const MAX_NOTE_LEN: usize = 64;
pub const MAX_THEME_NAME_LEN: usize = 32;

/// Initial version for account structures.
pub const INITIAL_VERSION: u16 = 1;
