use anchor_lang::prelude::*;

#[error_code]
pub enum LedgerError {
    #[msg("Unauthorized")]
    Unauthorized,
    #[msg("Ledger paused")]
    Paused,

    #[msg("Amount must be a positive integer")]
    InvalidAmount,
    #[msg("Amount below configured minimum")]
    AmountBelowMinimum,
    #[msg("Withdrawal amount outside configured bounds")]
    WithdrawalOutOfBounds,
    #[msg("Insufficient wallet balance")]
    InsufficientBalance,

    // -----------------
    // Settlement guards
    // -----------------
    #[msg("Entry is not pending (already settled or closed)")]
    NotPending,
    #[msg("Entry is still pending")]
    StillPending,
    #[msg("Entry kind does not match this settlement path")]
    KindMismatch,
    #[msg("Proof already submitted for this entry")]
    ProofAlreadySubmitted,
    #[msg("Pending TTL has not elapsed yet")]
    PendingNotExpired,

    // -----------------
    // Catalog / ownership
    // -----------------
    #[msg("Theme is delisted; entry left pending for manual retry")]
    ThemeDelisted,
    #[msg("Theme account does not match the entry")]
    ThemeMismatch,
    #[msg("Theme not owned by this user")]
    NotOwned,
    #[msg("Previously active theme ownership account required")]
    MissingPreviousOwnership,
    #[msg("Previous ownership account does not match the active theme")]
    PreviousOwnershipMismatch,

    // -----------------
    // Premium
    // -----------------
    #[msg("Unknown premium plan code")]
    InvalidPlan,
    #[msg("Unknown entry kind code")]
    InvalidKind,

    // -----------------
    // Referral
    // -----------------
    #[msg("Referral reward already given")]
    AlreadyRewarded,
    #[msg("Referrer must be a distinct external wallet")]
    InvalidReferrer,
    #[msg("Unknown referral reward kind")]
    InvalidRewardKind,
    #[msg("Companion reward entry account required")]
    MissingRewardEntry,
    #[msg("Bonus theme ownership account required at threshold")]
    MissingBonusOwnership,
    #[msg("No bonus theme configured")]
    BonusThemeNotConfigured,

    #[msg("Payee UPI id must not be empty")]
    EmptyPayee,
    #[msg("Payout UPI id must not be empty")]
    EmptyPayoutUpi,
    #[msg("Proof reference must not be empty")]
    EmptyProof,
    #[msg("Pending TTL must be positive")]
    InvalidTtl,

    #[msg("Math overflow")]
    MathOverflow,
}
