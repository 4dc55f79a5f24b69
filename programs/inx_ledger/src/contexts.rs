// programs/inx_ledger/src/contexts.rs

use anchor_lang::prelude::*;

use crate::errors::LedgerError;
use crate::state::{
    Config, LedgerEntry, Referral, Theme, ThemeOwnership, ThemeSale, UserProfile, Wallet,
};

// ----------------------------
// Admin / config
// ----------------------------

#[derive(Accounts)]
pub struct InitializeConfig<'info> {
    #[account(
        init,
        payer = admin,
        space = 8 + Config::INIT_SPACE,
        seeds = [crate::CONFIG_SEED],
        bump
    )]
    pub config: Account<'info, Config>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

/// Shared by every admin knob update (pause, amount policy, referral
/// policy, authorities, payee VPA).
#[derive(Accounts)]
pub struct UpdateConfig<'info> {
    #[account(
        mut,
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    pub admin: Signer<'info>,
}

#[derive(Accounts)]
#[instruction(theme_id: u64)]
pub struct RegisterTheme<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        init,
        payer = admin,
        space = 8 + Theme::INIT_SPACE,
        seeds = [crate::THEME_SEED, theme_id.to_le_bytes().as_ref()],
        bump
    )]
    pub theme: Account<'info, Theme>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

#[derive(Accounts)]
pub struct UpdateTheme<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [crate::THEME_SEED, theme.theme_id.to_le_bytes().as_ref()],
        bump = theme.bump
    )]
    pub theme: Account<'info, Theme>,

    pub admin: Signer<'info>,
}

/// Audited removal of a terminal ledger entry (the bulk-reset primitive).
#[derive(Accounts)]
pub struct CloseLedgerEntry<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(mut, close = admin)]
    pub entry: Account<'info, LedgerEntry>,

    #[account(mut)]
    pub admin: Signer<'info>,
}

// ----------------------------
// Initiation
// ----------------------------

#[derive(Accounts)]
pub struct RequestDeposit<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        init_if_needed,
        payer = user,
        space = 8 + Wallet::INIT_SPACE,
        seeds = [crate::WALLET_SEED, user.key().as_ref()],
        bump
    )]
    pub wallet: Account<'info, Wallet>,

    #[account(
        init,
        payer = user,
        space = 8 + LedgerEntry::INIT_SPACE,
        seeds = [crate::ENTRY_SEED, wallet.key().as_ref(), wallet.tx_count.to_le_bytes().as_ref()],
        bump
    )]
    pub entry: Account<'info, LedgerEntry>,

    #[account(mut)]
    pub user: Signer<'info>,

    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

#[derive(Accounts)]
pub struct RequestWithdrawal<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        init_if_needed,
        payer = user,
        space = 8 + Wallet::INIT_SPACE,
        seeds = [crate::WALLET_SEED, user.key().as_ref()],
        bump
    )]
    pub wallet: Account<'info, Wallet>,

    #[account(
        init,
        payer = user,
        space = 8 + LedgerEntry::INIT_SPACE,
        seeds = [crate::ENTRY_SEED, wallet.key().as_ref(), wallet.tx_count.to_le_bytes().as_ref()],
        bump
    )]
    pub entry: Account<'info, LedgerEntry>,

    #[account(mut)]
    pub user: Signer<'info>,

    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

#[derive(Accounts)]
pub struct AttachProof<'info> {
    #[account(
        mut,
        constraint = entry.user == user.key() @ LedgerError::Unauthorized
    )]
    pub entry: Account<'info, LedgerEntry>,

    pub user: Signer<'info>,
}

/// The one self-settling kind: the game collaborator signs, the entry is
/// created already completed and the credit lands in the same instruction.
#[derive(Accounts)]
pub struct GrantGameReward<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    /// CHECK: reward recipient; only recorded and used as a PDA seed.
    pub user: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer = game_authority,
        space = 8 + Wallet::INIT_SPACE,
        seeds = [crate::WALLET_SEED, user.key().as_ref()],
        bump
    )]
    pub wallet: Account<'info, Wallet>,

    #[account(
        init_if_needed,
        payer = game_authority,
        space = 8 + UserProfile::INIT_SPACE,
        seeds = [crate::PROFILE_SEED, user.key().as_ref()],
        bump
    )]
    pub profile: Account<'info, UserProfile>,

    #[account(
        init,
        payer = game_authority,
        space = 8 + LedgerEntry::INIT_SPACE,
        seeds = [crate::ENTRY_SEED, wallet.key().as_ref(), wallet.tx_count.to_le_bytes().as_ref()],
        bump
    )]
    pub entry: Account<'info, LedgerEntry>,

    #[account(mut)]
    pub game_authority: Signer<'info>,

    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

#[derive(Accounts)]
pub struct InitiatePremiumPurchase<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        init_if_needed,
        payer = user,
        space = 8 + Wallet::INIT_SPACE,
        seeds = [crate::WALLET_SEED, user.key().as_ref()],
        bump
    )]
    pub wallet: Account<'info, Wallet>,

    #[account(
        init,
        payer = user,
        space = 8 + LedgerEntry::INIT_SPACE,
        seeds = [crate::ENTRY_SEED, wallet.key().as_ref(), wallet.tx_count.to_le_bytes().as_ref()],
        bump
    )]
    pub entry: Account<'info, LedgerEntry>,

    #[account(mut)]
    pub user: Signer<'info>,

    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

#[derive(Accounts)]
pub struct InitiateStorePurchase<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        seeds = [crate::THEME_SEED, theme.theme_id.to_le_bytes().as_ref()],
        bump = theme.bump
    )]
    pub theme: Account<'info, Theme>,

    #[account(
        init_if_needed,
        payer = user,
        space = 8 + Wallet::INIT_SPACE,
        seeds = [crate::WALLET_SEED, user.key().as_ref()],
        bump
    )]
    pub wallet: Account<'info, Wallet>,

    #[account(
        init,
        payer = user,
        space = 8 + LedgerEntry::INIT_SPACE,
        seeds = [crate::ENTRY_SEED, wallet.key().as_ref(), wallet.tx_count.to_le_bytes().as_ref()],
        bump
    )]
    pub entry: Account<'info, LedgerEntry>,

    #[account(mut)]
    pub user: Signer<'info>,

    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

// ----------------------------
// Settlement (admin approval gateway)
// ----------------------------

#[derive(Accounts)]
pub struct ApproveDeposit<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(mut)]
    pub entry: Account<'info, LedgerEntry>,

    #[account(
        mut,
        seeds = [crate::WALLET_SEED, entry.user.as_ref()],
        bump = wallet.bump
    )]
    pub wallet: Account<'info, Wallet>,

    pub admin: Signer<'info>,
}

#[derive(Accounts)]
pub struct ApproveWithdrawal<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(mut)]
    pub entry: Account<'info, LedgerEntry>,

    #[account(
        mut,
        seeds = [crate::WALLET_SEED, entry.user.as_ref()],
        bump = wallet.bump
    )]
    pub wallet: Account<'info, Wallet>,

    pub admin: Signer<'info>,
}

#[derive(Accounts)]
pub struct ApprovePremium<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(mut)]
    pub entry: Account<'info, LedgerEntry>,

    #[account(
        init_if_needed,
        payer = admin,
        space = 8 + UserProfile::INIT_SPACE,
        seeds = [crate::PROFILE_SEED, entry.user.as_ref()],
        bump
    )]
    pub profile: Account<'info, UserProfile>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

#[derive(Accounts)]
pub struct ApproveStorePurchase<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(mut)]
    pub entry: Account<'info, LedgerEntry>,

    #[account(
        seeds = [crate::THEME_SEED, theme.theme_id.to_le_bytes().as_ref()],
        bump = theme.bump,
        constraint = theme.key() == entry.theme @ LedgerError::ThemeMismatch
    )]
    pub theme: Account<'info, Theme>,

    // Replay-safe grant: if the user already owns the theme this is a
    // no-op, not an error.
    #[account(
        init_if_needed,
        payer = admin,
        space = 8 + ThemeOwnership::INIT_SPACE,
        seeds = [crate::OWNERSHIP_SEED, entry.user.as_ref(), theme.key().as_ref()],
        bump
    )]
    pub ownership: Account<'info, ThemeOwnership>,

    // Upsert-by-key audit row, keyed by the settling entry.
    #[account(
        init_if_needed,
        payer = admin,
        space = 8 + ThemeSale::INIT_SPACE,
        seeds = [crate::THEME_SALE_SEED, entry.key().as_ref()],
        bump
    )]
    pub theme_sale: Account<'info, ThemeSale>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

#[derive(Accounts)]
pub struct RejectEntry<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(mut)]
    pub entry: Account<'info, LedgerEntry>,

    #[account(
        mut,
        seeds = [crate::WALLET_SEED, entry.user.as_ref()],
        bump = wallet.bump
    )]
    pub wallet: Account<'info, Wallet>,

    pub admin: Signer<'info>,
}

/// Permissionless crank: anyone may fail an entry whose pending TTL has
/// elapsed, reversing a withdrawal pre-debit that would otherwise stay
/// locked forever.
#[derive(Accounts)]
pub struct ExpirePending<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(mut)]
    pub entry: Account<'info, LedgerEntry>,

    #[account(
        mut,
        seeds = [crate::WALLET_SEED, entry.user.as_ref()],
        bump = wallet.bump
    )]
    pub wallet: Account<'info, Wallet>,

    pub cranker: Signer<'info>,
}

// ----------------------------
// Ownership registry
// ----------------------------

#[derive(Accounts)]
pub struct ActivateTheme<'info> {
    #[account(
        init_if_needed,
        payer = user,
        space = 8 + UserProfile::INIT_SPACE,
        seeds = [crate::PROFILE_SEED, user.key().as_ref()],
        bump
    )]
    pub profile: Account<'info, UserProfile>,

    // Account existence is the ownership proof; a user without the row
    // fails deserialization here (NotOwned surface).
    #[account(
        mut,
        seeds = [crate::OWNERSHIP_SEED, user.key().as_ref(), ownership.theme.as_ref()],
        bump = ownership.bump,
        constraint = ownership.user == user.key() @ LedgerError::NotOwned
    )]
    pub ownership: Account<'info, ThemeOwnership>,

    /// The currently active ownership row, required whenever the profile
    /// points at a different theme. Verified in the handler.
    #[account(mut)]
    pub previous_ownership: Option<Account<'info, ThemeOwnership>>,

    #[account(mut)]
    pub user: Signer<'info>,

    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

// ----------------------------
// Referral
// ----------------------------

#[derive(Accounts)]
pub struct RegisterReferral<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        init,
        payer = referee,
        space = 8 + Referral::INIT_SPACE,
        seeds = [crate::REFERRAL_SEED, referee.key().as_ref()],
        bump
    )]
    pub referral: Account<'info, Referral>,

    /// CHECK: plain wallet address recorded as the referrer; validated
    /// against self-referral in the handler.
    pub referrer: UncheckedAccount<'info>,

    #[account(mut)]
    pub referee: Signer<'info>,

    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

#[derive(Accounts)]
pub struct SettleReferral<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [crate::REFERRAL_SEED, referral.referee.as_ref()],
        bump = referral.bump
    )]
    pub referral: Account<'info, Referral>,

    #[account(
        init_if_needed,
        payer = authority,
        space = 8 + Wallet::INIT_SPACE,
        seeds = [crate::WALLET_SEED, referral.referrer.as_ref()],
        bump
    )]
    pub referrer_wallet: Account<'info, Wallet>,

    #[account(
        init_if_needed,
        payer = authority,
        space = 8 + Wallet::INIT_SPACE,
        seeds = [crate::WALLET_SEED, referral.referee.as_ref()],
        bump
    )]
    pub referee_wallet: Account<'info, Wallet>,

    #[account(
        init_if_needed,
        payer = authority,
        space = 8 + UserProfile::INIT_SPACE,
        seeds = [crate::PROFILE_SEED, referral.referrer.as_ref()],
        bump
    )]
    pub referrer_profile: Account<'info, UserProfile>,

    /// Companion referral_reward entry for the referrer credit. Required
    /// for cash-kind referrals with a nonzero reward; seeded under the
    /// referral so a replay cannot create a second one.
    #[account(
        init,
        payer = authority,
        space = 8 + LedgerEntry::INIT_SPACE,
        seeds = [crate::ENTRY_SEED, referral.key().as_ref(), crate::REFERRER_ROLE],
        bump
    )]
    pub referrer_entry: Option<Account<'info, LedgerEntry>>,

    /// Companion referral_reward entry for the referee signup bonus.
    #[account(
        init,
        payer = authority,
        space = 8 + LedgerEntry::INIT_SPACE,
        seeds = [crate::ENTRY_SEED, referral.key().as_ref(), crate::REFEREE_ROLE],
        bump
    )]
    pub referee_entry: Option<Account<'info, LedgerEntry>>,

    /// Bonus theme unlock at the referral threshold; only required on the
    /// settlement that crosses it.
    #[account(
        init_if_needed,
        payer = authority,
        space = 8 + ThemeOwnership::INIT_SPACE,
        seeds = [crate::OWNERSHIP_SEED, referral.referrer.as_ref(), config.bonus_theme.as_ref()],
        bump
    )]
    pub bonus_ownership: Option<Account<'info, ThemeOwnership>>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}
