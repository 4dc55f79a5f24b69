use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::LedgerError;
use crate::state::EntryClosed;
use crate::{CloseLedgerEntry, InitializeConfig, RegisterTheme, UpdateConfig, UpdateTheme};

pub fn initialize_config(
    ctx: Context<InitializeConfig>,
    payee_upi_id: String,
    game_authority: Pubkey,
) -> Result<()> {
    require!(!payee_upi_id.is_empty(), LedgerError::EmptyPayee);

    let cfg = &mut ctx.accounts.config;
    let admin = ctx.accounts.admin.key();

    cfg.admin = admin;
    cfg.bump = ctx.bumps.config;
    cfg.paused = false;

    cfg.payee_upi_id = payee_upi_id;
    cfg.game_authority = game_authority;
    // referral settlement defaults to the admin; environments with a
    // different policy actor rotate this key instead of weakening checks
    cfg.referral_authority = admin;

    cfg.reward_per_referral = DEFAULT_REWARD_PER_REFERRAL;
    cfg.signup_bonus = DEFAULT_SIGNUP_BONUS;
    cfg.referral_theme_threshold = DEFAULT_REFERRAL_THEME_THRESHOLD;
    cfg.bonus_theme = Pubkey::default();

    cfg.min_deposit = DEFAULT_MIN_DEPOSIT;
    cfg.min_withdrawal = DEFAULT_MIN_WITHDRAWAL;
    cfg.max_withdrawal = DEFAULT_MAX_WITHDRAWAL;
    cfg.pending_ttl_secs = DEFAULT_PENDING_TTL_SECS;

    cfg.version = INITIAL_VERSION;

    Ok(())
}

/// Pausing blocks initiation of new value events only; settlement of
/// in-flight entries stays available so pre-debited funds never strand.
pub fn set_pause(ctx: Context<UpdateConfig>, paused: bool) -> Result<()> {
    let cfg = &mut ctx.accounts.config;
    require_keys_eq!(cfg.admin, ctx.accounts.admin.key(), LedgerError::Unauthorized);
    cfg.paused = paused;
    Ok(())
}

pub fn update_amount_policy(
    ctx: Context<UpdateConfig>,
    min_deposit: u64,
    min_withdrawal: u64,
    max_withdrawal: u64,
    pending_ttl_secs: i64,
) -> Result<()> {
    require!(min_deposit > 0, LedgerError::InvalidAmount);
    require!(min_withdrawal > 0, LedgerError::InvalidAmount);
    require!(max_withdrawal >= min_withdrawal, LedgerError::WithdrawalOutOfBounds);
    require!(pending_ttl_secs > 0, LedgerError::InvalidTtl);

    let cfg = &mut ctx.accounts.config;
    require_keys_eq!(cfg.admin, ctx.accounts.admin.key(), LedgerError::Unauthorized);

    cfg.min_deposit = min_deposit;
    cfg.min_withdrawal = min_withdrawal;
    cfg.max_withdrawal = max_withdrawal;
    cfg.pending_ttl_secs = pending_ttl_secs;

    Ok(())
}

pub fn update_referral_policy(
    ctx: Context<UpdateConfig>,
    reward_per_referral: u64,
    signup_bonus: u64,
    referral_theme_threshold: u32,
    bonus_theme: Pubkey,
) -> Result<()> {
    let cfg = &mut ctx.accounts.config;
    require_keys_eq!(cfg.admin, ctx.accounts.admin.key(), LedgerError::Unauthorized);

    // threshold > 0 requires a configured theme to hand out
    if referral_theme_threshold > 0 {
        require!(bonus_theme != Pubkey::default(), LedgerError::BonusThemeNotConfigured);
    }

    cfg.reward_per_referral = reward_per_referral;
    cfg.signup_bonus = signup_bonus;
    cfg.referral_theme_threshold = referral_theme_threshold;
    cfg.bonus_theme = bonus_theme;

    Ok(())
}

pub fn set_game_authority(ctx: Context<UpdateConfig>, game_authority: Pubkey) -> Result<()> {
    let cfg = &mut ctx.accounts.config;
    require_keys_eq!(cfg.admin, ctx.accounts.admin.key(), LedgerError::Unauthorized);
    cfg.game_authority = game_authority;
    Ok(())
}

pub fn set_referral_authority(
    ctx: Context<UpdateConfig>,
    referral_authority: Pubkey,
) -> Result<()> {
    let cfg = &mut ctx.accounts.config;
    require_keys_eq!(cfg.admin, ctx.accounts.admin.key(), LedgerError::Unauthorized);
    cfg.referral_authority = referral_authority;
    Ok(())
}

pub fn set_payee_upi(ctx: Context<UpdateConfig>, payee_upi_id: String) -> Result<()> {
    require!(!payee_upi_id.is_empty(), LedgerError::EmptyPayee);

    let cfg = &mut ctx.accounts.config;
    require_keys_eq!(cfg.admin, ctx.accounts.admin.key(), LedgerError::Unauthorized);
    cfg.payee_upi_id = payee_upi_id;
    Ok(())
}

// ----------------------------
// Theme catalog
// ----------------------------

pub fn register_theme(
    ctx: Context<RegisterTheme>,
    theme_id: u64,
    name: String,
    price: u64,
) -> Result<()> {
    let cfg = &ctx.accounts.config;
    require_keys_eq!(cfg.admin, ctx.accounts.admin.key(), LedgerError::Unauthorized);
    require!(price > 0, LedgerError::InvalidAmount);

    let theme = &mut ctx.accounts.theme;
    theme.theme_id = theme_id;
    theme.bump = ctx.bumps.theme;
    theme.name = name;
    theme.price = price;
    theme.delisted = false;
    theme.created_at = Clock::get()?.unix_timestamp;

    Ok(())
}

pub fn set_theme_price(ctx: Context<UpdateTheme>, price: u64) -> Result<()> {
    let cfg = &ctx.accounts.config;
    require_keys_eq!(cfg.admin, ctx.accounts.admin.key(), LedgerError::Unauthorized);
    require!(price > 0, LedgerError::InvalidAmount);

    ctx.accounts.theme.price = price;
    Ok(())
}

pub fn set_theme_listing(ctx: Context<UpdateTheme>, delisted: bool) -> Result<()> {
    let cfg = &ctx.accounts.config;
    require_keys_eq!(cfg.admin, ctx.accounts.admin.key(), LedgerError::Unauthorized);

    ctx.accounts.theme.delisted = delisted;
    Ok(())
}

// ----------------------------
// Ledger maintenance
// ----------------------------

/// Audited removal of a terminal entry. Pending entries cannot be closed:
/// a pending withdrawal still holds a pre-debit that only settlement or
/// expiry may release.
pub fn close_ledger_entry(ctx: Context<CloseLedgerEntry>) -> Result<()> {
    let cfg = &ctx.accounts.config;
    require_keys_eq!(cfg.admin, ctx.accounts.admin.key(), LedgerError::Unauthorized);

    let entry = &ctx.accounts.entry;
    require!(!entry.is_pending(), LedgerError::StillPending);

    emit!(EntryClosed {
        entry: entry.key(),
        user: entry.user,
        by: ctx.accounts.admin.key(),
    });

    // account closing handled by the `close = admin` constraint
    Ok(())
}
