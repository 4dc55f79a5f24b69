// programs/inx_ledger/src/instructions/approval.rs
//
// The admin approval gateway: the only paths out of `pending`. Each
// settlement flips the status and applies its side effect in the same
// instruction, so a completed entry is never observable without its
// wallet/ownership/premium effect (and vice versa).

use anchor_lang::prelude::*;

use crate::errors::LedgerError;
use crate::state::{
    EntryKind, EntryStatus, EntrySettled, PlanCode, PremiumActivated, ThemeSaleRecorded,
};
use crate::utils::ensure_profile;
use crate::{
    ApproveDeposit, ApprovePremium, ApproveStorePurchase, ApproveWithdrawal, ExpirePending,
    RejectEntry,
};

pub fn approve_deposit(ctx: Context<ApproveDeposit>) -> Result<()> {
    let cfg = &ctx.accounts.config;
    let admin = ctx.accounts.admin.key();
    require_keys_eq!(cfg.admin, admin, LedgerError::Unauthorized);

    let entry = &mut ctx.accounts.entry;
    entry.assert_kind(EntryKind::Deposit)?;

    let now = Clock::get()?.unix_timestamp;
    entry.mark_settled(EntryStatus::Completed, admin, now)?;

    let wallet = &mut ctx.accounts.wallet;
    wallet.credit(entry.amount)?;
    wallet.total_deposits = wallet
        .total_deposits
        .checked_add(entry.amount)
        .ok_or(LedgerError::MathOverflow)?;
    wallet.updated_at = now;

    emit!(EntrySettled {
        entry: entry.key(),
        user: entry.user,
        kind: entry.kind,
        amount: entry.amount,
        status: entry.status,
        by: admin,
        at: now,
    });

    Ok(())
}

/// The debit already happened at initiation; approval only records final
/// disposition and bumps the monotone counter.
pub fn approve_withdrawal(ctx: Context<ApproveWithdrawal>) -> Result<()> {
    let cfg = &ctx.accounts.config;
    let admin = ctx.accounts.admin.key();
    require_keys_eq!(cfg.admin, admin, LedgerError::Unauthorized);

    let entry = &mut ctx.accounts.entry;
    entry.assert_kind(EntryKind::Withdrawal)?;

    let now = Clock::get()?.unix_timestamp;
    entry.mark_settled(EntryStatus::Completed, admin, now)?;

    let wallet = &mut ctx.accounts.wallet;
    wallet.total_withdrawals = wallet
        .total_withdrawals
        .checked_add(entry.amount)
        .ok_or(LedgerError::MathOverflow)?;
    wallet.updated_at = now;

    emit!(EntrySettled {
        entry: entry.key(),
        user: entry.user,
        kind: entry.kind,
        amount: entry.amount,
        status: entry.status,
        by: admin,
        at: now,
    });

    Ok(())
}

pub fn approve_premium(ctx: Context<ApprovePremium>) -> Result<()> {
    let cfg = &ctx.accounts.config;
    let admin = ctx.accounts.admin.key();
    require_keys_eq!(cfg.admin, admin, LedgerError::Unauthorized);

    let entry = &mut ctx.accounts.entry;
    entry.assert_kind(EntryKind::PremiumPayment)?;

    // structured plan carried from initiation; an undecodable plan aborts
    // before the status flip, leaving the entry pending for manual retry
    let plan = PlanCode::from_u8(entry.plan)?;

    let now = Clock::get()?.unix_timestamp;
    entry.mark_settled(EntryStatus::Completed, admin, now)?;

    let profile = &mut ctx.accounts.profile;
    ensure_profile(profile, entry.user, ctx.bumps.profile, now);
    profile.activate_premium(plan, now);

    emit!(PremiumActivated {
        user: entry.user,
        plan: plan as u8,
        expires_at: profile.premium_expires_at,
    });
    emit!(EntrySettled {
        entry: entry.key(),
        user: entry.user,
        kind: entry.kind,
        amount: entry.amount,
        status: entry.status,
        by: admin,
        at: now,
    });

    Ok(())
}

pub fn approve_store_purchase(ctx: Context<ApproveStorePurchase>) -> Result<()> {
    let cfg = &ctx.accounts.config;
    let admin = ctx.accounts.admin.key();
    require_keys_eq!(cfg.admin, admin, LedgerError::Unauthorized);

    let entry = &mut ctx.accounts.entry;
    entry.assert_kind(EntryKind::StorePayment)?;

    // side-effect precondition checked before the status flip: a delisted
    // theme aborts the whole settlement and the entry stays pending
    let theme = &ctx.accounts.theme;
    require!(!theme.delisted, LedgerError::ThemeDelisted);

    let now = Clock::get()?.unix_timestamp;
    entry.mark_settled(EntryStatus::Completed, admin, now)?;

    // idempotent grant: a pre-existing row (partial-replay, referral
    // bonus, earlier purchase) is left as-is
    let ownership = &mut ctx.accounts.ownership;
    if ownership.purchased_at == 0 {
        ownership.user = entry.user;
        ownership.theme = theme.key();
        ownership.bump = ctx.bumps.ownership;
        ownership.active = false;
        ownership.purchased_at = now;
    }

    // audit row keyed by the entry: replaying settlement can never write
    // a second one
    let sale = &mut ctx.accounts.theme_sale;
    if sale.sold_at == 0 {
        sale.entry = entry.key();
        sale.user = entry.user;
        sale.theme = theme.key();
        sale.bump = ctx.bumps.theme_sale;
        sale.amount = entry.amount;
        sale.sold_at = now;
    }

    emit!(ThemeSaleRecorded {
        entry: entry.key(),
        user: entry.user,
        theme: theme.key(),
        amount: entry.amount,
    });
    emit!(EntrySettled {
        entry: entry.key(),
        user: entry.user,
        kind: entry.kind,
        amount: entry.amount,
        status: entry.status,
        by: admin,
        at: now,
    });

    Ok(())
}

/// Rejection of any pending kind. Deposits and purchases never touched the
/// wallet, so there is nothing to undo; a rejected withdrawal restores the
/// pre-debit, and the NotPending guard makes that restore single-shot.
pub fn reject_entry(ctx: Context<RejectEntry>, reason: String) -> Result<()> {
    let cfg = &ctx.accounts.config;
    let admin = ctx.accounts.admin.key();
    require_keys_eq!(cfg.admin, admin, LedgerError::Unauthorized);

    let entry = &mut ctx.accounts.entry;
    let kind = EntryKind::from_u8(entry.kind)?;

    let now = Clock::get()?.unix_timestamp;
    entry.mark_settled(EntryStatus::Failed, admin, now)?;
    entry.review_note = reason;

    if kind == EntryKind::Withdrawal {
        let wallet = &mut ctx.accounts.wallet;
        wallet.credit(entry.amount)?;
        wallet.updated_at = now;
    }

    emit!(EntrySettled {
        entry: entry.key(),
        user: entry.user,
        kind: entry.kind,
        amount: entry.amount,
        status: entry.status,
        by: admin,
        at: now,
    });

    Ok(())
}

/// Anyone may fail an entry once its pending TTL has elapsed; without
/// this, funds pre-debited for an unreviewed withdrawal stay locked
/// indefinitely.
pub fn expire_pending(ctx: Context<ExpirePending>) -> Result<()> {
    let cfg = &ctx.accounts.config;
    let cranker = ctx.accounts.cranker.key();

    let entry = &mut ctx.accounts.entry;
    let kind = EntryKind::from_u8(entry.kind)?;

    let now = Clock::get()?.unix_timestamp;
    let deadline = entry
        .created_at
        .checked_add(cfg.pending_ttl_secs)
        .ok_or(LedgerError::MathOverflow)?;
    require!(now >= deadline, LedgerError::PendingNotExpired);

    entry.mark_settled(EntryStatus::Failed, cranker, now)?;
    entry.review_note = "expired".to_string();

    if kind == EntryKind::Withdrawal {
        let wallet = &mut ctx.accounts.wallet;
        wallet.credit(entry.amount)?;
        wallet.updated_at = now;
    }

    emit!(EntrySettled {
        entry: entry.key(),
        user: entry.user,
        kind: entry.kind,
        amount: entry.amount,
        status: entry.status,
        by: cranker,
        at: now,
    });

    Ok(())
}
