// programs/inx_ledger/src/instructions/ledger.rs
use anchor_lang::prelude::*;

use crate::errors::LedgerError;
use crate::state::{
    EntryKind, EntryStatus, EntrySettled, LedgerEntry, PaymentInstructionIssued, ProofAttached,
    PLAN_NONE,
};
use crate::utils::{
    check_deposit_amount, check_withdrawal_amount, ensure_profile, ensure_wallet, payment_note,
    upi_deep_link,
};
use crate::{AttachProof, GrantGameReward, RequestDeposit, RequestWithdrawal};

pub(crate) fn init_pending_entry(
    entry: &mut LedgerEntry,
    user: Pubkey,
    bump: u8,
    seq: u64,
    kind: EntryKind,
    amount: u64,
    now: i64,
) {
    entry.user = user;
    entry.bump = bump;
    entry.seq = seq;

    entry.kind = kind as u8;
    entry.amount = amount;
    entry.status = EntryStatus::Pending as u8;

    entry.plan = PLAN_NONE;
    entry.theme = Pubkey::default();
    entry.payout_upi = String::new();

    entry.proof_attached = false;
    entry.proof_ref = String::new();

    entry.verified = false;
    entry.verified_at = 0;
    entry.verified_by = Pubkey::default();

    entry.description = payment_note(kind, seq);
    entry.review_note = String::new();

    entry.created_at = now;
    entry.settled_at = 0;
}

/// User asks to convert a UPI transfer into INX. No balance change here;
/// the credit lands only when the admin approves the proof.
pub fn request_deposit(ctx: Context<RequestDeposit>, amount: u64) -> Result<()> {
    let cfg = &ctx.accounts.config;
    require!(!cfg.paused, LedgerError::Paused);
    check_deposit_amount(amount, cfg.min_deposit)?;

    let now = Clock::get()?.unix_timestamp;
    let user = ctx.accounts.user.key();

    let wallet = &mut ctx.accounts.wallet;
    ensure_wallet(wallet, user, ctx.bumps.wallet, now);
    let seq = wallet.next_seq()?;

    let entry = &mut ctx.accounts.entry;
    init_pending_entry(entry, user, ctx.bumps.entry, seq, EntryKind::Deposit, amount, now);

    emit!(PaymentInstructionIssued {
        user,
        entry: entry.key(),
        kind: entry.kind,
        amount,
        upi_link: upi_deep_link(&cfg.payee_upi_id, amount, &entry.description),
    });

    Ok(())
}

/// Withdrawals pre-debit the wallet so pending requests cannot be
/// double-spent; rejection or expiry restores the amount exactly once.
pub fn request_withdrawal(
    ctx: Context<RequestWithdrawal>,
    amount: u64,
    payout_upi: String,
) -> Result<()> {
    let cfg = &ctx.accounts.config;
    require!(!cfg.paused, LedgerError::Paused);
    check_withdrawal_amount(amount, cfg.min_withdrawal, cfg.max_withdrawal)?;
    require!(!payout_upi.is_empty(), LedgerError::EmptyPayoutUpi);

    let now = Clock::get()?.unix_timestamp;
    let user = ctx.accounts.user.key();

    let wallet = &mut ctx.accounts.wallet;
    ensure_wallet(wallet, user, ctx.bumps.wallet, now);

    // balance check + debit, atomic against concurrent requests on the
    // same wallet
    wallet.debit(amount)?;
    let seq = wallet.next_seq()?;

    let entry = &mut ctx.accounts.entry;
    init_pending_entry(
        entry,
        user,
        ctx.bumps.entry,
        seq,
        EntryKind::Withdrawal,
        amount,
        now,
    );
    entry.payout_upi = payout_upi;

    msg!("withdrawal pending: user={} amount={}", user, amount);

    Ok(())
}

/// One proof per entry; a second submission is rejected rather than
/// silently replacing the screenshot the admin may already be reviewing.
pub fn attach_proof(ctx: Context<AttachProof>, proof_ref: String) -> Result<()> {
    require!(!proof_ref.is_empty(), LedgerError::EmptyProof);

    let entry = &mut ctx.accounts.entry;
    entry.attach_proof(proof_ref)?;

    emit!(ProofAttached {
        entry: entry.key(),
        user: entry.user,
    });

    Ok(())
}

/// Game rewards skip the approval gateway: the trusted game authority
/// signs, and the entry is born completed with its credit applied.
pub fn grant_game_reward(ctx: Context<GrantGameReward>, amount: u64) -> Result<()> {
    let cfg = &ctx.accounts.config;
    require!(!cfg.paused, LedgerError::Paused);
    require_keys_eq!(
        cfg.game_authority,
        ctx.accounts.game_authority.key(),
        LedgerError::Unauthorized
    );
    require!(amount > 0, LedgerError::InvalidAmount);

    let now = Clock::get()?.unix_timestamp;
    let user = ctx.accounts.user.key();
    let authority = ctx.accounts.game_authority.key();

    let wallet = &mut ctx.accounts.wallet;
    ensure_wallet(wallet, user, ctx.bumps.wallet, now);
    let seq = wallet.next_seq()?;
    wallet.credit(amount)?;

    let profile = &mut ctx.accounts.profile;
    ensure_profile(profile, user, ctx.bumps.profile, now);
    profile.credits = profile
        .credits
        .checked_add(amount)
        .ok_or(LedgerError::MathOverflow)?;

    let entry = &mut ctx.accounts.entry;
    init_pending_entry(
        entry,
        user,
        ctx.bumps.entry,
        seq,
        EntryKind::GameReward,
        amount,
        now,
    );
    entry.status = EntryStatus::Completed as u8;
    entry.verified = true;
    entry.verified_at = now;
    entry.verified_by = authority;
    entry.settled_at = now;

    emit!(EntrySettled {
        entry: entry.key(),
        user,
        kind: entry.kind,
        amount,
        status: entry.status,
        by: authority,
        at: now,
    });

    Ok(())
}
