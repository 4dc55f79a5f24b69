// programs/inx_ledger/src/instructions/referral.rs
use anchor_lang::prelude::*;

use crate::errors::LedgerError;
use crate::state::{
    EntryKind, EntryStatus, LedgerEntry, ReferralSettled, ReferralStatus, RewardKind, PLAN_NONE,
};
use crate::utils::{crosses_referral_threshold, ensure_profile, ensure_wallet};
use crate::{RegisterReferral, SettleReferral};

/// Records the referrer -> referee relationship at signup. One row per
/// referee by seed construction; self-referral is rejected.
pub fn register_referral(ctx: Context<RegisterReferral>, reward_kind: u8) -> Result<()> {
    let cfg = &ctx.accounts.config;
    require!(!cfg.paused, LedgerError::Paused);

    // validate the code before persisting it
    RewardKind::from_u8(reward_kind)?;

    let referrer = ctx.accounts.referrer.key();
    let referee = ctx.accounts.referee.key();
    require!(
        referrer != referee && referrer != Pubkey::default(),
        LedgerError::InvalidReferrer
    );

    let referral = &mut ctx.accounts.referral;
    referral.referrer = referrer;
    referral.referee = referee;
    referral.bump = ctx.bumps.referral;
    referral.status = ReferralStatus::Pending as u8;
    referral.reward_given = false;
    referral.reward_kind = reward_kind;
    referral.created_at = Clock::get()?.unix_timestamp;
    referral.rewarded_at = 0;

    Ok(())
}

fn fill_reward_entry(
    entry: &mut LedgerEntry,
    user: Pubkey,
    bump: u8,
    seq: u64,
    amount: u64,
    by: Pubkey,
    now: i64,
    note: &str,
) {
    entry.user = user;
    entry.bump = bump;
    entry.seq = seq;

    entry.kind = EntryKind::ReferralReward as u8;
    entry.amount = amount;
    entry.status = EntryStatus::Completed as u8;
    entry.plan = PLAN_NONE;

    entry.verified = true;
    entry.verified_at = now;
    entry.verified_by = by;

    entry.description = note.to_string();

    entry.created_at = now;
    entry.settled_at = now;
}

/// Settles one qualifying referral: referrer reward, referee signup bonus,
/// count bump, status flip, and (at the threshold) the bonus theme unlock,
/// all in one atomic unit. The `reward_given` gate at the top makes a
/// replay a no-op error with no wallet change.
pub fn settle_referral(ctx: Context<SettleReferral>) -> Result<()> {
    let cfg = &ctx.accounts.config;
    let authority = ctx.accounts.authority.key();
    require!(
        authority == cfg.referral_authority || authority == cfg.admin,
        LedgerError::Unauthorized
    );

    let now = Clock::get()?.unix_timestamp;

    // (a) idempotency gate, before any credit
    ctx.accounts.referral.settle(now)?;

    let referral_key = ctx.accounts.referral.key();
    let referrer = ctx.accounts.referral.referrer;
    let referee = ctx.accounts.referral.referee;
    let kind = RewardKind::from_u8(ctx.accounts.referral.reward_kind)?;

    // (b) referrer reward — zero for theme-kind referrals
    let referrer_amount = match kind {
        RewardKind::Cash => cfg.reward_per_referral,
        RewardKind::Theme => 0,
    };

    let referrer_wallet = &mut ctx.accounts.referrer_wallet;
    ensure_wallet(referrer_wallet, referrer, ctx.bumps.referrer_wallet, now);
    if referrer_amount > 0 {
        let entry = ctx
            .accounts
            .referrer_entry
            .as_mut()
            .ok_or(LedgerError::MissingRewardEntry)?;
        let bump = ctx
            .bumps
            .referrer_entry
            .ok_or(LedgerError::MissingRewardEntry)?;
        let seq = referrer_wallet.next_seq()?;
        fill_reward_entry(
            entry,
            referrer,
            bump,
            seq,
            referrer_amount,
            authority,
            now,
            "referral reward",
        );
        referrer_wallet.credit(referrer_amount)?;
    }

    // (c) referee signup bonus
    let referee_wallet = &mut ctx.accounts.referee_wallet;
    ensure_wallet(referee_wallet, referee, ctx.bumps.referee_wallet, now);
    if cfg.signup_bonus > 0 {
        let entry = ctx
            .accounts
            .referee_entry
            .as_mut()
            .ok_or(LedgerError::MissingRewardEntry)?;
        let bump = ctx
            .bumps
            .referee_entry
            .ok_or(LedgerError::MissingRewardEntry)?;
        let seq = referee_wallet.next_seq()?;
        fill_reward_entry(
            entry,
            referee,
            bump,
            seq,
            cfg.signup_bonus,
            authority,
            now,
            "signup bonus",
        );
        referee_wallet.credit(cfg.signup_bonus)?;
    }

    // (d) referrer count
    let profile = &mut ctx.accounts.referrer_profile;
    ensure_profile(profile, referrer, ctx.bumps.referrer_profile, now);
    profile.referral_count = profile
        .referral_count
        .checked_add(1)
        .ok_or(LedgerError::MathOverflow)?;

    // (e) bonus theme unlock on the settlement that crosses the threshold
    let mut theme_unlocked = false;
    if crosses_referral_threshold(profile.referral_count, cfg.referral_theme_threshold) {
        require!(
            cfg.bonus_theme != Pubkey::default(),
            LedgerError::BonusThemeNotConfigured
        );
        let ownership = ctx
            .accounts
            .bonus_ownership
            .as_mut()
            .ok_or(LedgerError::MissingBonusOwnership)?;
        // grant is a no-op when the referrer already bought the theme
        if ownership.purchased_at == 0 {
            ownership.user = referrer;
            ownership.theme = cfg.bonus_theme;
            ownership.bump = ctx
                .bumps
                .bonus_ownership
                .ok_or(LedgerError::MissingBonusOwnership)?;
            ownership.active = false;
            ownership.purchased_at = now;
            theme_unlocked = true;
        }
    }

    emit!(ReferralSettled {
        referral: referral_key,
        referrer,
        referee,
        referrer_amount,
        signup_bonus: cfg.signup_bonus,
        referral_count: profile.referral_count,
        theme_unlocked,
    });

    Ok(())
}
