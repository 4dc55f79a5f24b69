// programs/inx_ledger/src/instructions/purchase.rs
use anchor_lang::prelude::*;

use crate::errors::LedgerError;
use crate::state::{EntryKind, PaymentInstructionIssued, PlanCode};
use crate::utils::{ensure_wallet, payment_note, upi_deep_link};
use crate::{InitiatePremiumPurchase, InitiateStorePurchase};

use super::ledger::init_pending_entry;

/// Premium purchases carry a structured plan code end to end; settlement
/// never re-derives the plan from description text.
pub fn initiate_premium_purchase(ctx: Context<InitiatePremiumPurchase>, plan: u8) -> Result<()> {
    let cfg = &ctx.accounts.config;
    require!(!cfg.paused, LedgerError::Paused);

    let plan = PlanCode::from_u8(plan)?;
    let amount = plan.price();

    let now = Clock::get()?.unix_timestamp;
    let user = ctx.accounts.user.key();

    let wallet = &mut ctx.accounts.wallet;
    ensure_wallet(wallet, user, ctx.bumps.wallet, now);
    let seq = wallet.next_seq()?;

    let entry = &mut ctx.accounts.entry;
    init_pending_entry(
        entry,
        user,
        ctx.bumps.entry,
        seq,
        EntryKind::PremiumPayment,
        amount,
        now,
    );
    entry.plan = plan as u8;
    entry.description = format!("premium {}", plan.label());

    emit!(PaymentInstructionIssued {
        user,
        entry: entry.key(),
        kind: entry.kind,
        amount,
        upi_link: upi_deep_link(
            &cfg.payee_upi_id,
            amount,
            &payment_note(EntryKind::PremiumPayment, seq),
        ),
    });

    Ok(())
}

/// Store purchase against a catalog row. The entry records the theme PDA
/// so settlement can locate and re-validate it.
pub fn initiate_store_purchase(ctx: Context<InitiateStorePurchase>) -> Result<()> {
    let cfg = &ctx.accounts.config;
    require!(!cfg.paused, LedgerError::Paused);

    let theme = &ctx.accounts.theme;
    require!(!theme.delisted, LedgerError::ThemeDelisted);

    let amount = theme.price;
    let now = Clock::get()?.unix_timestamp;
    let user = ctx.accounts.user.key();

    let wallet = &mut ctx.accounts.wallet;
    ensure_wallet(wallet, user, ctx.bumps.wallet, now);
    let seq = wallet.next_seq()?;

    let entry = &mut ctx.accounts.entry;
    init_pending_entry(
        entry,
        user,
        ctx.bumps.entry,
        seq,
        EntryKind::StorePayment,
        amount,
        now,
    );
    entry.theme = theme.key();
    entry.description = theme.name.clone();

    emit!(PaymentInstructionIssued {
        user,
        entry: entry.key(),
        kind: entry.kind,
        amount,
        upi_link: upi_deep_link(
            &cfg.payee_upi_id,
            amount,
            &payment_note(EntryKind::StorePayment, seq),
        ),
    });

    Ok(())
}
