// programs/inx_ledger/src/instructions/ownership.rs
use anchor_lang::prelude::*;

use crate::errors::LedgerError;
use crate::state::ThemeActivated;
use crate::utils::ensure_profile;
use crate::ActivateTheme;

/// Switches the active theme. At most one ownership row per user may be
/// active; this instruction enforces that itself by deactivating the
/// previously active row before activating the requested one.
pub fn activate_theme(ctx: Context<ActivateTheme>) -> Result<()> {
    let user = ctx.accounts.user.key();
    let now = Clock::get()?.unix_timestamp;

    let profile = &mut ctx.accounts.profile;
    ensure_profile(profile, user, ctx.bumps.profile, now);

    let new_theme = ctx.accounts.ownership.theme;
    let current = profile.active_theme;

    if current != Pubkey::default() && current != new_theme {
        // the previously active row must be supplied and must match the
        // profile pointer; activating A then B then A again stays at one
        // active row throughout
        let previous = ctx
            .accounts
            .previous_ownership
            .as_mut()
            .ok_or(LedgerError::MissingPreviousOwnership)?;
        require!(
            previous.user == user && previous.theme == current,
            LedgerError::PreviousOwnershipMismatch
        );
        previous.active = false;
    }

    ctx.accounts.ownership.active = true;
    profile.active_theme = new_theme;

    emit!(ThemeActivated {
        user,
        theme: new_theme,
    });

    Ok(())
}
