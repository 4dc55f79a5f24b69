use anchor_lang::prelude::*;

pub mod constants;
pub mod contexts;
pub mod errors;
pub mod instructions;
pub mod state;
pub mod utils;

pub use constants::*;
pub use contexts::*;
pub use errors::*;
pub use instructions::*;
pub use state::*;
pub use utils::*;

use solana_security_txt::security_txt;

security_txt! {
    // Required fields
    name: "INX Ledger",
    project_url: "https://inxgames.in",
    contacts: "email:support@inxgames.in,link:https://github.com/inx-games/inx-ledger/issues",
    policy: "https://github.com/inx-games/inx-ledger/blob/main/SECURITY.md",

    // Optional fields
    preferred_languages: "en",
    source_code: "https://github.com/inx-games/inx-ledger"
}

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

#[program]
pub mod inx_ledger {
    use super::*;
    use crate::instructions::{admin, approval, ledger, ownership, purchase, referral};

    // ----------------------------
    // Admin / config
    // ----------------------------
    pub fn initialize_config(
        ctx: Context<InitializeConfig>,
        payee_upi_id: String,
        game_authority: Pubkey,
    ) -> Result<()> {
        admin::initialize_config(ctx, payee_upi_id, game_authority)
    }

    pub fn set_pause(ctx: Context<UpdateConfig>, paused: bool) -> Result<()> {
        admin::set_pause(ctx, paused)
    }

    pub fn update_amount_policy(
        ctx: Context<UpdateConfig>,
        min_deposit: u64,
        min_withdrawal: u64,
        max_withdrawal: u64,
        pending_ttl_secs: i64,
    ) -> Result<()> {
        admin::update_amount_policy(
            ctx,
            min_deposit,
            min_withdrawal,
            max_withdrawal,
            pending_ttl_secs,
        )
    }

    pub fn update_referral_policy(
        ctx: Context<UpdateConfig>,
        reward_per_referral: u64,
        signup_bonus: u64,
        referral_theme_threshold: u32,
        bonus_theme: Pubkey,
    ) -> Result<()> {
        admin::update_referral_policy(
            ctx,
            reward_per_referral,
            signup_bonus,
            referral_theme_threshold,
            bonus_theme,
        )
    }

    pub fn set_game_authority(ctx: Context<UpdateConfig>, game_authority: Pubkey) -> Result<()> {
        admin::set_game_authority(ctx, game_authority)
    }

    pub fn set_referral_authority(
        ctx: Context<UpdateConfig>,
        referral_authority: Pubkey,
    ) -> Result<()> {
        admin::set_referral_authority(ctx, referral_authority)
    }

    pub fn set_payee_upi(ctx: Context<UpdateConfig>, payee_upi_id: String) -> Result<()> {
        admin::set_payee_upi(ctx, payee_upi_id)
    }

    pub fn register_theme(
        ctx: Context<RegisterTheme>,
        theme_id: u64,
        name: String,
        price: u64,
    ) -> Result<()> {
        admin::register_theme(ctx, theme_id, name, price)
    }

    pub fn set_theme_price(ctx: Context<UpdateTheme>, price: u64) -> Result<()> {
        admin::set_theme_price(ctx, price)
    }

    pub fn set_theme_listing(ctx: Context<UpdateTheme>, delisted: bool) -> Result<()> {
        admin::set_theme_listing(ctx, delisted)
    }

    pub fn close_ledger_entry(ctx: Context<CloseLedgerEntry>) -> Result<()> {
        admin::close_ledger_entry(ctx)
    }

    // ----------------------------
    // Initiation
    // ----------------------------
    pub fn request_deposit(ctx: Context<RequestDeposit>, amount: u64) -> Result<()> {
        ledger::request_deposit(ctx, amount)
    }

    pub fn request_withdrawal(
        ctx: Context<RequestWithdrawal>,
        amount: u64,
        payout_upi: String,
    ) -> Result<()> {
        ledger::request_withdrawal(ctx, amount, payout_upi)
    }

    pub fn attach_proof(ctx: Context<AttachProof>, proof_ref: String) -> Result<()> {
        ledger::attach_proof(ctx, proof_ref)
    }

    pub fn grant_game_reward(ctx: Context<GrantGameReward>, amount: u64) -> Result<()> {
        ledger::grant_game_reward(ctx, amount)
    }

    pub fn initiate_premium_purchase(
        ctx: Context<InitiatePremiumPurchase>,
        plan: u8,
    ) -> Result<()> {
        purchase::initiate_premium_purchase(ctx, plan)
    }

    pub fn initiate_store_purchase(ctx: Context<InitiateStorePurchase>) -> Result<()> {
        purchase::initiate_store_purchase(ctx)
    }

    // ----------------------------
    // Settlement
    // ----------------------------
    pub fn approve_deposit(ctx: Context<ApproveDeposit>) -> Result<()> {
        approval::approve_deposit(ctx)
    }

    pub fn approve_withdrawal(ctx: Context<ApproveWithdrawal>) -> Result<()> {
        approval::approve_withdrawal(ctx)
    }

    pub fn approve_premium(ctx: Context<ApprovePremium>) -> Result<()> {
        approval::approve_premium(ctx)
    }

    pub fn approve_store_purchase(ctx: Context<ApproveStorePurchase>) -> Result<()> {
        approval::approve_store_purchase(ctx)
    }

    pub fn reject_entry(ctx: Context<RejectEntry>, reason: String) -> Result<()> {
        approval::reject_entry(ctx, reason)
    }

    pub fn expire_pending(ctx: Context<ExpirePending>) -> Result<()> {
        approval::expire_pending(ctx)
    }

    // ----------------------------
    // Ownership / referral
    // ----------------------------
    pub fn activate_theme(ctx: Context<ActivateTheme>) -> Result<()> {
        ownership::activate_theme(ctx)
    }

    pub fn register_referral(ctx: Context<RegisterReferral>, reward_kind: u8) -> Result<()> {
        referral::register_referral(ctx, reward_kind)
    }

    pub fn settle_referral(ctx: Context<SettleReferral>) -> Result<()> {
        referral::settle_referral(ctx)
    }
}
