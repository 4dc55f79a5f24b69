pub mod admin;
pub mod approval;
pub mod ledger;
pub mod ownership;
pub mod purchase;
pub mod referral;
