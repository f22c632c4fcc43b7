//! # Session Token Utility
//!
//! Mints a signed session token so the market page can be exercised locally
//! without the external sign-in flow.
//!
//! ## Usage
//!
//! ```bash
//! # Session with a connected wallet
//! cargo run --package gen-session --bin gen_session -- \
//!     --address 0xde709f2102306220921060314715629080e2fb77
//!
//! # Session for a user who has not connected a wallet
//! cargo run --package gen-session --bin gen_session -- --user-id 7
//! ```
//!
//! Reads `SESSION_SECRET` (and optionally `SESSION_EXPIRATION_HOURS`) from the
//! environment or `.env`, the same values the server verifies with.

use anyhow::anyhow;
use chrono::Duration;
use clap::Parser;
use lib_auth::{encode_session_token, SESSION_COOKIE};
use lib_utils::{format_time, get_env, get_env_parse_or, now_utc, validate_min_length, validate_wallet_address};

#[derive(Debug, Parser)]
#[command(name = "gen_session", about = "Mint a signed session token for local testing")]
struct Args {
    /// User id stored as the token subject
    #[arg(long, default_value = "1")]
    user_id: String,

    /// Wallet address to attach; omit for a session without a wallet
    #[arg(long)]
    address: Option<String>,

    /// Validity in hours (defaults to SESSION_EXPIRATION_HOURS or 24)
    #[arg(long)]
    hours: Option<i64>,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let secret = get_env("SESSION_SECRET")?;
    validate_min_length(&secret, 32, "SESSION_SECRET").map_err(|e| anyhow!(e))?;

    if let Some(address) = &args.address {
        validate_wallet_address(address).map_err(|e| anyhow!(e))?;
    }

    let hours = match args.hours {
        Some(hours) => hours,
        None => get_env_parse_or("SESSION_EXPIRATION_HOURS", 24)?,
    };
    if !(1..=720).contains(&hours) {
        return Err(anyhow!("Validity must be between 1 and 720 hours, got {}", hours));
    }

    let token = encode_session_token(&args.user_id, args.address.clone(), &secret, hours)
        .map_err(|e| anyhow!(e))?;
    let expires_at = now_utc() + Duration::hours(hours);

    println!("============================================");
    println!("  Session Token");
    println!("============================================");
    println!();
    println!("User id:  {}", args.user_id);
    println!("Wallet:   {}", args.address.as_deref().unwrap_or("(none)"));
    println!("Expires:  {}", format_time(expires_at));
    println!();
    println!("{}", token);
    println!();
    println!("Try it:");
    println!("  curl --cookie \"{}={}\" http://127.0.0.1:3001/api/pages/market", SESSION_COOKIE, token);

    Ok(())
}
