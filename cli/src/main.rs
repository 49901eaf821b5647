//! Eddy CLI - drive constant-product pools against a local JSON store
//!
//! Token types and actors are addressed by name (hashed to ledger
//! identities); pools by the hex identity printed at creation. Every
//! command loads the store, applies one engine operation, and writes the
//! store back.

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use eddy_core::{AccountId, PoolId, SwapDirection, TokenId, TokenLedger};

mod config;
mod store;

use config::CliConfig;
use store::Store;

#[derive(Parser)]
#[command(name = "eddy")]
#[command(about = "Constant-product liquidity pools over a local token ledger", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the JSON store (overrides config)
    #[arg(short, long)]
    store: Option<PathBuf>,

    /// Path to the config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Acting identity name (overrides config)
    #[arg(short, long)]
    actor: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Direction {
    XToY,
    YToX,
}

impl From<Direction> for SwapDirection {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::XToY => SwapDirection::XToY,
            Direction::YToX => SwapDirection::YToX,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create a pool for a token pair
    InitPool {
        /// Pool seed, distinguishes pools over the same pair
        #[arg(long)]
        seed: u64,

        /// First token name
        #[arg(long)]
        token_x: String,

        /// Second token name
        #[arg(long)]
        token_y: String,

        /// Swap fee in basis points
        #[arg(long, default_value = "30")]
        fee_bps: u16,

        /// Actor allowed to lock the pool (default: nobody)
        #[arg(long)]
        lock_authority: Option<String>,
    },

    /// Deposit liquidity for pool shares
    Deposit {
        /// Pool identity (hex)
        #[arg(long)]
        pool: String,

        /// Shares to mint
        #[arg(long)]
        shares: u64,

        /// Maximum X contribution (exact amount when bootstrapping)
        #[arg(long)]
        max_x: u64,

        /// Maximum Y contribution (exact amount when bootstrapping)
        #[arg(long)]
        max_y: u64,
    },

    /// Redeem pool shares for reserves
    Withdraw {
        /// Pool identity (hex)
        #[arg(long)]
        pool: String,

        /// Shares to burn
        #[arg(long)]
        shares: u64,

        /// Minimum acceptable X payout
        #[arg(long, default_value = "0")]
        min_x: u64,

        /// Minimum acceptable Y payout
        #[arg(long, default_value = "0")]
        min_y: u64,
    },

    /// Swap one side of the pair for the other
    Swap {
        /// Pool identity (hex)
        #[arg(long)]
        pool: String,

        /// Which side goes in
        #[arg(long, value_enum)]
        direction: Direction,

        /// Gross input amount
        #[arg(long)]
        amount_in: u64,

        /// Minimum acceptable output
        #[arg(long, default_value = "0")]
        min_out: u64,
    },

    /// Lock or unlock a pool (lock authority only)
    Lock {
        /// Pool identity (hex)
        #[arg(long)]
        pool: String,

        /// New lock state
        #[arg(long)]
        locked: bool,
    },

    /// Mint tokens to the acting identity (test faucet)
    Mint {
        /// Token name
        #[arg(long)]
        token: String,

        /// Amount to mint
        #[arg(long)]
        amount: u64,
    },

    /// Show the acting identity's balance of a token
    Balance {
        /// Token name
        #[arg(long)]
        token: String,
    },

    /// Show one pool, or all pools
    Show {
        /// Pool identity (hex); omit to list all
        #[arg(long)]
        pool: Option<String>,
    },
}

fn parse_pool(hex: &str) -> Result<PoolId> {
    PoolId::from_hex(hex).map_err(|_| anyhow!("not a pool identity: {}", hex))
}

fn print_pool(store: &Store, id: &PoolId) -> Result<()> {
    let pool = store
        .engine
        .pool(id)
        .ok_or_else(|| anyhow!("no pool {}", id))?;
    let (reserve_x, reserve_y) = pool.reserves(store.engine.ledger());
    println!("pool {}", id);
    println!("  seed          {}", pool.seed);
    println!("  token_x       {}", pool.token_x);
    println!("  token_y       {}", pool.token_y);
    println!("  share_token   {}", pool.share_token);
    println!("  fee_bps       {}", pool.fee_bps);
    println!("  reserve_x     {}", reserve_x);
    println!("  reserve_y     {}", reserve_y);
    println!("  share_supply  {}", pool.share_supply(store.engine.ledger()));
    println!("  locked        {}", pool.locked);
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let config = CliConfig::load(cli.config.as_deref())?;
    let store_path = config.store_path(cli.store);
    let actor = AccountId::named(&config.actor_name(cli.actor));
    let mut store = Store::open(&store_path)?;

    match cli.command {
        Commands::InitPool {
            seed,
            token_x,
            token_y,
            fee_bps,
            lock_authority,
        } => {
            let id = store
                .engine
                .initialize(
                    seed,
                    TokenId::named(&token_x),
                    TokenId::named(&token_y),
                    fee_bps,
                    lock_authority.as_deref().map(AccountId::named),
                )
                .context("initialize failed")?;
            store.save()?;
            println!("created pool {}", id);
        }
        Commands::Deposit {
            pool,
            shares,
            max_x,
            max_y,
        } => {
            let id = parse_pool(&pool)?;
            let receipt = store
                .engine
                .deposit(&id, &actor, shares, max_x, max_y)
                .context("deposit failed")?;
            store.save()?;
            println!(
                "minted {} shares for {} X + {} Y",
                receipt.shares, receipt.amount_x, receipt.amount_y
            );
        }
        Commands::Withdraw {
            pool,
            shares,
            min_x,
            min_y,
        } => {
            let id = parse_pool(&pool)?;
            let receipt = store
                .engine
                .withdraw(&id, &actor, shares, min_x, min_y)
                .context("withdraw failed")?;
            store.save()?;
            println!(
                "burned {} shares for {} X + {} Y",
                receipt.shares, receipt.amount_x, receipt.amount_y
            );
        }
        Commands::Swap {
            pool,
            direction,
            amount_in,
            min_out,
        } => {
            let id = parse_pool(&pool)?;
            let receipt = store
                .engine
                .swap(&id, &actor, direction.into(), amount_in, min_out)
                .context("swap failed")?;
            store.save()?;
            println!(
                "swapped {} in (fee {}) for {} out",
                receipt.amount_in, receipt.fee, receipt.amount_out
            );
        }
        Commands::Lock { pool, locked } => {
            let id = parse_pool(&pool)?;
            store
                .engine
                .set_locked(&id, &actor, locked)
                .context("lock failed")?;
            store.save()?;
            println!("pool {} locked={}", id, locked);
        }
        Commands::Mint { token, amount } => {
            let token = TokenId::named(&token);
            store
                .engine
                .ledger_mut()
                .execute(&[eddy_core::LedgerInstruction::Mint {
                    token,
                    to: actor,
                    amount,
                }])
                .context("mint failed")?;
            store.save()?;
            println!("minted {} of {}", amount, token);
        }
        Commands::Balance { token } => {
            let token = TokenId::named(&token);
            println!("{}", store.engine.ledger().balance_of(&token, &actor));
        }
        Commands::Show { pool } => match pool {
            Some(pool) => print_pool(&store, &parse_pool(&pool)?)?,
            None => {
                for (id, _) in store.engine.pools() {
                    print_pool(&store, id)?;
                    println!();
                }
            }
        },
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if cli.verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::init();
    }
    run(cli)
}
