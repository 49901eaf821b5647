//! Fast unit tests for the pool engine
//! Run with: cargo test

use eddy_core::*;

fn tokens() -> (TokenId, TokenId) {
    (TokenId::named("coral"), TokenId::named("kelp"))
}

fn fund(engine: &mut PoolEngine<MemoryLedger>, token: TokenId, owner: AccountId, amount: u64) {
    engine
        .ledger_mut()
        .execute(&[LedgerInstruction::Mint {
            token,
            to: owner,
            amount,
        }])
        .unwrap();
}

/// Engine with one 30 bps pool bootstrapped to the reference state:
/// reserves 5_000_000 / 8_000_000, share supply 1_000_000 held by `lp`.
fn bootstrapped() -> (PoolEngine<MemoryLedger>, PoolId, AccountId) {
    let (x, y) = tokens();
    let lp = AccountId::named("lp");
    let mut engine = PoolEngine::new(MemoryLedger::new());
    let pool = engine.initialize(1, x, y, 30, None).unwrap();

    fund(&mut engine, x, lp, 5_000_000);
    fund(&mut engine, y, lp, 8_000_000);
    engine
        .deposit(&pool, &lp, 1_000_000, 5_000_000, 8_000_000)
        .unwrap();

    (engine, pool, lp)
}

#[test]
fn test_initialize_creates_empty_pool() {
    let (x, y) = tokens();
    let mut engine = PoolEngine::new(MemoryLedger::new());
    let id = engine.initialize(42, x, y, 30, None).unwrap();

    let pool = engine.pool(&id).unwrap();
    assert_eq!(pool.fee_bps, 30);
    assert!(!pool.locked);
    assert_eq!(pool.reserves(engine.ledger()), (0, 0));
    assert_eq!(pool.share_supply(engine.ledger()), 0);

    // Same seed and pair in either order is the same pool
    assert_eq!(id, PoolId::derive(42, &y, &x));
}

#[test]
fn test_initialize_rejections() {
    let (x, y) = tokens();
    let mut engine = PoolEngine::new(MemoryLedger::new());

    assert_eq!(
        engine.initialize(1, x, y, 10_001, None),
        Err(PoolError::InvalidFee)
    );
    assert_eq!(
        engine.initialize(1, x, x, 30, None),
        Err(PoolError::IdenticalTokens)
    );

    engine.initialize(1, x, y, 30, None).unwrap();
    assert_eq!(
        engine.initialize(1, y, x, 30, None),
        Err(PoolError::PoolExists)
    );
    // A different seed makes a distinct pool over the same pair
    engine.initialize(2, x, y, 30, None).unwrap();
}

#[test]
fn test_bootstrap_deposit_sets_genesis_rate() {
    let (engine, pool, lp) = bootstrapped();
    let pool_state = engine.pool(&pool).unwrap();

    assert_eq!(pool_state.reserves(engine.ledger()), (5_000_000, 8_000_000));
    assert_eq!(pool_state.share_supply(engine.ledger()), 1_000_000);
    assert_eq!(
        engine.ledger().balance_of(&pool_state.share_token, &lp),
        1_000_000
    );
    // Caller's tokens are fully in the vaults
    let (x, y) = tokens();
    assert_eq!(engine.ledger().balance_of(&x, &lp), 0);
    assert_eq!(engine.ledger().balance_of(&y, &lp), 0);
}

#[test]
fn test_deposit_rejections() {
    let (x, y) = tokens();
    let alice = AccountId::named("alice");
    let mut engine = PoolEngine::new(MemoryLedger::new());
    let pool = engine.initialize(1, x, y, 30, None).unwrap();

    assert_eq!(
        engine.deposit(&pool, &alice, 0, 10, 10),
        Err(PoolError::InvalidAmount)
    );
    // Bootstrap requires both sides nonzero
    assert_eq!(
        engine.deposit(&pool, &alice, 100, 0, 10),
        Err(PoolError::InvalidAmount)
    );
    assert_eq!(
        engine.deposit(&pool, &alice, 100, 10, 0),
        Err(PoolError::InvalidAmount)
    );
    // Unfunded caller
    assert_eq!(
        engine.deposit(&pool, &alice, 100, 10, 10),
        Err(PoolError::InsufficientBalance)
    );
    assert_eq!(
        engine.deposit(&PoolId::derive(9, &x, &y), &alice, 1, 1, 1),
        Err(PoolError::PoolNotFound)
    );
}

#[test]
fn test_steady_state_deposit_preserves_ratio() {
    let (mut engine, pool, _) = bootstrapped();
    let (x, y) = tokens();
    let bob = AccountId::named("bob");
    fund(&mut engine, x, bob, 1_000_000);
    fund(&mut engine, y, bob, 1_600_000);

    // 100_000 new shares out of 1_000_000: exactly 10% of each reserve
    let receipt = engine
        .deposit(&pool, &bob, 100_000, 1_000_000, 1_600_000)
        .unwrap();
    assert_eq!(receipt.amount_x, 500_000);
    assert_eq!(receipt.amount_y, 800_000);

    let pool_state = engine.pool(&pool).unwrap();
    assert_eq!(pool_state.reserves(engine.ledger()), (5_500_000, 8_800_000));
    assert_eq!(pool_state.share_supply(engine.ledger()), 1_100_000);
}

#[test]
fn test_deposit_slippage_bound() {
    let (mut engine, pool, _) = bootstrapped();
    let (x, y) = tokens();
    let bob = AccountId::named("bob");
    fund(&mut engine, x, bob, 1_000_000);
    fund(&mut engine, y, bob, 1_600_000);

    // Required y for 100_000 shares is 800_000; cap it one unit short
    assert_eq!(
        engine.deposit(&pool, &bob, 100_000, 500_000, 799_999),
        Err(PoolError::SlippageExceeded)
    );
    assert_eq!(
        engine.deposit(&pool, &bob, 100_000, 499_999, 800_000),
        Err(PoolError::SlippageExceeded)
    );
}

#[test]
fn test_swap_known_values() {
    let (mut engine, pool, _) = bootstrapped();
    let (x, y) = tokens();
    let trader = AccountId::named("trader");
    fund(&mut engine, x, trader, 1_000_000);

    let receipt = engine
        .swap(&pool, &trader, SwapDirection::XToY, 1_000_000, 0)
        .unwrap();
    assert_eq!(receipt.fee, 3_000);
    // k = 40e12, floor(k / 5_997_000) = 6_670_001
    assert_eq!(receipt.amount_out, 8_000_000 - 6_670_001);

    // Caller moved exactly amount_in out and amount_out in
    assert_eq!(engine.ledger().balance_of(&x, &trader), 0);
    assert_eq!(engine.ledger().balance_of(&y, &trader), 1_329_999);

    // Fee retained: the input reserve grew by the full amount_in
    let pool_state = engine.pool(&pool).unwrap();
    assert_eq!(pool_state.reserves(engine.ledger()), (6_000_000, 6_670_001));
}

#[test]
fn test_swap_k_non_decreasing_over_sequence() {
    let (mut engine, pool, _) = bootstrapped();
    let (x, y) = tokens();
    let trader = AccountId::named("trader");
    fund(&mut engine, x, trader, 10_000_000);
    fund(&mut engine, y, trader, 10_000_000);

    let pool_state = engine.pool(&pool).unwrap().clone();
    let (rx, ry) = pool_state.reserves(engine.ledger());
    let mut k = rx as u128 * ry as u128;

    // At these magnitudes the retained fee dwarfs the floor-division
    // remainder, so k grows strictly on every swap.
    for (direction, amount) in [
        (SwapDirection::XToY, 250_000),
        (SwapDirection::YToX, 1_000_000),
        (SwapDirection::YToX, 999_983),
        (SwapDirection::XToY, 3_333_333),
    ] {
        engine.swap(&pool, &trader, direction, amount, 0).unwrap();
        let (rx, ry) = pool_state.reserves(engine.ledger());
        let next_k = rx as u128 * ry as u128;
        assert!(next_k > k, "k did not grow: {} -> {}", k, next_k);
        k = next_k;
    }
}

#[test]
fn test_swap_slippage_leaves_state_unchanged() {
    let (mut engine, pool, _) = bootstrapped();
    let (x, _) = tokens();
    let trader = AccountId::named("trader");
    fund(&mut engine, x, trader, 1_000_000);

    let before = engine.clone();
    // min_out above total output reserve is unreachable
    assert_eq!(
        engine.swap(&pool, &trader, SwapDirection::XToY, 1_000_000, 9_000_000),
        Err(PoolError::SlippageExceeded)
    );
    assert_eq!(engine, before);
}

#[test]
fn test_swap_rejections() {
    let (x, y) = tokens();
    let trader = AccountId::named("trader");
    let mut engine = PoolEngine::new(MemoryLedger::new());
    let pool = engine.initialize(1, x, y, 30, None).unwrap();

    assert_eq!(
        engine.swap(&pool, &trader, SwapDirection::XToY, 0, 0),
        Err(PoolError::InvalidAmount)
    );
    // Unfunded pool cannot quote
    assert_eq!(
        engine.swap(&pool, &trader, SwapDirection::XToY, 100, 0),
        Err(PoolError::InsufficientBalance)
    );
}

#[test]
fn test_swap_cannot_drain_one_side() {
    let (x, y) = tokens();
    let lp = AccountId::named("lp");
    let whale = AccountId::named("whale");
    let mut engine = PoolEngine::new(MemoryLedger::new());
    let pool = engine.initialize(1, x, y, 0, None).unwrap();

    fund(&mut engine, x, lp, 1_000);
    fund(&mut engine, y, lp, 2);
    engine.deposit(&pool, &lp, 1_000, 1_000, 2).unwrap();

    fund(&mut engine, x, whale, u64::MAX / 2);
    // However large the input, the output reserve never reaches zero
    assert_eq!(
        engine.swap(&pool, &whale, SwapDirection::XToY, 1_000_000, 0),
        Err(PoolError::InsufficientBalance)
    );
    let (_, ry) = engine.pool(&pool).unwrap().reserves(engine.ledger());
    assert!(ry > 0);
}

#[test]
fn test_withdraw_known_values() {
    let (mut engine, pool, lp) = bootstrapped();
    let (x, y) = tokens();

    let receipt = engine.withdraw(&pool, &lp, 200_000, 0, 0).unwrap();
    assert_eq!(receipt.amount_x, 1_000_000);
    assert_eq!(receipt.amount_y, 1_600_000);

    let pool_state = engine.pool(&pool).unwrap();
    assert_eq!(pool_state.share_supply(engine.ledger()), 800_000);
    assert_eq!(
        engine.ledger().balance_of(&pool_state.share_token, &lp),
        800_000
    );
    assert_eq!(engine.ledger().balance_of(&x, &lp), 1_000_000);
    assert_eq!(engine.ledger().balance_of(&y, &lp), 1_600_000);
}

#[test]
fn test_withdraw_more_than_held_shares() {
    let (mut engine, pool, lp) = bootstrapped();

    let before = engine.clone();
    assert_eq!(
        engine.withdraw(&pool, &lp, 1_000_001, 0, 0),
        Err(PoolError::InsufficientBalance)
    );
    assert_eq!(engine, before);
}

#[test]
fn test_withdraw_slippage_bound() {
    let (mut engine, pool, lp) = bootstrapped();

    // Payout for 200_000 shares is exactly 1_000_000 / 1_600_000
    assert_eq!(
        engine.withdraw(&pool, &lp, 200_000, 1_000_001, 0),
        Err(PoolError::SlippageExceeded)
    );
    assert_eq!(
        engine.withdraw(&pool, &lp, 200_000, 0, 1_600_001),
        Err(PoolError::SlippageExceeded)
    );
    assert_eq!(
        engine.withdraw(&pool, &lp, 0, 0, 0),
        Err(PoolError::InvalidAmount)
    );
}

#[test]
fn test_full_withdraw_empties_both_sides() {
    let (mut engine, pool, lp) = bootstrapped();

    engine.withdraw(&pool, &lp, 1_000_000, 0, 0).unwrap();
    let pool_state = engine.pool(&pool).unwrap().clone();
    assert_eq!(pool_state.reserves(engine.ledger()), (0, 0));
    assert_eq!(pool_state.share_supply(engine.ledger()), 0);

    // The pool can bootstrap again at a fresh rate
    let (x, y) = tokens();
    fund(&mut engine, x, lp, 300);
    fund(&mut engine, y, lp, 700);
    engine.deposit(&pool, &lp, 50, 300, 700).unwrap();
    assert_eq!(pool_state.reserves(engine.ledger()), (300, 700));
}

#[test]
fn test_lock_gates_every_mutating_operation() {
    let (x, y) = tokens();
    let admin = AccountId::named("admin");
    let lp = AccountId::named("lp");
    let mut engine = PoolEngine::new(MemoryLedger::new());
    let pool = engine.initialize(1, x, y, 30, Some(admin)).unwrap();

    fund(&mut engine, x, lp, 1_000);
    fund(&mut engine, y, lp, 1_000);
    engine.deposit(&pool, &lp, 1_000, 1_000, 1_000).unwrap();

    assert_eq!(
        engine.set_locked(&pool, &lp, true),
        Err(PoolError::Unauthorized)
    );
    engine.set_locked(&pool, &admin, true).unwrap();

    assert_eq!(
        engine.deposit(&pool, &lp, 1, 1, 1),
        Err(PoolError::PoolLocked)
    );
    assert_eq!(
        engine.withdraw(&pool, &lp, 1, 0, 0),
        Err(PoolError::PoolLocked)
    );
    assert_eq!(
        engine.swap(&pool, &lp, SwapDirection::XToY, 1, 0),
        Err(PoolError::PoolLocked)
    );

    engine.set_locked(&pool, &admin, false).unwrap();
    engine.withdraw(&pool, &lp, 1, 0, 0).unwrap();
}

#[test]
fn test_pool_without_authority_is_never_lockable() {
    let (x, y) = tokens();
    let admin = AccountId::named("admin");
    let mut engine = PoolEngine::new(MemoryLedger::new());
    let pool = engine.initialize(1, x, y, 30, None).unwrap();

    assert_eq!(
        engine.set_locked(&pool, &admin, true),
        Err(PoolError::Unauthorized)
    );
}

#[test]
fn test_engine_survives_store_roundtrip() {
    let (engine, pool, _) = bootstrapped();

    let json = serde_json::to_string(&engine).unwrap();
    let restored: PoolEngine<MemoryLedger> = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, engine);
    assert_eq!(
        restored.pool(&pool).unwrap().reserves(restored.ledger()),
        (5_000_000, 8_000_000)
    );
}
