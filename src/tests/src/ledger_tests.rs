//! End-to-end scenarios over the ledger state machine.

use ledger::{Address, AddressRole, Ledger, LedgerError, ZERO_ADDRESS};
use rand::Rng;

fn addr(n: u8) -> Address {
    let mut a = [0u8; 20];
    a[19] = n;
    a
}

fn sum_of_balances(ledger: &Ledger) -> u128 {
    ledger.accounts().iter().map(|(_, bal)| *bal).sum()
}

/// Mint, partial burn, then an over-burn that must leave state untouched.
#[test]
fn test_mint_burn_scenario() {
    let mut ledger = Ledger::new();
    let a = addr(1);

    ledger.mint(&a, 100).unwrap();
    assert_eq!(ledger.total_supply(), 100);
    assert_eq!(ledger.balance_of(&a), 100);

    ledger.burn(&a, 50).unwrap();
    assert_eq!(ledger.total_supply(), 50);
    assert_eq!(ledger.balance_of(&a), 50);

    let result = ledger.burn(&a, 100);
    assert!(matches!(result, Err(LedgerError::InsufficientBalance { .. })));
    assert_eq!(ledger.total_supply(), 50);
    assert_eq!(ledger.balance_of(&a), 50);
}

/// A delegated transfer that fails on balance, then succeeds after a mint,
/// draining the allowance.
#[test]
fn test_delegated_transfer_retry_scenario() {
    let mut ledger = Ledger::new();
    let a = addr(1);
    let b = addr(2);
    let c = addr(3);

    ledger.approve(&a, &b, 100).unwrap();
    assert_eq!(ledger.allowance(&a, &b), 100);

    // Allowance is fine but A has no funds yet
    let result = ledger.transfer_from(&b, &a, &c, 100);
    assert!(matches!(result, Err(LedgerError::InsufficientBalance { .. })));
    assert_eq!(ledger.allowance(&a, &b), 100);
    assert_eq!(ledger.balance_of(&c), 0);

    // Fund A and retry
    ledger.mint(&a, 100).unwrap();
    ledger.transfer_from(&b, &a, &c, 100).unwrap();

    assert_eq!(ledger.balance_of(&a), 0);
    assert_eq!(ledger.balance_of(&c), 100);
    assert_eq!(ledger.allowance(&a, &b), 0);
}

/// On a multiply-invalid delegated transfer the allowance check wins: a
/// zero sender with a zero allowance reports InsufficientAllowance, not
/// InvalidAddress.
#[test]
fn test_allowance_check_precedes_address_checks() {
    let mut ledger = Ledger::new();
    let b = addr(2);
    let c = addr(3);

    let result = ledger.transfer_from(&b, &ZERO_ADDRESS, &c, 10);
    assert!(matches!(
        result,
        Err(LedgerError::InsufficientAllowance { required: 10, available: 0 })
    ));
}

/// Approve always overwrites; two approvals leave the second value.
#[test]
fn test_approve_is_absolute_not_additive() {
    let mut ledger = Ledger::new();
    let owner = addr(1);
    let spender = addr(2);

    ledger.approve(&owner, &spender, 70).unwrap();
    ledger.approve(&owner, &spender, 30).unwrap();
    assert_eq!(ledger.allowance(&owner, &spender), 30);
}

/// Transfers conserve the sum of the two balances involved.
#[test]
fn test_transfer_conservation() {
    let mut ledger = Ledger::new();
    let a = addr(1);
    let b = addr(2);

    ledger.mint(&a, 900).unwrap();
    ledger.mint(&b, 100).unwrap();

    let before = ledger.balance_of(&a) + ledger.balance_of(&b);
    ledger.transfer(&a, &b, 250).unwrap();
    let after = ledger.balance_of(&a) + ledger.balance_of(&b);

    assert_eq!(before, after);
    assert_eq!(ledger.total_supply(), 1000);
}

/// Every mutating operation rejects the zero address in every mutable role
/// and leaves the state untouched.
#[test]
fn test_zero_address_rejections_cause_no_state_change() {
    let mut ledger = Ledger::new();
    let a = addr(1);
    let b = addr(2);

    ledger.mint(&a, 500).unwrap();
    ledger.approve(&a, &b, 200).unwrap();

    let snapshot_supply = ledger.total_supply();
    let snapshot_balance = ledger.balance_of(&a);
    let snapshot_allowance = ledger.allowance(&a, &b);

    let rejections: Vec<Result<(), LedgerError>> = vec![
        ledger.mint(&ZERO_ADDRESS, 1),
        ledger.burn(&ZERO_ADDRESS, 1),
        ledger.transfer(&a, &ZERO_ADDRESS, 1),
        ledger.transfer(&ZERO_ADDRESS, &b, 1),
        ledger.approve(&ZERO_ADDRESS, &b, 1),
        ledger.approve(&a, &ZERO_ADDRESS, 1),
        ledger.transfer_from(&ZERO_ADDRESS, &a, &b, 0),
        ledger.transfer_from(&b, &ZERO_ADDRESS, &a, 0),
        ledger.transfer_from(&b, &a, &ZERO_ADDRESS, 0),
    ];

    for result in rejections {
        assert!(matches!(result, Err(LedgerError::InvalidAddress { .. })));
    }

    assert_eq!(ledger.total_supply(), snapshot_supply);
    assert_eq!(ledger.balance_of(&a), snapshot_balance);
    assert_eq!(ledger.allowance(&a, &b), snapshot_allowance);
}

/// The transfer path reports roles in its fixed order: recipient before
/// sender.
#[test]
fn test_transfer_role_order() {
    let mut ledger = Ledger::new();

    let result = ledger.transfer(&ZERO_ADDRESS, &ZERO_ADDRESS, 1);
    assert!(matches!(
        result,
        Err(LedgerError::InvalidAddress { role: AddressRole::Recipient })
    ));
}

/// Total supply equals the sum of all balances after any random sequence
/// of operations, accepted or rejected.
#[test]
fn test_conservation_under_random_operations() {
    let mut ledger = Ledger::new();
    let mut rng = rand::thread_rng();
    let holders: Vec<Address> = (1..=8).map(addr).collect();

    for _ in 0..2000 {
        let amount: u128 = rng.gen_range(0..1500);
        let x = holders[rng.gen_range(0..holders.len())];
        let y = holders[rng.gen_range(0..holders.len())];
        let z = holders[rng.gen_range(0..holders.len())];

        // Rejections are expected along the way; conservation must hold
        // either way.
        let _ = match rng.gen_range(0..5) {
            0 => ledger.mint(&x, amount),
            1 => ledger.burn(&x, amount),
            2 => ledger.transfer(&x, &y, amount),
            3 => ledger.approve(&x, &y, amount),
            _ => ledger.transfer_from(&x, &y, &z, amount),
        };

        assert_eq!(ledger.total_supply(), sum_of_balances(&ledger));
    }
}
