//! Replay equivalence tests for the execution journal.

use ledger::{Address, Ledger, LedgerOp};
use node::journal::Journal;
use rand::Rng;
use tempfile::tempdir;

fn addr(n: u8) -> Address {
    let mut a = [0u8; 20];
    a[19] = n;
    a
}

/// Journals a long random stream of accepted operations and checks that a
/// replayed ledger is indistinguishable from the live one.
#[test]
fn test_replay_matches_live_state() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("journal.jsonl");

    let mut live = Ledger::new();
    let mut journal = Journal::open(&path).unwrap();
    let mut rng = rand::thread_rng();
    let holders: Vec<Address> = (1..=6).map(addr).collect();
    let mut accepted = 0usize;

    for _ in 0..500 {
        let amount: u128 = rng.gen_range(0..1000);
        let x = holders[rng.gen_range(0..holders.len())];
        let y = holders[rng.gen_range(0..holders.len())];
        let z = holders[rng.gen_range(0..holders.len())];

        let op = match rng.gen_range(0..5) {
            0 => LedgerOp::Mint { to: x, amount },
            1 => LedgerOp::Burn { from: x, amount },
            2 => LedgerOp::Transfer { caller: x, recipient: y, amount },
            3 => LedgerOp::Approve { caller: x, spender: y, amount },
            _ => LedgerOp::TransferFrom { caller: y, sender: x, recipient: z, amount },
        };

        // Only accepted operations reach the journal, mirroring the node
        if live.apply(op.clone()).is_ok() {
            journal.append(&op).unwrap();
            accepted += 1;
        }
    }

    let mut replayed = Ledger::new();
    let applied = Journal::replay(&path, &mut replayed).unwrap();
    assert_eq!(applied, accepted);

    assert_eq!(replayed.total_supply(), live.total_supply());
    for holder in &holders {
        assert_eq!(replayed.balance_of(holder), live.balance_of(holder));
        for spender in &holders {
            assert_eq!(
                replayed.allowance(holder, spender),
                live.allowance(holder, spender)
            );
        }
    }
}

/// Replaying twice into the same ledger doubles balances; a journal is
/// replayed only into a fresh ledger.
#[test]
fn test_replay_into_fresh_ledger_only() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("journal.jsonl");

    let mut journal = Journal::open(&path).unwrap();
    journal.append(&LedgerOp::Mint { to: addr(1), amount: 100 }).unwrap();

    let mut state = Ledger::new();
    Journal::replay(&path, &mut state).unwrap();
    assert_eq!(state.balance_of(&addr(1)), 100);

    // A second replay applies the mint again; the node never does this,
    // it always replays into Ledger::new().
    Journal::replay(&path, &mut state).unwrap();
    assert_eq!(state.balance_of(&addr(1)), 200);
}

/// The journal survives process "restarts": reopening for append after a
/// replay keeps extending the same file.
#[test]
fn test_journal_reopen_appends() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("journal.jsonl");

    {
        let mut journal = Journal::open(&path).unwrap();
        journal.append(&LedgerOp::Mint { to: addr(1), amount: 40 }).unwrap();
    }

    {
        let mut journal = Journal::open(&path).unwrap();
        journal
            .append(&LedgerOp::Transfer { caller: addr(1), recipient: addr(2), amount: 15 })
            .unwrap();
    }

    let mut state = Ledger::new();
    let applied = Journal::replay(&path, &mut state).unwrap();
    assert_eq!(applied, 2);
    assert_eq!(state.balance_of(&addr(1)), 25);
    assert_eq!(state.balance_of(&addr(2)), 15);
}
