//! The ledger state machine.

use crate::errors::{AddressRole, LedgerError};
use crate::types::{is_zero, Address, Amount, LedgerOp};
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// The accounting state of a fungible token.
///
/// Owns the balance table, the allowance table, and the total-supply
/// counter. All mutation goes through the operation methods below; each
/// operation validates completely before writing, so a returned error
/// guarantees the state is unchanged.
///
/// The ledger has no interior locking. A multi-threaded host must wrap the
/// whole instance in a single mutual-exclusion scope per operation; balance
/// and allowance updates inside one operation have to stay jointly atomic.
#[derive(Clone, Debug)]
pub struct Ledger {
    /// Balance per holder, absent key == 0
    balances: HashMap<Address, Amount>,
    /// Allowance per (owner, spender) pair, absent key == 0
    allowances: HashMap<(Address, Address), Amount>,
    /// Sum of all balances, moved only by mint and burn
    total_supply: Amount,
}

impl Ledger {
    /// Creates an empty ledger: no holders, no allowances, zero supply.
    pub fn new() -> Self {
        Self {
            balances: HashMap::new(),
            allowances: HashMap::new(),
            total_supply: 0,
        }
    }

    /// Returns the total supply.
    pub fn total_supply(&self) -> Amount {
        self.total_supply
    }

    /// Returns the balance of `holder`, 0 if the holder is unknown.
    ///
    /// Pure read: no validation, even for the zero address.
    pub fn balance_of(&self, holder: &Address) -> Amount {
        self.balances.get(holder).copied().unwrap_or(0)
    }

    /// Returns the amount `spender` may still move out of `owner`'s
    /// balance, 0 for any unset pair.
    ///
    /// Pure read: no validation, even for zero-address queries.
    pub fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.allowances.get(&(*owner, *spender)).copied().unwrap_or(0)
    }

    /// Snapshot of all tracked holder balances.
    pub fn accounts(&self) -> Vec<(Address, Amount)> {
        self.balances.iter().map(|(addr, bal)| (*addr, *bal)).collect()
    }

    /// Creates `amount` new tokens in `to`'s balance.
    ///
    /// A zero `amount` is a valid mint; the address is still validated.
    pub fn mint(&mut self, to: &Address, amount: Amount) -> Result<(), LedgerError> {
        if is_zero(to) {
            return Err(LedgerError::InvalidAddress { role: AddressRole::Account });
        }

        let new_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        let new_balance = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;

        self.total_supply = new_supply;
        self.balances.insert(*to, new_balance);

        debug!("minted {} tokens to {}", amount, hex::encode(to));
        Ok(())
    }

    /// Destroys `amount` tokens held by `from`.
    pub fn burn(&mut self, from: &Address, amount: Amount) -> Result<(), LedgerError> {
        if is_zero(from) {
            return Err(LedgerError::InvalidAddress { role: AddressRole::Account });
        }

        let balance = self.balance_of(from);
        if balance < amount {
            return Err(LedgerError::InsufficientBalance {
                required: amount,
                available: balance,
            });
        }

        // Supply >= balance >= amount whenever conservation holds; checked
        // anyway so nothing in this crate can wrap.
        let new_supply = self
            .total_supply
            .checked_sub(amount)
            .ok_or(LedgerError::Overflow)?;

        self.total_supply = new_supply;
        self.balances.insert(*from, balance - amount);

        debug!("burned {} tokens from {}", amount, hex::encode(from));
        Ok(())
    }

    /// Sets the allowance of `spender` over `caller`'s balance to `amount`.
    ///
    /// This is an absolute overwrite, not an increment. Re-approving a
    /// spender replaces the prior value, which admits the classic
    /// front-running hazard between a stale approve and a transfer_from;
    /// callers that need a safe adjustment must first approve 0 and verify
    /// no spend happened in between.
    pub fn approve(
        &mut self,
        caller: &Address,
        spender: &Address,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        if is_zero(caller) {
            return Err(LedgerError::InvalidAddress { role: AddressRole::Owner });
        }
        if is_zero(spender) {
            return Err(LedgerError::InvalidAddress { role: AddressRole::Spender });
        }

        self.allowances.insert((*caller, *spender), amount);

        debug!(
            "{} approved {} for {} tokens",
            hex::encode(caller),
            hex::encode(spender),
            amount
        );
        Ok(())
    }

    /// Moves `amount` tokens from `caller`'s balance to `recipient`.
    ///
    /// Allowances are not touched. A self-transfer is a net no-op but still
    /// requires a sufficient balance.
    pub fn transfer(
        &mut self,
        caller: &Address,
        recipient: &Address,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        if is_zero(recipient) {
            return Err(LedgerError::InvalidAddress { role: AddressRole::Recipient });
        }
        if is_zero(caller) {
            return Err(LedgerError::InvalidAddress { role: AddressRole::Sender });
        }

        let sender_balance = self.balance_of(caller);
        if sender_balance < amount {
            return Err(LedgerError::InsufficientBalance {
                required: amount,
                available: sender_balance,
            });
        }

        // Both new balances are computed before either write so a failure
        // cannot leave a half-applied transfer. A self-transfer credits the
        // original balance back.
        let debited = sender_balance - amount;
        let credited = if caller == recipient {
            sender_balance
        } else {
            self.balance_of(recipient)
                .checked_add(amount)
                .ok_or(LedgerError::Overflow)?
        };

        self.balances.insert(*caller, debited);
        self.balances.insert(*recipient, credited);

        debug!(
            "transferred {} tokens from {} to {}",
            amount,
            hex::encode(caller),
            hex::encode(recipient)
        );
        Ok(())
    }

    /// Moves `amount` tokens from `sender`'s balance to `recipient`,
    /// consuming `caller`'s allowance granted by `sender`.
    ///
    /// The allowance check runs before the address checks, which runs
    /// before the balance check. The precedence is externally observable
    /// (it decides which error fires on a multiply-invalid call) and is
    /// kept bit-for-bit compatible with the original behavior.
    pub fn transfer_from(
        &mut self,
        caller: &Address,
        sender: &Address,
        recipient: &Address,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        let allowed = self.allowance(sender, caller);
        if allowed < amount {
            return Err(LedgerError::InsufficientAllowance {
                required: amount,
                available: allowed,
            });
        }

        if is_zero(caller) {
            return Err(LedgerError::InvalidAddress { role: AddressRole::Spender });
        }
        if is_zero(sender) {
            return Err(LedgerError::InvalidAddress { role: AddressRole::Sender });
        }
        if is_zero(recipient) {
            return Err(LedgerError::InvalidAddress { role: AddressRole::Recipient });
        }

        let sender_balance = self.balance_of(sender);
        if sender_balance < amount {
            return Err(LedgerError::InsufficientBalance {
                required: amount,
                available: sender_balance,
            });
        }

        let debited = sender_balance - amount;
        let credited = if sender == recipient {
            sender_balance
        } else {
            self.balance_of(recipient)
                .checked_add(amount)
                .ok_or(LedgerError::Overflow)?
        };

        self.balances.insert(*sender, debited);
        self.balances.insert(*recipient, credited);
        self.allowances.insert((*sender, *caller), allowed - amount);

        debug!(
            "{} moved {} tokens from {} to {}, remaining allowance {}",
            hex::encode(caller),
            amount,
            hex::encode(sender),
            hex::encode(recipient),
            allowed - amount
        );
        Ok(())
    }

    /// Applies a journaled operation to the state.
    pub fn apply(&mut self, op: LedgerOp) -> Result<(), LedgerError> {
        match op {
            LedgerOp::Mint { to, amount } => self.mint(&to, amount),
            LedgerOp::Burn { from, amount } => self.burn(&from, amount),
            LedgerOp::Transfer { caller, recipient, amount } => {
                self.transfer(&caller, &recipient, amount)
            }
            LedgerOp::TransferFrom { caller, sender, recipient, amount } => {
                self.transfer_from(&caller, &sender, &recipient, amount)
            }
            LedgerOp::Approve { caller, spender, amount } => {
                self.approve(&caller, &spender, amount)
            }
        }
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Ledger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ledger {{ holders: {}, total_supply: {} }}",
            self.balances.len(),
            self.total_supply
        )
    }
}
