use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::journal::Journal;
use crate::models::record::{Deposit, FinancialRecord, PnlEntry, RecordKind, Withdrawal};
use crate::models::settings::validate_currency_code;
use crate::models::wallet::Wallet;

/// Manages the records of an in-memory [`Journal`].
///
/// Pure business logic, no I/O. Validation here only guards records that
/// enter through this crate; the aggregation engine still tolerates
/// anything a foreign store returns.
pub struct JournalService;

impl JournalService {
    pub fn new() -> Self {
        Self
    }

    pub fn add_pnl_entry(&self, journal: &mut Journal, entry: PnlEntry) -> Result<Uuid, CoreError> {
        validate_owner(&entry.owner_id)?;
        validate_finite("amount", entry.amount)?;
        validate_magnitude("profit", entry.profit)?;
        validate_magnitude("loss", entry.loss)?;
        let id = entry.id;
        binary_insert(&mut journal.pnl_entries, entry);
        Ok(id)
    }

    pub fn add_deposit(&self, journal: &mut Journal, deposit: Deposit) -> Result<Uuid, CoreError> {
        validate_owner(&deposit.owner_id)?;
        validate_magnitude("deposit amount", deposit.amount)?;
        let id = deposit.id;
        binary_insert(&mut journal.deposits, deposit);
        Ok(id)
    }

    pub fn add_withdrawal(
        &self,
        journal: &mut Journal,
        withdrawal: Withdrawal,
    ) -> Result<Uuid, CoreError> {
        validate_owner(&withdrawal.owner_id)?;
        validate_magnitude("withdrawal amount", withdrawal.amount)?;
        let id = withdrawal.id;
        binary_insert(&mut journal.withdrawals, withdrawal);
        Ok(id)
    }

    pub fn add_wallet(&self, journal: &mut Journal, mut wallet: Wallet) -> Result<Uuid, CoreError> {
        validate_owner(&wallet.owner_id)?;
        validate_finite("balance", wallet.balance)?;
        wallet.currency = wallet.currency.trim().to_uppercase();
        validate_currency_code(&wallet.currency)?;
        let id = wallet.id;
        journal.wallets.push(wallet);
        Ok(id)
    }

    /// Replace the P&L entry that has the same id.
    pub fn update_pnl_entry(
        &self,
        journal: &mut Journal,
        entry: PnlEntry,
    ) -> Result<(), CoreError> {
        let idx = journal
            .pnl_entries
            .iter()
            .position(|e| e.id == entry.id)
            .ok_or_else(|| CoreError::RecordNotFound(entry.id.to_string()))?;

        // Take the old entry out, validate the replacement, roll back on failure
        let old = journal.pnl_entries.remove(idx);
        if let Err(e) = self.add_pnl_entry(journal, entry) {
            binary_insert(&mut journal.pnl_entries, old);
            return Err(e);
        }
        Ok(())
    }

    /// Remove a record of the given kind by its id.
    pub fn remove(
        &self,
        journal: &mut Journal,
        kind: RecordKind,
        id: Uuid,
    ) -> Result<(), CoreError> {
        let removed = match kind {
            RecordKind::Pnl => remove_by_id(&mut journal.pnl_entries, id, |e| e.id),
            RecordKind::Deposit => remove_by_id(&mut journal.deposits, id, |d| d.id),
            RecordKind::Withdrawal => remove_by_id(&mut journal.withdrawals, id, |w| w.id),
            RecordKind::Wallet => remove_by_id(&mut journal.wallets, id, |w| w.id),
        };
        if removed {
            Ok(())
        } else {
            Err(CoreError::RecordNotFound(format!("{kind} {id}")))
        }
    }
}

impl Default for JournalService {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_owner(owner_id: &str) -> Result<(), CoreError> {
    if owner_id.trim().is_empty() {
        return Err(CoreError::ValidationError("Owner id must not be empty".into()));
    }
    Ok(())
}

fn validate_finite(field: &str, value: Option<f64>) -> Result<(), CoreError> {
    match value {
        Some(v) if !v.is_finite() => Err(CoreError::ValidationError(format!(
            "{field} must be a finite number, got {v}"
        ))),
        _ => Ok(()),
    }
}

fn validate_magnitude(field: &str, value: Option<f64>) -> Result<(), CoreError> {
    validate_finite(field, value)?;
    match value {
        Some(v) if v < 0.0 => Err(CoreError::ValidationError(format!(
            "{field} must not be negative, got {v}"
        ))),
        _ => Ok(()),
    }
}

/// Binary insert into a date-sorted Vec in O(log n); equal dates keep
/// insertion order.
fn binary_insert<R: FinancialRecord>(records: &mut Vec<R>, record: R) {
    let date = record.occurred_at();
    let pos = records.partition_point(|r| r.occurred_at() <= date);
    records.insert(pos, record);
}

fn remove_by_id<T>(items: &mut Vec<T>, id: Uuid, id_of: impl Fn(&T) -> Uuid) -> bool {
    match items.iter().position(|item| id_of(item) == id) {
        Some(idx) => {
            items.remove(idx);
            true
        }
        None => false,
    }
}
