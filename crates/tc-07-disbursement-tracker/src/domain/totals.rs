//! Recomputing running totals from disbursement records.

use crate::domain::entities::Disbursement;
use shared_types::{Amount, RecordId};
use std::collections::BTreeMap;

/// Sum amounts per procurement. `Err` carries the procurement whose sum
/// overflowed.
pub fn sum_by_procurement<'a, I>(records: I) -> Result<BTreeMap<RecordId, Amount>, RecordId>
where
    I: IntoIterator<Item = &'a Disbursement>,
{
    let mut totals: BTreeMap<RecordId, Amount> = BTreeMap::new();
    for record in records {
        let entry = totals.entry(record.procurement_id).or_insert_with(Amount::zero);
        *entry = entry
            .checked_add(record.amount)
            .ok_or(record.procurement_id)?;
    }
    Ok(totals)
}
