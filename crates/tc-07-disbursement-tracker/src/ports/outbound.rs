//! # Outbound Ports (Driven Ports)

use shared_types::RecordId;
use tc_01_record_store::StoreError;
use tc_06_procurement_ledger::Procurement;

/// Procurement lookups used to link a disbursement and read its cap.
///
/// `Ok(None)` means no such procurement; `Err` is a storage failure.
pub trait ProcurementProvider {
    fn procurement(&self, id: RecordId) -> Result<Option<Procurement>, StoreError>;
}
