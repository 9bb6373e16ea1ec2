use fairshare_application::{AuditRecord, AuditSink};

/// Audit sink that writes every computed split to the `fairshare::audit`
/// tracing target.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn record(&self, record: &AuditRecord<'_, '_>) {
        tracing::info!(
            target: "fairshare::audit",
            title = record.title.unwrap_or_default(),
            total = %record.total,
            item_count = record.item_count,
            participant_count = record.allocations.len(),
            modifier_count = record.modifier_count,
            inferred_modifier_count = record.inferred_modifier_count,
            fallback_item_count = record.fallback_item_count,
            settlement_count = record.settlements.len(),
            "Split recorded"
        );

        for allocation in record.allocations {
            tracing::debug!(
                target: "fairshare::audit",
                participant = %allocation.participant,
                share = %allocation.share,
                share_percentage = %allocation.share_percentage,
                savings = %allocation.comparison.savings,
                reasoning = allocation.reasoning.as_str(),
                "Allocation"
            );
        }
        for settlement in record.settlements {
            tracing::debug!(
                target: "fairshare::audit",
                from = settlement.from,
                to = settlement.to,
                amount = %settlement.amount,
                "Settlement"
            );
        }
    }
}
