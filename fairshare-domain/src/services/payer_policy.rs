use crate::model::{CostItem, Participant};

/// Decides who is credited for an item whose payer is absent or unknown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PayerPolicy {
    /// Credit the first participant.
    #[default]
    FirstParticipant,
    /// Every item must name a participant as its payer.
    RequireExplicit,
}

impl PayerPolicy {
    /// Index into `participants` of the participant credited for `item`.
    pub fn resolve_payer(
        self,
        item: &CostItem<'_>,
        participants: &[Participant<'_>],
    ) -> Option<usize> {
        let explicit = item.payer.and_then(|payer| {
            participants
                .iter()
                .position(|participant| participant.id.0 == payer.0)
        });

        match (explicit, self) {
            (Some(idx), _) => Some(idx),
            (None, PayerPolicy::FirstParticipant) => {
                if !participants.is_empty() {
                    tracing::debug!(
                        item = item.id,
                        payer = item.payer.map(|payer| payer.0),
                        "Item has no resolvable payer; crediting the first participant"
                    );
                }
                participants.first().map(|_| 0)
            }
            (None, PayerPolicy::RequireExplicit) => None,
        }
    }
}
