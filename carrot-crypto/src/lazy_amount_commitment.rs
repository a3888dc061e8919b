use crate::core_types::*;

/// An amount commitment that is either known as a point or still given by its opening
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LazyAmountCommitment {
    Closed(AmountCommitment),
    /// `k_a G + a H`
    Open(Amount, AmountBlindingKey),
    /// `G + a H`
    CleartextOpen(Amount),
}

impl LazyAmountCommitment {
    pub fn calculate(&self) -> AmountCommitment {
        match self {
            Self::Closed(amount_commitment) => amount_commitment.clone(),
            Self::Open(amount, amount_blinding_factor) => {
                AmountCommitment::commit(*amount, amount_blinding_factor)
            }
            Self::CleartextOpen(amount) => AmountCommitment::clear_commit(*amount),
        }
    }
}

impl From<AmountCommitment> for LazyAmountCommitment {
    fn from(amount_commitment: AmountCommitment) -> Self {
        Self::Closed(amount_commitment)
    }
}
