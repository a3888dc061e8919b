//! The boundary to the FCMP++ membership and SA/L proving backend.
//!
//! An input is spent by proving membership of a rerandomized copy of its output tuple `(O, I, C)`:
//!
//! ```text
//! O~ = O + r_o T
//! I~ = Hp(O) + r_i U
//! R  = r_i V + r_r_i T
//! C~ = C + r_c G
//! ```
//!
//! Hashing to the curve and the proofs themselves live behind [`FcmpPpBackend`]. This module picks
//! the rerandomizations so that the rerandomized input commitments balance the outputs.

use curve25519_dalek::edwards::CompressedEdwardsY;
use log::debug;

use crate::core_types::*;
use crate::opening::OpeningScalarSecret;
use crate::random::new_random;
use crate::type_macros::*;

define_tiny_scalar_type! {
    /// One of `r_o`, `r_i`, `r_r_i`, `r_c`
    Rerandomization
}

define_tiny_byte_type! {
    /// Hash of everything in a transaction except its membership and SA/L proofs
    SignableTxHash, 32, public
}

/// `(O~, I~, R, C~)`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FcmpInputCompressed {
    pub o_tilde: CompressedEdwardsY,
    pub i_tilde: CompressedEdwardsY,
    pub r: CompressedEdwardsY,
    pub c_tilde: CompressedEdwardsY,
}

/// A rerandomized input together with the scalars that made it
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FcmpRerandomizedOutputCompressed {
    pub input: FcmpInputCompressed,
    pub r_o: Rerandomization,
    pub r_i: Rerandomization,
    pub r_r_i: Rerandomization,
    pub r_c: Rerandomization,
}

/// An output being spent, with the opening of its amount commitment
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RerandomizableInput {
    pub onetime_address: OutputPubkey,
    pub amount_commitment: AmountCommitment,
    pub amount_blinding_factor: AmountBlindingKey,
}

pub trait FcmpPpBackend {
    type SalProof;

    /// `(O~, I~, R, C~)` for the given rerandomizations; `None` if `O` or `C` is not a point
    fn calculate_fcmp_input_for_rerandomizations(
        &self,
        onetime_address: &OutputPubkey,
        amount_commitment: &AmountCommitment,
        r_o: &Rerandomization,
        r_i: &Rerandomization,
        r_r_i: &Rerandomization,
        r_c: &Rerandomization,
    ) -> Option<FcmpInputCompressed>;

    /// Spend authorization and linkability proof for `O = x G + y T`, plus the key image
    fn prove_sal(
        &self,
        signable_tx_hash: &SignableTxHash,
        x: &OpeningScalarSecret,
        y: &OpeningScalarSecret,
        rerandomized_output: &FcmpRerandomizedOutputCompressed,
    ) -> Option<(Self::SalProof, KeyImage)>;
}

/// Recomputes the rerandomized input from `(Ko, C_a)` and the stored scalars and compares
pub fn verify_rerandomized_output_basic<F: FcmpPpBackend + ?Sized>(
    backend: &F,
    rerandomized_output: &FcmpRerandomizedOutputCompressed,
    onetime_address: &OutputPubkey,
    amount_commitment: &AmountCommitment,
) -> bool {
    let recomputed_input = backend.calculate_fcmp_input_for_rerandomizations(
        onetime_address,
        amount_commitment,
        &rerandomized_output.r_o,
        &rerandomized_output.r_i,
        &rerandomized_output.r_r_i,
        &rerandomized_output.r_c,
    );

    let verified = recomputed_input.as_ref() == Some(&rerandomized_output.input);
    if !verified {
        debug!("rerandomized output does not match Ko {:?}", onetime_address);
    }
    verified
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("no inputs to rerandomize")]
    NoInputs,
    #[error("input, rerandomization and output slices differ in length")]
    LengthMismatch,
    #[error("input onetime address or amount commitment is not a point")]
    BadInputPoint,
}

pub type Result<T> = core::result::Result<T, Error>;

/// Fills `rerandomized_outputs_out` given that each entry's `r_o` is already set. Samples `r_i`,
/// `r_r_i`, and every `r_c` but the last, which absorbs the blinding factor imbalance.
fn balance_rerandomized_outputs<F, R>(
    backend: &F,
    inputs: &[RerandomizableInput],
    output_amount_blinding_factor_sum: &AmountBlindingKey,
    rng: &mut R,
    rerandomized_outputs_out: &mut [FcmpRerandomizedOutputCompressed],
) -> Result<()>
where
    F: FcmpPpBackend + ?Sized,
    R: rand_core::CryptoRngCore + ?Sized,
{
    let num_inputs = inputs.len();
    if num_inputs == 0 {
        return Err(Error::NoInputs);
    } else if rerandomized_outputs_out.len() != num_inputs {
        return Err(Error::LengthMismatch);
    }

    // sum(k_a out) - sum(k_a in)
    let mut blinding_factor_imbalance = Rerandomization(
        inputs
            .iter()
            .fold(output_amount_blinding_factor_sum.0, |acc, input| acc - input.amount_blinding_factor.0),
    );

    for (i, (input, rerandomized_output)) in inputs.iter().zip(rerandomized_outputs_out.iter_mut()).enumerate() {
        rerandomized_output.r_i = new_random(rng);
        rerandomized_output.r_r_i = new_random(rng);
        rerandomized_output.r_c = if i == num_inputs - 1 {
            blinding_factor_imbalance.clone()
        } else {
            new_random(rng)
        };
        blinding_factor_imbalance.0 -= rerandomized_output.r_c.0;

        rerandomized_output.input = backend
            .calculate_fcmp_input_for_rerandomizations(
                &input.onetime_address,
                &input.amount_commitment,
                &rerandomized_output.r_o,
                &rerandomized_output.r_i,
                &rerandomized_output.r_r_i,
                &rerandomized_output.r_c,
            )
            .ok_or(Error::BadInputPoint)?;
    }

    debug_assert_eq!(blinding_factor_imbalance.0, Scalar::ZERO);
    Ok(())
}

/// Rerandomizes every input with the given `r_o` such that
/// `sum(C_i + r_c_i G) = sum(C_out)` holds in the blinding factors
pub fn make_balanced_rerandomized_output_set<F, R>(
    backend: &F,
    inputs: &[RerandomizableInput],
    r_o: &[Rerandomization],
    output_amount_blinding_factor_sum: &AmountBlindingKey,
    rng: &mut R,
    rerandomized_outputs_out: &mut [FcmpRerandomizedOutputCompressed],
) -> Result<()>
where
    F: FcmpPpBackend + ?Sized,
    R: rand_core::CryptoRngCore + ?Sized,
{
    if r_o.len() != inputs.len() || rerandomized_outputs_out.len() != inputs.len() {
        return Err(Error::LengthMismatch);
    }

    for (rerandomized_output, r_o) in rerandomized_outputs_out.iter_mut().zip(r_o) {
        rerandomized_output.r_o = r_o.clone();
    }

    balance_rerandomized_outputs(
        backend,
        inputs,
        output_amount_blinding_factor_sum,
        rng,
        rerandomized_outputs_out,
    )
}

/// Rerandomizes inputs for a transaction paying `output_amount_blinding_factors`, with every
/// `r_o` fresh
pub fn make_carrot_rerandomized_outputs_nonrefundable<F, R>(
    backend: &F,
    inputs: &[RerandomizableInput],
    output_amount_blinding_factors: &[AmountBlindingKey],
    rng: &mut R,
    rerandomized_outputs_out: &mut [FcmpRerandomizedOutputCompressed],
) -> Result<()>
where
    F: FcmpPpBackend + ?Sized,
    R: rand_core::CryptoRngCore + ?Sized,
{
    for rerandomized_output in rerandomized_outputs_out.iter_mut() {
        rerandomized_output.r_o = new_random(rng);
    }

    let output_amount_blinding_factor_sum = AmountBlindingKey(
        output_amount_blinding_factors
            .iter()
            .fold(Scalar::ZERO, |acc, k_a| acc + k_a.0),
    );

    balance_rerandomized_outputs(
        backend,
        inputs,
        &output_amount_blinding_factor_sum,
        rng,
        rerandomized_outputs_out,
    )
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::unit_testing::MockFcmpBackend;
    use rand_core::OsRng;

    fn make_input(amount: Amount) -> RerandomizableInput {
        let amount_blinding_factor: AmountBlindingKey = new_random(&mut OsRng);
        RerandomizableInput {
            onetime_address: new_random(&mut OsRng),
            amount_commitment: AmountCommitment::commit(amount, &amount_blinding_factor),
            amount_blinding_factor,
        }
    }

    #[test]
    fn rerandomized_commitments_balance_outputs() {
        let backend = MockFcmpBackend;
        let inputs = [make_input(70), make_input(30), make_input(5)];
        let output_amount_blinding_factors: [AmountBlindingKey; 2] = [new_random(&mut OsRng), new_random(&mut OsRng)];
        let mut rerandomized_outputs: [FcmpRerandomizedOutputCompressed; 3] = Default::default();

        make_carrot_rerandomized_outputs_nonrefundable(
            &backend,
            &inputs,
            &output_amount_blinding_factors,
            &mut OsRng,
            &mut rerandomized_outputs,
        )
        .unwrap();

        // 105 in, 100 + 5 out
        let out_sum = AmountCommitment::commit(100, &output_amount_blinding_factors[0]).decompress().unwrap()
            + AmountCommitment::commit(5, &output_amount_blinding_factors[1]).decompress().unwrap();
        let in_sum = rerandomized_outputs
            .iter()
            .map(|o| o.input.c_tilde.decompress().unwrap())
            .fold(curve25519_dalek::EdwardsPoint::default(), |acc, p| acc + p);
        assert_eq!(in_sum, out_sum);

        for (input, rerandomized_output) in inputs.iter().zip(&rerandomized_outputs) {
            assert!(verify_rerandomized_output_basic(
                &backend,
                rerandomized_output,
                &input.onetime_address,
                &input.amount_commitment
            ));
        }
    }

    #[test]
    fn verification_rejects_substituted_commitment() {
        let backend = MockFcmpBackend;
        let inputs = [make_input(1)];
        let mut rerandomized_outputs: [FcmpRerandomizedOutputCompressed; 1] = Default::default();
        make_balanced_rerandomized_output_set(
            &backend,
            &inputs,
            &[new_random(&mut OsRng)],
            &new_random(&mut OsRng),
            &mut OsRng,
            &mut rerandomized_outputs,
        )
        .unwrap();

        let other = make_input(1);
        assert!(!verify_rerandomized_output_basic(
            &backend,
            &rerandomized_outputs[0],
            &inputs[0].onetime_address,
            &other.amount_commitment
        ));
    }

    #[test]
    fn slice_lengths_are_checked() {
        let backend = MockFcmpBackend;
        let mut rerandomized_outputs: [FcmpRerandomizedOutputCompressed; 1] = Default::default();
        assert_eq!(
            make_carrot_rerandomized_outputs_nonrefundable(&backend, &[], &[], &mut OsRng, &mut []),
            Err(Error::NoInputs)
        );
        assert_eq!(
            make_balanced_rerandomized_output_set(
                &backend,
                &[make_input(1), make_input(2)],
                &[new_random(&mut OsRng), new_random(&mut OsRng)],
                &new_random(&mut OsRng),
                &mut OsRng,
                &mut rerandomized_outputs,
            ),
            Err(Error::LengthMismatch)
        );
    }
}
