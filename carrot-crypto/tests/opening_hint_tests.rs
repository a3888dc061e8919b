mod common;
use crate::common::keys::MockKeys;
use crate::common::random::*;

use carrot_crypto::account::AddressSpendPubkey;
use carrot_crypto::device::{ViewBalanceSecretDevice, ViewIncomingKeyDevice};
use carrot_crypto::opening_hint::*;
use carrot_crypto::payments::{CarrotPaymentProposalSelfSendV1, CarrotPaymentProposalV1};
use carrot_crypto::*;

fn assert_hint_opens(
    keys: &MockKeys,
    hint: &OutputOpeningHintVariant,
    k_view_dev: Option<&dyn ViewIncomingKeyDevice>,
    s_view_balance_dev: Option<&dyn ViewBalanceSecretDevice>,
    expected_amount: Amount,
) {
    let subaddr_index = hint.subaddress_index_ref();
    let main_address_spend_pubkeys = [keys.main_address_spend_pubkey(Some(subaddr_index.derive_type)).clone()];

    let (sender_extension_g, sender_extension_t) = try_scan_opening_hint_sender_extensions(
        hint,
        &main_address_spend_pubkeys,
        k_view_dev,
        s_view_balance_dev,
    )
    .expect("try_scan_opening_hint_sender_extensions");

    let address_spend_pubkey: AddressSpendPubkey = keys.subaddress(&subaddr_index).address_spend_pubkey;
    assert!(keys.can_open_fcmp_onetime_address(
        &address_spend_pubkey,
        &sender_extension_g,
        &sender_extension_t,
        hint.onetime_address_ref()
    ));

    let (amount, amount_blinding_factor) =
        try_scan_opening_hint_amount(hint, &main_address_spend_pubkeys, k_view_dev, s_view_balance_dev)
            .expect("try_scan_opening_hint_amount");
    assert_eq!(expected_amount, amount);
    assert_eq!(
        hint.amount_commitment_ref(),
        AmountCommitment::commit(amount, &amount_blinding_factor)
    );
}

#[test]
fn carrot_subaddress_hint_opens() {
    let keys: MockKeys = gen_random_with_params(AddressDeriveType::Carrot);
    let subaddr_index = gen_subaddress_index(AddressDeriveType::Carrot);
    let proposal = CarrotPaymentProposalV1 {
        destination: keys.subaddress(&subaddr_index),
        amount: gen_random(),
        randomness: gen_janus_anchor(),
    };
    let (enote_proposal, encrypted_payment_id) = proposal.get_normal_output_proposal(gen_random()).unwrap();

    let hint = OutputOpeningHintVariant::from(CarrotOutputOpeningHintV1 {
        source_enote: enote_proposal.enote,
        encrypted_payment_id: Some(encrypted_payment_id),
        subaddr_index,
    });
    assert_hint_opens(&keys, &hint, Some(&keys.carrot), Some(&keys.carrot), proposal.amount);
}

#[test]
fn carrot_internal_hint_opens_with_view_balance_only() {
    let keys: MockKeys = gen_random_with_params(AddressDeriveType::Carrot);
    let proposal = CarrotPaymentProposalSelfSendV1 {
        destination_address_spend_pubkey: keys.main_address_spend_pubkey(None).clone(),
        amount: gen_random(),
        enote_type: CarrotEnoteType::Change,
        enote_ephemeral_pubkey: Some(gen_random()),
        internal_message: None,
    };
    let enote_proposal = proposal
        .get_internal_output_proposal(&keys.carrot, gen_random(), None)
        .unwrap();

    let hint = OutputOpeningHintVariant::from(CarrotOutputOpeningHintV1 {
        source_enote: enote_proposal.enote,
        encrypted_payment_id: None,
        subaddr_index: SubaddressIndexExtended {
            index: SubaddressIndex::MAIN,
            derive_type: AddressDeriveType::Carrot,
        },
    });
    assert_hint_opens(&keys, &hint, None, Some(&keys.carrot), proposal.amount);
}

#[test]
fn coinbase_hint_opens() {
    let keys: MockKeys = gen_random_with_params(AddressDeriveType::Carrot);
    let proposal = CarrotPaymentProposalV1 {
        destination: keys.main_address(None),
        amount: gen_random(),
        randomness: gen_janus_anchor(),
    };
    let enote = proposal.get_coinbase_output_proposal(gen_block_index()).unwrap();

    let hint = OutputOpeningHintVariant::from(CarrotCoinbaseOutputOpeningHintV1 {
        source_enote: enote,
        derive_type: AddressDeriveType::Carrot,
    });
    assert_hint_opens(&keys, &hint, Some(&keys.carrot), None, proposal.amount);
}

#[test]
fn carrot_enote_to_legacy_subaddress_hint_opens() {
    let keys: MockKeys = gen_random_with_params(AddressDeriveType::PreCarrot);
    let subaddr_index = gen_subaddress_index(AddressDeriveType::PreCarrot);
    let proposal = CarrotPaymentProposalV1 {
        destination: keys.subaddress(&subaddr_index),
        amount: gen_random(),
        randomness: gen_janus_anchor(),
    };
    let (enote_proposal, encrypted_payment_id) = proposal.get_normal_output_proposal(gen_random()).unwrap();

    let hint = OutputOpeningHintVariant::from(CarrotOutputOpeningHintV1 {
        source_enote: enote_proposal.enote,
        encrypted_payment_id: Some(encrypted_payment_id),
        subaddr_index,
    });
    assert_hint_opens(&keys, &hint, Some(&keys.legacy), None, proposal.amount);
}

#[test]
fn hint_for_someone_else_does_not_open() {
    let keys: MockKeys = gen_random_with_params(AddressDeriveType::Carrot);
    let other_keys: MockKeys = gen_random_with_params(AddressDeriveType::Carrot);
    let proposal = CarrotPaymentProposalV1 {
        destination: other_keys.main_address(None),
        amount: gen_random(),
        randomness: gen_janus_anchor(),
    };
    let (enote_proposal, encrypted_payment_id) = proposal.get_normal_output_proposal(gen_random()).unwrap();

    let hint = OutputOpeningHintVariant::from(CarrotOutputOpeningHintV1 {
        source_enote: enote_proposal.enote,
        encrypted_payment_id: Some(encrypted_payment_id),
        subaddr_index: SubaddressIndexExtended {
            index: SubaddressIndex::MAIN,
            derive_type: AddressDeriveType::Carrot,
        },
    });
    let main_address_spend_pubkeys = [keys.main_address_spend_pubkey(None).clone()];
    assert_eq!(
        try_scan_opening_hint_sender_extensions(
            &hint,
            &main_address_spend_pubkeys,
            Some(&keys.carrot),
            Some(&keys.carrot)
        ),
        None
    );
}
