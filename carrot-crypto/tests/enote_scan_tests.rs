mod common;
use crate::common::keys::MockKeys;
use crate::common::random::*;

use carrot_crypto::account::AddressSpendPubkey;
use carrot_crypto::payments::{CarrotPaymentProposalSelfSendV1, CarrotPaymentProposalV1, RCTOutputEnoteProposal};
use carrot_crypto::*;

fn assert_commitment_opens(enote_proposal: &RCTOutputEnoteProposal) {
    let recomputed_amount_commitment =
        AmountCommitment::commit(enote_proposal.amount, &enote_proposal.amount_blinding_factor);
    assert_eq!(enote_proposal.enote.amount_commitment, recomputed_amount_commitment);
}

fn scan_external(
    keys: &MockKeys,
    derive_type: AddressDeriveType,
    enote: &CarrotEnoteV1,
    encrypted_payment_id: Option<&EncryptedPaymentId>,
) -> Option<scan::CarrotEnoteScan> {
    let k_view_incoming = keys.k_view_incoming(Some(derive_type));
    let s_sender_receiver_unctx =
        scan::make_carrot_uncontextualized_shared_key_receiver(k_view_incoming, &enote.enote_ephemeral_pubkey)
            .expect("make_carrot_uncontextualized_shared_key_receiver");

    scan::try_scan_carrot_enote_external_receiver(
        enote,
        encrypted_payment_id,
        &s_sender_receiver_unctx,
        k_view_incoming,
        core::slice::from_ref(keys.main_address_spend_pubkey(Some(derive_type))),
    )
}

fn normal_scan_completeness(keys: &MockKeys, destination: CarrotDestinationV1, derive_type: AddressDeriveType) {
    let proposal = CarrotPaymentProposalV1 {
        destination,
        amount: gen_random(),
        randomness: gen_janus_anchor(),
    };

    let (enote_proposal, encrypted_payment_id) = proposal
        .get_normal_output_proposal(gen_random())
        .expect("get_normal_output_proposal");

    assert_eq!(proposal.amount, enote_proposal.amount);
    assert_commitment_opens(&enote_proposal);

    let scan = scan_external(keys, derive_type, &enote_proposal.enote, Some(&encrypted_payment_id))
        .expect("try_scan_carrot_enote_external_receiver");

    // check recovered data
    assert_eq!(proposal.destination.address_spend_pubkey, scan.address_spend_pubkey);
    assert_eq!(proposal.amount, scan.amount);
    assert_eq!(enote_proposal.amount_blinding_factor, scan.amount_blinding_factor);
    assert_eq!(proposal.destination.payment_id, scan.payment_id);
    assert_eq!(CarrotEnoteType::Payment, scan.enote_type);
    assert_eq!(proposal.randomness, scan.janus_anchor);

    // check spendability
    assert!(keys.can_open_fcmp_onetime_address(
        &scan.address_spend_pubkey,
        &scan.sender_extension_g,
        &scan.sender_extension_t,
        &enote_proposal.enote.onetime_address
    ));
}

#[test]
fn main_address_normal_scan_completeness() {
    let keys: MockKeys = gen_random_with_params(AddressDeriveType::Carrot);
    normal_scan_completeness(&keys, keys.main_address(None), AddressDeriveType::Carrot);
}

#[test]
fn subaddress_normal_scan_completeness() {
    let keys: MockKeys = gen_random_with_params(AddressDeriveType::Carrot);
    let subaddress = keys.subaddress(&gen_subaddress_index(AddressDeriveType::Carrot));
    normal_scan_completeness(&keys, subaddress, AddressDeriveType::Carrot);
}

#[test]
fn integrated_address_normal_scan_completeness() {
    let keys: MockKeys = gen_random_with_params(AddressDeriveType::Carrot);
    let integrated_address = keys.integrated_address(gen_non_null_payment_id(), None);
    normal_scan_completeness(&keys, integrated_address, AddressDeriveType::Carrot);
}

#[test]
fn legacy_main_address_normal_scan_completeness() {
    let keys: MockKeys = gen_random_with_params(AddressDeriveType::PreCarrot);
    normal_scan_completeness(&keys, keys.main_address(None), AddressDeriveType::PreCarrot);
}

#[test]
fn legacy_subaddress_normal_scan_completeness() {
    let keys: MockKeys = gen_random_with_params(AddressDeriveType::PreCarrot);
    let subaddress = keys.subaddress(&gen_subaddress_index(AddressDeriveType::PreCarrot));
    normal_scan_completeness(&keys, subaddress, AddressDeriveType::PreCarrot);
}

#[test]
fn integrated_address_scan_without_pid_enc_fails() {
    let keys: MockKeys = gen_random_with_params(AddressDeriveType::Carrot);
    let proposal = CarrotPaymentProposalV1 {
        destination: keys.integrated_address(gen_non_null_payment_id(), None),
        amount: gen_random(),
        randomness: gen_janus_anchor(),
    };
    let (enote_proposal, _) = proposal.get_normal_output_proposal(gen_random()).unwrap();

    // d_e commits to the payment ID, so a null pid' cannot pass the normal check
    assert!(scan_external(&keys, AddressDeriveType::Carrot, &enote_proposal.enote, None).is_none());
}

fn selfsend_proposal(
    address_spend_pubkey: &AddressSpendPubkey,
    enote_type: CarrotEnoteType,
    internal_message: Option<JanusAnchor>,
) -> CarrotPaymentProposalSelfSendV1 {
    CarrotPaymentProposalSelfSendV1 {
        destination_address_spend_pubkey: address_spend_pubkey.clone(),
        amount: gen_random(),
        enote_type,
        enote_ephemeral_pubkey: Some(gen_random()),
        internal_message,
    }
}

#[test]
fn special_scan_completeness() {
    let keys: MockKeys = gen_random_with_params(AddressDeriveType::Carrot);
    let subaddresses = [
        keys.main_address(None),
        keys.subaddress(&gen_subaddress_index(AddressDeriveType::Carrot)),
    ];

    for subaddress in subaddresses {
        for enote_type in [CarrotEnoteType::Payment, CarrotEnoteType::Change] {
            let proposal = selfsend_proposal(&subaddress.address_spend_pubkey, enote_type, None);
            let enote_proposal = proposal
                .get_special_output_proposal(&keys.carrot, gen_random(), None)
                .expect("get_special_output_proposal");

            assert_eq!(proposal.amount, enote_proposal.amount);
            assert_commitment_opens(&enote_proposal);

            let scan = scan_external(&keys, AddressDeriveType::Carrot, &enote_proposal.enote, None)
                .expect("try_scan_carrot_enote_external_receiver");

            assert_eq!(proposal.destination_address_spend_pubkey, scan.address_spend_pubkey);
            assert_eq!(proposal.amount, scan.amount);
            assert_eq!(enote_proposal.amount_blinding_factor, scan.amount_blinding_factor);
            assert_eq!(NULL_PAYMENT_ID, scan.payment_id);
            assert_eq!(enote_type, scan.enote_type);

            assert!(keys.can_open_fcmp_onetime_address(
                &scan.address_spend_pubkey,
                &scan.sender_extension_g,
                &scan.sender_extension_t,
                &enote_proposal.enote.onetime_address
            ));
        }
    }
}

#[test]
fn internal_scan_completeness() {
    let keys: MockKeys = gen_random_with_params(AddressDeriveType::Carrot);
    let subaddress = keys.subaddress(&gen_subaddress_index(AddressDeriveType::Carrot));

    for enote_type in [CarrotEnoteType::Payment, CarrotEnoteType::Change] {
        let proposal = selfsend_proposal(&subaddress.address_spend_pubkey, enote_type, Some(gen_janus_anchor()));
        let enote_proposal = proposal
            .get_internal_output_proposal(&keys.carrot, gen_random(), None)
            .expect("get_internal_output_proposal");

        assert_eq!(proposal.amount, enote_proposal.amount);
        assert_commitment_opens(&enote_proposal);

        let scan = scan::try_scan_carrot_enote_internal_receiver(&enote_proposal.enote, &keys.carrot)
            .expect("try_scan_carrot_enote_internal_receiver");

        assert_eq!(proposal.destination_address_spend_pubkey, scan.address_spend_pubkey);
        assert_eq!(proposal.amount, scan.amount);
        assert_eq!(enote_proposal.amount_blinding_factor, scan.amount_blinding_factor);
        assert_eq!(enote_type, scan.enote_type);
        assert_eq!(proposal.internal_message, Some(scan.janus_anchor));

        assert!(keys.can_open_fcmp_onetime_address(
            &scan.address_spend_pubkey,
            &scan.sender_extension_g,
            &scan.sender_extension_t,
            &enote_proposal.enote.onetime_address
        ));

        // internal enotes are invisible to the external path
        assert!(scan_external(&keys, AddressDeriveType::Carrot, &enote_proposal.enote, None).is_none());
    }
}

#[test]
fn main_address_coinbase_scan_completeness() {
    let keys: MockKeys = gen_random_with_params(AddressDeriveType::Carrot);

    let proposal = CarrotPaymentProposalV1 {
        destination: keys.main_address(None),
        amount: gen_random(),
        randomness: gen_janus_anchor(),
    };

    let enote = proposal
        .get_coinbase_output_proposal(gen_block_index())
        .expect("get_coinbase_output_proposal");

    assert_eq!(proposal.amount, enote.amount);

    let scan = scan::try_ecdh_and_scan_carrot_coinbase_enote(
        &enote,
        keys.carrot.view_incoming_key(),
        core::slice::from_ref(keys.carrot.account_spend_pubkey()),
    )
    .expect("try_ecdh_and_scan_carrot_coinbase_enote");

    assert_eq!(keys.carrot.account_spend_pubkey(), &scan.address_spend_pubkey);

    // check spendability
    assert!(keys.can_open_fcmp_onetime_address(
        &scan.address_spend_pubkey,
        &scan.sender_extension_g,
        &scan.sender_extension_t,
        &enote.onetime_address
    ));

    // the payer can re-derive it from anchor_norm
    assert_eq!(
        scan::try_scan_carrot_coinbase_enote_sender(&enote, &proposal.destination, &proposal.randomness),
        Some(scan)
    );
}
