use ark_ff::Zero;
use ark_std::rand::{prelude::StdRng, SeedableRng};
use test_utils::{
    issuance::{
        issue_tokens, sample_attributes, setup_issuer, PROVER_INFORMATION, TOKEN_INFORMATION,
    },
    Curve25519, P256,
};
use uprove::{
    error::UProveError,
    group::UProveGroup,
    issuance::{IssuerSession, IssuerState, Prover, ProverState},
    issuer_params::IssuerParams,
    messages::{IssuanceState, SerializedIssuerSession},
    presentation::Verifier,
    rng::TestVectorRng,
};

#[test]
fn batch_issuance() {
    fn check<G: UProveGroup>() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let attributes = sample_attributes(5);
        let (ip, key) = setup_issuer::<G, _>(&mut rng, &attributes);
        let verifier = Verifier::new(&ip);

        for num_tokens in [1, 2, 5] {
            let tokens = issue_tokens(&mut rng, &ip, &key, &attributes.encode(), num_tokens);
            assert_eq!(tokens.len(), num_tokens);
            for kat in &tokens {
                assert!(verifier.verify_token_signature(&kat.token).unwrap());
                verifier.ensure_valid_token(&kat.token).unwrap();
                assert_eq!(kat.token.ti, TOKEN_INFORMATION);
                assert_eq!(kat.token.pi, PROVER_INFORMATION);
            }
            // Tokens of a batch share nothing
            for i in 1..tokens.len() {
                assert_ne!(tokens[i].token.h, tokens[0].token.h);
                assert_ne!(tokens[i].key, tokens[0].key);
            }
        }
    }
    check::<P256>();
    check::<Curve25519>();
}

#[test]
fn tampered_tokens_are_rejected() {
    fn check<G: UProveGroup>() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let attributes = sample_attributes(3);
        let (ip, key) = setup_issuer::<G, _>(&mut rng, &attributes);
        let verifier = Verifier::new(&ip);
        let kat = issue_tokens(&mut rng, &ip, &key, &attributes.encode(), 1).remove(0);

        let mut token = kat.token.clone();
        token.pi = b"other prover information".to_vec();
        assert!(!verifier.verify_token_signature(&token).unwrap());
        assert!(matches!(
            verifier.ensure_valid_token(&token),
            Err(UProveError::InvalidTokenSignature(_))
        ));

        let mut token = kat.token.clone();
        token.srp += G::ScalarField::from(1u64);
        assert!(!verifier.verify_token_signature(&token).unwrap());

        let mut token = kat.token.clone();
        token.uidp = b"another issuer".to_vec();
        assert!(!verifier.verify_token_signature(&token).unwrap());

        // A token from another issuer does not verify under these parameters
        let (other_ip, other_key) = setup_issuer::<G, _>(&mut rng, &attributes);
        let other = issue_tokens(&mut rng, &other_ip, &other_key, &attributes.encode(), 1);
        assert!(!verifier.verify_token_signature(&other[0].token).unwrap());
    }
    check::<P256>();
    check::<Curve25519>();
}

#[test]
fn steps_out_of_sequence() {
    let mut rng = StdRng::seed_from_u64(0u64);
    let attributes = sample_attributes(4);
    let encoded = attributes.encode();
    let (ip, key) = setup_issuer::<P256, _>(&mut rng, &attributes);

    let mut issuer =
        IssuerSession::new(&mut rng, &ip, &key, 2, encoded.clone(), TOKEN_INFORMATION.to_vec())
            .unwrap();
    let mut prover = Prover::new(&ip);
    assert_eq!(issuer.state(), IssuerState::Created);
    assert!(matches!(
        issuer.get_third_message(),
        Err(UProveError::OutOfSequence(_))
    ));
    assert!(matches!(
        prover.generate_second_message(
            &mut rng,
            2,
            &encoded,
            TOKEN_INFORMATION,
            PROVER_INFORMATION,
            None,
            false
        ),
        Err(UProveError::OutOfSequence(_))
    ));

    let fm = issuer.get_first_message().unwrap();
    // Repeated requests give the same message
    assert_eq!(issuer.get_first_message().unwrap(), fm);
    assert_eq!(issuer.state(), IssuerState::FirstMessageSent);
    assert!(matches!(
        issuer.get_third_message(),
        Err(UProveError::OutOfSequence(_))
    ));

    prover.receive_first_message(&fm).unwrap();
    assert_eq!(prover.state(), ProverState::FirstMessageParsed);
    assert!(matches!(
        prover.receive_first_message(&fm),
        Err(UProveError::OutOfSequence(_))
    ));
    assert!(matches!(
        prover.issuance_state(),
        Err(UProveError::OutOfSequence(_))
    ));

    // Batch size must match the first message and a failed attempt leaves the prover usable
    assert!(matches!(
        prover.generate_second_message(
            &mut rng,
            3,
            &encoded,
            TOKEN_INFORMATION,
            PROVER_INFORMATION,
            None,
            false
        ),
        Err(UProveError::LengthMismatch(2, 3))
    ));
    assert_eq!(prover.state(), ProverState::FirstMessageParsed);

    let sm = prover
        .generate_second_message(
            &mut rng,
            2,
            &encoded,
            TOKEN_INFORMATION,
            PROVER_INFORMATION,
            None,
            false,
        )
        .unwrap();
    assert_eq!(prover.state(), ProverState::SecondMessageSent);
    issuer.receive_second_message(&sm).unwrap();
    assert!(matches!(
        issuer.receive_second_message(&sm),
        Err(UProveError::OutOfSequence(_))
    ));
    let tm = issuer.get_third_message().unwrap();
    assert_eq!(issuer.get_third_message().unwrap(), tm);
    assert_eq!(issuer.state(), IssuerState::ThirdMessageSent);

    let tokens = prover.generate_tokens(&tm).unwrap();
    assert_eq!(tokens.len(), 2);
    assert_eq!(prover.state(), ProverState::TokensGenerated);
    assert!(matches!(
        prover.generate_tokens(&tm),
        Err(UProveError::OutOfSequence(_))
    ));
}

#[test]
fn bad_messages() {
    let mut rng = StdRng::seed_from_u64(0u64);
    let attributes = sample_attributes(3);
    let encoded = attributes.encode();
    let (ip, key) = setup_issuer::<P256, _>(&mut rng, &attributes);

    assert!(matches!(
        IssuerSession::new(&mut rng, &ip, &key, 0, encoded.clone(), vec![]),
        Err(UProveError::InvalidNumberOfTokens(0))
    ));

    let mut issuer =
        IssuerSession::new(&mut rng, &ip, &key, 1, encoded.clone(), TOKEN_INFORMATION.to_vec())
            .unwrap();
    let mut prover = Prover::new(&ip);
    let mut fm = issuer.get_first_message().unwrap();
    let good_sz = fm.sz.clone();
    fm.sz = vec![1, 2, 3];
    assert!(matches!(
        prover.receive_first_message(&fm),
        Err(UProveError::ParseError {
            what: "first message",
            ..
        })
    ));
    assert_eq!(prover.state(), ProverState::Initialized);
    fm.sz = good_sz;
    prover.receive_first_message(&fm).unwrap();

    let mut sm = prover
        .generate_second_message(
            &mut rng,
            1,
            &encoded,
            TOKEN_INFORMATION,
            PROVER_INFORMATION,
            None,
            false,
        )
        .unwrap();
    sm.sc.push(sm.sc[0].clone());
    assert!(matches!(
        issuer.receive_second_message(&sm),
        Err(UProveError::LengthMismatch(1, 2))
    ));
    sm.sc.pop();
    issuer.receive_second_message(&sm).unwrap();

    // A response that does not match the blinded challenge fails validation without consuming the
    // prover state
    let tm = issuer.get_third_message().unwrap();
    let mut bad_tm = tm.clone();
    bad_tm.sr[0] = tm.sr[0].iter().rev().cloned().collect();
    assert!(prover.generate_tokens(&bad_tm).is_err());
    assert_eq!(prover.state(), ProverState::SecondMessageSent);
    assert_eq!(prover.generate_tokens(&tm).unwrap().len(), 1);
}

#[test]
fn issuer_signing_different_attributes_fails_validation() {
    let mut rng = StdRng::seed_from_u64(0u64);
    let attributes = sample_attributes(3);
    let (ip, key) = setup_issuer::<Curve25519, _>(&mut rng, &attributes);
    let mut other = sample_attributes(3);
    other.add_string_attribute("extra", "x").unwrap();
    let issuer_attributes = other.encode()[1..].to_vec();

    let mut issuer = IssuerSession::new(
        &mut rng,
        &ip,
        &key,
        1,
        issuer_attributes,
        TOKEN_INFORMATION.to_vec(),
    )
    .unwrap();
    let mut prover = Prover::new(&ip);
    prover
        .receive_first_message(&issuer.get_first_message().unwrap())
        .unwrap();
    let sm = prover
        .generate_second_message(
            &mut rng,
            1,
            &attributes.encode(),
            TOKEN_INFORMATION,
            PROVER_INFORMATION,
            None,
            false,
        )
        .unwrap();
    issuer.receive_second_message(&sm).unwrap();
    assert!(matches!(
        prover.generate_tokens(&issuer.get_third_message().unwrap()),
        Err(UProveError::InvalidTokenSignature(0))
    ));
}

#[test]
fn external_gamma_and_skipped_validation() {
    fn check<G: UProveGroup>() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let attributes = sample_attributes(4);
        let encoded = attributes.encode();
        let (ip, key) = setup_issuer::<G, _>(&mut rng, &attributes);
        let gamma =
            uprove::common::compute_gamma(&ip, &encoded, TOKEN_INFORMATION).unwrap();

        let mut issuer =
            IssuerSession::new(&mut rng, &ip, &key, 3, encoded, TOKEN_INFORMATION.to_vec())
                .unwrap();
        let mut prover = Prover::new(&ip);
        prover
            .receive_first_message(&issuer.get_first_message().unwrap())
            .unwrap();
        let sm = prover
            .generate_second_message::<_, Vec<u8>>(
                &mut rng,
                3,
                &[],
                TOKEN_INFORMATION,
                PROVER_INFORMATION,
                Some(gamma),
                true,
            )
            .unwrap();
        // Nothing to validate against so the state has no validation values
        assert!(prover.issuance_state().unwrap().token_validation_value.is_none());
        issuer.receive_second_message(&sm).unwrap();
        let tokens = prover
            .generate_tokens(&issuer.get_third_message().unwrap())
            .unwrap();
        let verifier = Verifier::new(&ip);
        for kat in &tokens {
            assert!(verifier.verify_token_signature(&kat.token).unwrap());
        }
    }
    check::<P256>();
    check::<Curve25519>();
}

#[test]
fn issuer_session_survives_restart() {
    fn check<G: UProveGroup>() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let attributes = sample_attributes(5);
        let encoded = attributes.encode();
        let (ip, key) = setup_issuer::<G, _>(&mut rng, &attributes);
        let mut prover = Prover::new(&ip);

        let (fm, saved, w) = {
            let mut issuer = IssuerSession::new(
                &mut rng,
                &ip,
                &key,
                2,
                encoded.clone(),
                TOKEN_INFORMATION.to_vec(),
            )
            .unwrap();
            let fm = issuer.get_first_message().unwrap();
            let saved: SerializedIssuerSession =
                serde_json::from_str(&serde_json::to_string(&issuer.serialize().unwrap()).unwrap())
                    .unwrap();
            (fm, saved, issuer.serialize_w())
        };

        // The secret nonces are required
        assert!(IssuerSession::load(&saved, &ip, &key, &w[..1]).is_err());

        let mut issuer = IssuerSession::load(&saved, &ip, &key, &w).unwrap();
        assert_eq!(issuer.state(), IssuerState::FirstMessageSent);
        assert_eq!(issuer.num_tokens(), 2);
        assert_eq!(issuer.get_first_message().unwrap(), fm);

        prover.receive_first_message(&fm).unwrap();
        let sm = prover
            .generate_second_message(
                &mut rng,
                2,
                &encoded,
                TOKEN_INFORMATION,
                PROVER_INFORMATION,
                None,
                false,
            )
            .unwrap();
        issuer.receive_second_message(&sm).unwrap();

        let saved = issuer.serialize().unwrap();
        let w = issuer.serialize_w();
        drop(issuer);
        let mut issuer = IssuerSession::load(&saved, &ip, &key, &w).unwrap();
        assert_eq!(issuer.state(), IssuerState::SecondMessageReceived);

        let tokens = prover
            .generate_tokens(&issuer.get_third_message().unwrap())
            .unwrap();
        let verifier = Verifier::new(&ip);
        assert!(tokens
            .iter()
            .all(|kat| verifier.verify_token_signature(&kat.token).unwrap()));

        // Sessions can only be loaded under the parameters they were created with
        let (other_ip, _) = setup_issuer::<G, _>(&mut rng, &attributes);
        assert!(IssuerSession::load(&saved, &other_ip, &key, &w).is_err());
    }
    check::<P256>();
    check::<Curve25519>();
}

#[test]
fn restored_session_must_match_batch_size() {
    fn check<G: UProveGroup>() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let attributes = sample_attributes(3);
        let encoded = attributes.encode();
        let (ip, key) = setup_issuer::<G, _>(&mut rng, &attributes);

        let mut issuer =
            IssuerSession::new(&mut rng, &ip, &key, 3, encoded.clone(), TOKEN_INFORMATION.to_vec())
                .unwrap();
        let mut prover = Prover::new(&ip);
        prover
            .receive_first_message(&issuer.get_first_message().unwrap())
            .unwrap();
        let sm = prover
            .generate_second_message(
                &mut rng,
                3,
                &encoded,
                TOKEN_INFORMATION,
                PROVER_INFORMATION,
                None,
                false,
            )
            .unwrap();
        issuer.receive_second_message(&sm).unwrap();
        let saved = issuer.serialize().unwrap();
        let w = issuer.serialize_w();

        let mut short_second = saved.clone();
        short_second.second_message.as_mut().unwrap().sc.pop();
        assert!(matches!(
            IssuerSession::load(&short_second, &ip, &key, &w),
            Err(UProveError::LengthMismatch(3, 2))
        ));

        let mut short_first = saved.clone();
        let fm = short_first.first_message.as_mut().unwrap();
        fm.sa.truncate(1);
        fm.sb.truncate(1);
        assert!(matches!(
            IssuerSession::load(&short_first, &ip, &key, &w),
            Err(UProveError::LengthMismatch(3, 1))
        ));

        let tm = issuer.get_third_message().unwrap();
        assert_eq!(tm.sr.len(), 3);
        let mut long_third = issuer.serialize().unwrap();
        let extra = tm.sr[0].clone();
        long_third.third_message.as_mut().unwrap().sr.push(extra);
        assert!(matches!(
            IssuerSession::load(&long_third, &ip, &key, &w),
            Err(UProveError::LengthMismatch(3, 4))
        ));

        let mut restored = IssuerSession::load(&saved, &ip, &key, &w).unwrap();
        assert_eq!(restored.get_third_message().unwrap(), tm);
    }
    check::<P256>();
    check::<Curve25519>();
}

#[test]
fn prover_resumes_from_issuance_state() {
    fn check<G: UProveGroup>() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let attributes = sample_attributes(3);
        let encoded = attributes.encode();
        let (ip, key) = setup_issuer::<G, _>(&mut rng, &attributes);

        let mut issuer =
            IssuerSession::new(&mut rng, &ip, &key, 2, encoded.clone(), TOKEN_INFORMATION.to_vec())
                .unwrap();
        let state = {
            let mut prover = Prover::new(&ip);
            prover
                .receive_first_message(&issuer.get_first_message().unwrap())
                .unwrap();
            let sm = prover
                .generate_second_message(
                    &mut rng,
                    2,
                    &encoded,
                    TOKEN_INFORMATION,
                    PROVER_INFORMATION,
                    None,
                    false,
                )
                .unwrap();
            issuer.receive_second_message(&sm).unwrap();
            prover.issuance_state().unwrap()
        };
        let state: IssuanceState =
            serde_json::from_str(&serde_json::to_string(&state).unwrap()).unwrap();
        assert_eq!(state.h.len(), 2);
        assert!(state.token_validation_value.is_some());

        let mut bad_state = state.clone();
        bad_state.beta2.pop();
        let mut prover = Prover::new(&ip);
        assert!(matches!(
            prover.set_issuance_state(&bad_state, TOKEN_INFORMATION, PROVER_INFORMATION),
            Err(UProveError::ParseError {
                what: "issuance state",
                ..
            })
        ));
        assert_eq!(prover.state(), ProverState::Initialized);

        prover
            .set_issuance_state(&state, TOKEN_INFORMATION, PROVER_INFORMATION)
            .unwrap();
        assert_eq!(prover.state(), ProverState::SecondMessageSent);
        let tokens = prover
            .generate_tokens(&issuer.get_third_message().unwrap())
            .unwrap();
        assert_eq!(tokens.len(), 2);
        let verifier = Verifier::new(&ip);
        for kat in &tokens {
            assert!(verifier.verify_token_signature(&kat.token).unwrap());
            assert_eq!(kat.token.pi, PROVER_INFORMATION);
        }
    }
    check::<P256>();
    check::<Curve25519>();
}

#[test]
fn random_source_of_zeros() {
    fn check<G: UProveGroup>() {
        let zeros = || TestVectorRng::new(vec![G::ScalarField::zero(); 3]).unwrap();
        assert!(matches!(
            IssuerParams::<G>::generate(&mut zeros(), b"issuer".to_vec(), vec![0, 0], vec![]),
            Err(UProveError::InvalidRandomSource(_))
        ));

        let mut rng = StdRng::seed_from_u64(0u64);
        let attributes = sample_attributes(2);
        let encoded = attributes.encode();
        let (ip, key) = setup_issuer::<G, _>(&mut rng, &attributes);
        let mut issuer =
            IssuerSession::new(&mut rng, &ip, &key, 1, encoded.clone(), TOKEN_INFORMATION.to_vec())
                .unwrap();
        let mut prover = Prover::new(&ip);
        prover
            .receive_first_message(&issuer.get_first_message().unwrap())
            .unwrap();
        assert!(matches!(
            prover.generate_second_message(
                &mut zeros(),
                1,
                &encoded,
                TOKEN_INFORMATION,
                PROVER_INFORMATION,
                None,
                false,
            ),
            Err(UProveError::InvalidRandomSource(_))
        ));
        assert_eq!(prover.state(), ProverState::FirstMessageParsed);

        // Zeros are skipped as long as a non-zero value follows within one pass
        let mut values = vec![G::ScalarField::zero(); 2];
        values.extend((1..=3u64).map(G::ScalarField::from));
        let sm = prover
            .generate_second_message(
                &mut TestVectorRng::new(values).unwrap(),
                1,
                &encoded,
                TOKEN_INFORMATION,
                PROVER_INFORMATION,
                None,
                false,
            )
            .unwrap();
        issuer.receive_second_message(&sm).unwrap();
        let tokens = prover
            .generate_tokens(&issuer.get_third_message().unwrap())
            .unwrap();
        assert_eq!(tokens.len(), 1);
    }
    check::<P256>();
    check::<Curve25519>();
}
