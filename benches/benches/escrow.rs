use ark_std::rand::{rngs::StdRng, SeedableRng};
use benches::{setup_uprove, ATTRIBUTE_COUNTS};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use test_utils::{Curve25519, P256};
use uprove::{
    common::compute_token_id,
    group::UProveGroup,
    presentation::{generate_proof, PresentationRequest},
};
use uprove_id_escrow::{
    auditor::Auditor,
    encryption::{verifiable_encrypt, CommittedAttribute},
    verifier::IdEscrowVerifier,
};

const INFO: &[u8] = b"benchmark escrow";

fn escrow_benchmark<G: UProveGroup>(c: &mut Criterion, name: &str) {
    let mut rng = StdRng::seed_from_u64(0u64);
    setup_uprove!(G, rng, attributes_range, params_range, tokens_range);

    // Commit to the first attribute and escrow it
    let committed = [1];
    let request = PresentationRequest::new(&[], b"message").with_committed(&committed);
    let auditors = params_range
        .iter()
        .map(|(ip, _)| Auditor::generate(&mut rng, ip).unwrap())
        .collect::<Vec<_>>();
    let escrowed = (0..ATTRIBUTE_COUNTS.len())
        .map(|i| {
            let (proof, secrets) = generate_proof(
                &mut rng,
                &params_range[i].0,
                &tokens_range[i],
                &attributes_range[i],
                &request,
            )
            .unwrap();
            CommittedAttribute::from_presentation(
                &proof,
                &secrets,
                &committed,
                1,
                &attributes_range[i][0],
            )
            .unwrap()
        })
        .collect::<Vec<_>>();

    let mut encrypt_group = c.benchmark_group(format!("{} verifiable encryption", name));
    for (i, count) in ATTRIBUTE_COUNTS.iter().enumerate() {
        encrypt_group.bench_with_input(BenchmarkId::from_parameter(*count), &i, |b, &i| {
            b.iter(|| {
                verifiable_encrypt(
                    &mut rng,
                    black_box(&params_range[i].0),
                    black_box(auditors[i].params()),
                    black_box(&tokens_range[i].token),
                    black_box(&escrowed[i]),
                    INFO,
                )
                .unwrap()
            });
        });
    }
    encrypt_group.finish();

    let ie_proofs = (0..ATTRIBUTE_COUNTS.len())
        .map(|i| {
            verifiable_encrypt(
                &mut rng,
                &params_range[i].0,
                auditors[i].params(),
                &tokens_range[i].token,
                &escrowed[i],
                INFO,
            )
            .unwrap()
        })
        .collect::<Vec<_>>();

    let mut verify_group = c.benchmark_group(format!("{} escrow verification", name));
    for (i, count) in ATTRIBUTE_COUNTS.iter().enumerate() {
        let verifier = IdEscrowVerifier::new(&params_range[i].0, auditors[i].params());
        let token_id = compute_token_id(&tokens_range[i].token).unwrap();
        verify_group.bench_with_input(BenchmarkId::from_parameter(*count), &i, |b, &i| {
            b.iter(|| {
                assert!(verifier
                    .verify(
                        black_box(&ie_proofs[i]),
                        black_box(&token_id),
                        black_box(&escrowed[i].commitment),
                    )
                    .unwrap())
            });
        });
    }
    verify_group.finish();
}

fn escrow_p256(c: &mut Criterion) {
    escrow_benchmark::<P256>(c, "P-256");
}

fn escrow_curve25519(c: &mut Criterion) {
    escrow_benchmark::<Curve25519>(c, "Curve25519");
}

criterion_group!(benches, escrow_p256, escrow_curve25519);
criterion_main!(benches);
