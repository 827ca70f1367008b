use ark_std::rand::{rngs::StdRng, SeedableRng};
use benches::{setup_uprove, ATTRIBUTE_COUNTS};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use test_utils::{Curve25519, P256};
use uprove::{
    group::UProveGroup,
    presentation::{generate_proof, PresentationRequest, ScopeData, Verifier},
};

const MESSAGE: &[u8] = b"benchmark message";

fn presentation_benchmark<G: UProveGroup>(c: &mut Criterion, name: &str) {
    let mut rng = StdRng::seed_from_u64(0u64);
    setup_uprove!(G, rng, attributes_range, params_range, tokens_range);

    // Disclose the first attribute and hold a pseudonym on the last one
    let disclosed = [1];
    let scopes = ATTRIBUTE_COUNTS
        .iter()
        .map(|c| ScopeData::<G>::new(*c, b"bench.example".to_vec()))
        .collect::<Vec<_>>();
    let requests = ATTRIBUTE_COUNTS
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let request = PresentationRequest::new(&disclosed, MESSAGE);
            if *c > 1 {
                request.with_scope(&scopes[i])
            } else {
                request
            }
        })
        .collect::<Vec<_>>();

    let mut prove_group = c.benchmark_group(format!("{} proof generation", name));
    for (i, count) in ATTRIBUTE_COUNTS.iter().enumerate() {
        prove_group.bench_with_input(BenchmarkId::from_parameter(*count), &i, |b, &i| {
            b.iter(|| {
                generate_proof(
                    &mut rng,
                    black_box(&params_range[i].0),
                    black_box(&tokens_range[i]),
                    black_box(&attributes_range[i]),
                    black_box(&requests[i]),
                )
                .unwrap()
            });
        });
    }
    prove_group.finish();

    let proofs = (0..ATTRIBUTE_COUNTS.len())
        .map(|i| {
            generate_proof(
                &mut rng,
                &params_range[i].0,
                &tokens_range[i],
                &attributes_range[i],
                &requests[i],
            )
            .unwrap()
            .0
        })
        .collect::<Vec<_>>();

    let mut verify_group = c.benchmark_group(format!("{} proof verification", name));
    for (i, count) in ATTRIBUTE_COUNTS.iter().enumerate() {
        let verifier = Verifier::new(&params_range[i].0);
        verify_group.bench_with_input(BenchmarkId::from_parameter(*count), &i, |b, &i| {
            b.iter(|| {
                assert!(verifier
                    .verify(
                        black_box(&proofs[i]),
                        black_box(&tokens_range[i].token),
                        black_box(&requests[i]),
                    )
                    .unwrap())
            });
        });
    }
    verify_group.finish();
}

fn presentation_p256(c: &mut Criterion) {
    presentation_benchmark::<P256>(c, "P-256");
}

fn presentation_curve25519(c: &mut Criterion) {
    presentation_benchmark::<Curve25519>(c, "Curve25519");
}

criterion_group!(benches, presentation_p256, presentation_curve25519);
criterion_main!(benches);
