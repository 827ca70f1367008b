use ark_std::rand::{rngs::StdRng, SeedableRng};
use benches::BATCH_SIZES;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use test_utils::{
    issuance::{
        sample_attributes, setup_issuer, PROVER_INFORMATION, TOKEN_INFORMATION,
    },
    P256,
};
use uprove::issuance::{IssuerSession, Prover};

fn issuance_benchmark(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0u64);
    let attributes = sample_attributes(10);
    let encoded = attributes.encode();
    let (ip, key) = setup_issuer::<P256, _>(&mut rng, &attributes);

    let mut first_group = c.benchmark_group("Issuer first message");
    for count in BATCH_SIZES {
        first_group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| {
                let mut issuer = IssuerSession::new(
                    &mut rng,
                    &ip,
                    &key,
                    count,
                    encoded.clone(),
                    TOKEN_INFORMATION.to_vec(),
                )
                .unwrap();
                black_box(issuer.get_first_message().unwrap())
            });
        });
    }
    first_group.finish();

    let mut second_group = c.benchmark_group("Prover second message");
    for count in BATCH_SIZES {
        let mut issuer = IssuerSession::new(
            &mut rng,
            &ip,
            &key,
            count,
            encoded.clone(),
            TOKEN_INFORMATION.to_vec(),
        )
        .unwrap();
        let fm = issuer.get_first_message().unwrap();
        second_group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| {
                let mut prover = Prover::new(&ip);
                prover.receive_first_message(&fm).unwrap();
                black_box(
                    prover
                        .generate_second_message(
                            &mut rng,
                            count,
                            &encoded,
                            TOKEN_INFORMATION,
                            PROVER_INFORMATION,
                            None,
                            false,
                        )
                        .unwrap(),
                )
            });
        });
    }
    second_group.finish();

    let mut tokens_group = c.benchmark_group("Prover generate tokens");
    for count in BATCH_SIZES {
        let mut issuer = IssuerSession::new(
            &mut rng,
            &ip,
            &key,
            count,
            encoded.clone(),
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
                count,
                &encoded,
                TOKEN_INFORMATION,
                PROVER_INFORMATION,
                None,
                false,
            )
            .unwrap();
        issuer.receive_second_message(&sm).unwrap();
        let tm = issuer.get_third_message().unwrap();
        let state = prover.issuance_state().unwrap();
        tokens_group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| {
                let mut prover = Prover::new(&ip);
                prover
                    .set_issuance_state(&state, TOKEN_INFORMATION, PROVER_INFORMATION)
                    .unwrap();
                black_box(prover.generate_tokens(&tm).unwrap())
            });
        });
    }
    tokens_group.finish();
}

criterion_group!(benches, issuance_benchmark);
criterion_main!(benches);
