// Hardcoding sizes. These should ideally be taken/updated from command line input
pub const ATTRIBUTE_COUNTS: [usize; 5] = [1, 5, 10, 25, 50];
pub const BATCH_SIZES: [usize; 4] = [1, 5, 10, 20];

/// Creates, for each of `ATTRIBUTE_COUNTS`, the attributes, issuer parameters with key and one token
#[macro_export]
macro_rules! setup_uprove {
    ($group: ty, $rng: ident, $attributes_range: ident, $params_range: ident, $tokens_range: ident) => {
        let $attributes_range = benches::ATTRIBUTE_COUNTS
            .iter()
            .map(|c| test_utils::issuance::sample_attributes(*c).encode())
            .collect::<Vec<_>>();
        let $params_range = benches::ATTRIBUTE_COUNTS
            .iter()
            .map(|c| {
                test_utils::issuance::setup_issuer::<$group, _>(
                    &mut $rng,
                    &test_utils::issuance::sample_attributes(*c),
                )
            })
            .collect::<Vec<_>>();
        let $tokens_range = $params_range
            .iter()
            .zip($attributes_range.iter())
            .map(|((ip, key), attributes)| {
                test_utils::issuance::issue_tokens(&mut $rng, ip, key, attributes, 1).remove(0)
            })
            .collect::<Vec<_>>();
    };
}
