use crate::{
    common::{compute_token_id, compute_x, generate_challenge, hash_element, multi_mod_exp},
    error::UProveError,
    group::UProveGroup,
    issuer_params::IssuerParams,
    presentation::{PresentationRequest, Proof, ScopeData},
    rng::RandomNumberGenerator,
    token::KeyAndToken,
};
use ark_ec::CurveGroup;
use ark_ff::PrimeField;
use ark_std::{end_timer, start_timer, vec, vec::Vec};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Openings `o_i` of the commitments in a proof, in increasing order of committed index. Needed to
/// later prove statements about the committed attributes.
#[derive(Clone, Debug, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct CommitmentSecrets<F: PrimeField> {
    pub tilde_o: Vec<F>,
}

/// Create a presentation proof for the token in `key_and_token` over its encoded `attributes`.
/// Randomness is drawn in the order `w_0`, then for each undisclosed attribute `w_i` followed by
/// `o_i, w'_i` when it is committed.
pub fn generate_proof<G: UProveGroup, R: RandomNumberGenerator<G::ScalarField>, B: AsRef<[u8]>>(
    rng: &mut R,
    ip: &IssuerParams<G>,
    key_and_token: &KeyAndToken<G>,
    attributes: &[B],
    request: &PresentationRequest<G>,
) -> Result<(Proof<G>, CommitmentSecrets<G::ScalarField>), UProveError> {
    let n = ip.n();
    if attributes.len() != n {
        return Err(UProveError::LengthMismatch(n, attributes.len()));
    }
    let (disclosed_indices, committed_indices) = request.sorted_indices(n)?;
    let timer = start_timer!(|| "Generate presentation proof");
    let token = &key_and_token.token;
    let g = ip.g();
    let generator = ip.generator();

    let mut disclosed = Vec::with_capacity(disclosed_indices.len());
    let mut disclosed_x = Vec::with_capacity(disclosed_indices.len());
    let mut undisclosed_x = Vec::with_capacity(n - disclosed_indices.len());
    let mut bases = Vec::with_capacity(1 + n - disclosed_indices.len());
    let mut w = Vec::with_capacity(1 + n - disclosed_indices.len());
    let mut tilde_o = Vec::with_capacity(committed_indices.len());
    let mut tilde_w = Vec::with_capacity(committed_indices.len());
    let mut tilde_c = Vec::with_capacity(committed_indices.len());
    let mut tilde_a = Vec::with_capacity(committed_indices.len());
    // Position in `w` of the pseudonym attribute
    let mut wp_index = 0;

    w.push(rng.random_zq_element());
    bases.push(token.h);
    for i in 1..=n {
        let attribute = attributes[i - 1].as_ref();
        let x = compute_x::<G::ScalarField>(Some(attribute), ip.e()[i - 1])?;
        if disclosed_indices.binary_search(&i).is_ok() {
            disclosed.push(attribute.to_vec());
            disclosed_x.push(x);
            continue;
        }
        let w_i = rng.random_zq_element();
        if request.scope.map(|s| s.p) == Some(i) {
            wp_index = w.len();
        }
        if committed_indices.binary_search(&i).is_ok() {
            let o = rng.random_zq_element();
            let w_prime = rng.random_zq_element();
            tilde_c.push((generator * x + g[1] * o).into_affine());
            tilde_a.push(hash_element(&(generator * w_i + g[1] * w_prime).into_affine())?);
            tilde_o.push(o);
            tilde_w.push(w_prime);
        }
        w.push(w_i);
        bases.push(g[i]);
        undisclosed_x.push(x);
    }

    let a = hash_element(&multi_mod_exp(&bases, &w)?.into_affine())?;
    let (ap, ps) = match request.scope {
        Some(scope) => {
            let gs = scope.scope_element()?;
            let x_p = compute_x::<G::ScalarField>(
                Some(attributes[scope.p - 1].as_ref()),
                ip.e()[scope.p - 1],
            )?;
            (
                Some(hash_element(&(gs * w[wp_index]).into_affine())?),
                Some((gs * x_p).into_affine()),
            )
        }
        None => (None, None),
    };

    let c = generate_challenge::<G>(
        &compute_token_id(token)?,
        &a,
        &disclosed_indices,
        &disclosed_x,
        &committed_indices,
        &tilde_c,
        &tilde_a,
        request.scope.map(|s| s.p).unwrap_or(0),
        ap.as_ref().map(|ap| ap.as_slice()),
        ps.as_ref(),
        request.message,
        request.device_message,
    )?;

    let mut r = vec![c * key_and_token.key + w[0]];
    r.extend(
        undisclosed_x
            .iter()
            .zip(w.iter().skip(1))
            .map(|(x, w_i)| -c * x + w_i),
    );
    let tr = tilde_o
        .iter()
        .zip(tilde_w.iter())
        .map(|(o, w_prime)| -c * o + w_prime)
        .collect::<Vec<_>>();

    w.zeroize();
    tilde_w.zeroize();
    undisclosed_x.zeroize();
    end_timer!(timer);
    Ok((
        Proof {
            disclosed,
            a,
            r,
            ap,
            ps,
            tc: tilde_c,
            ta: tilde_a,
            tr,
        },
        CommitmentSecrets { tilde_o },
    ))
}

/// Pseudonym `gs^x_p` of the attribute `scope.p` among the encoded `attributes`
pub fn compute_pseudonym<G: UProveGroup, B: AsRef<[u8]>>(
    ip: &IssuerParams<G>,
    scope: &ScopeData<G>,
    attributes: &[B],
) -> Result<G, UProveError> {
    let n = ip.n();
    if attributes.len() != n {
        return Err(UProveError::LengthMismatch(n, attributes.len()));
    }
    PresentationRequest::new(&[], &[]).with_scope(scope).sorted_indices(n)?;
    let x_p = compute_x::<G::ScalarField>(
        Some(attributes[scope.p - 1].as_ref()),
        ip.e()[scope.p - 1],
    )?;
    Ok((scope.scope_element()? * x_p).into_affine())
}
