use crate::{
    common::{
        compute_sigma_c_prime, compute_token_id, compute_x, compute_xt, digest_from_wire,
        element_from_wire, elements_from_wire, generate_challenge, hash_element, multi_mod_exp,
        scalars_from_wire,
    },
    error::UProveError,
    group::UProveGroup,
    issuer_params::IssuerParams,
    messages::SerializedProof,
    presentation::{PresentationRequest, Proof},
    token::UProveToken,
};
use ark_ec::CurveGroup;
use ark_std::{end_timer, start_timer, vec::Vec};

/// Checks tokens and presentation proofs against issuer parameters. Verification returns `Ok(false)`
/// for well formed input that does not verify and an error for malformed input.
pub struct Verifier<'a, G: UProveGroup> {
    ip: &'a IssuerParams<G>,
}

impl<'a, G: UProveGroup> Verifier<'a, G> {
    pub fn new(ip: &'a IssuerParams<G>) -> Self {
        Self { ip }
    }

    pub fn parse_proof(&self, ser: &SerializedProof) -> Result<Proof<G>, UProveError> {
        let parse = || -> Result<Proof<G>, UProveError> {
            let digests = |list: &Option<Vec<Vec<u8>>>, what| {
                list.iter()
                    .flatten()
                    .map(|d| digest_from_wire(d, what))
                    .collect::<Result<Vec<_>, _>>()
            };
            Ok(Proof {
                disclosed: ser.disclosed.clone(),
                a: digest_from_wire(&ser.a, "a")?,
                r: scalars_from_wire(&ser.r, "r")?,
                ap: ser.ap.as_ref().map(|ap| digest_from_wire(ap, "ap")).transpose()?,
                ps: ser.ps.as_ref().map(|ps| element_from_wire(ps, "Ps")).transpose()?,
                tc: elements_from_wire(ser.tc.as_deref().unwrap_or_default(), "tc")?,
                ta: digests(&ser.ta, "ta")?,
                tr: scalars_from_wire(ser.tr.as_deref().unwrap_or_default(), "tr")?,
            })
        };
        parse().map_err(|e| UProveError::parse_error("proof", e))
    }

    /// Checks the issuer's signature `(sigma_z', sigma_c', sigma_r')` on the token
    pub fn verify_token_signature(&self, token: &UProveToken<G>) -> Result<bool, UProveError> {
        if token.uidp != self.ip.uidp() {
            return Ok(false);
        }
        let sap = (self.ip.generator() * token.srp - *self.ip.g0() * token.scp).into_affine();
        let sbp = (token.h * token.srp - token.szp * token.scp).into_affine();
        let scp = compute_sigma_c_prime(&token.h, &token.pi, &token.szp, &sap, &sbp)?;
        Ok(scp == token.scp)
    }

    /// Like [`Self::verify_token_signature`] but an invalid signature is an error
    pub fn ensure_valid_token(&self, token: &UProveToken<G>) -> Result<(), UProveError> {
        if self.verify_token_signature(token)? {
            Ok(())
        } else {
            Err(UProveError::InvalidTokenSignature(0))
        }
    }

    /// Verify a presentation proof for `token`. Besides the proof of knowledge this checks the
    /// commitments to committed attributes and, when the request has a scope, the pseudonym.
    pub fn verify(
        &self,
        proof: &Proof<G>,
        token: &UProveToken<G>,
        request: &PresentationRequest<G>,
    ) -> Result<bool, UProveError> {
        let n = self.ip.n();
        let (disclosed_indices, committed_indices) = request.sorted_indices(n)?;
        let undisclosed_indices = (1..=n)
            .filter(|i| disclosed_indices.binary_search(i).is_err())
            .collect::<Vec<_>>();
        let num_committed = committed_indices.len();
        if proof.disclosed.len() != disclosed_indices.len()
            || proof.r.len() != 1 + undisclosed_indices.len()
            || proof.tc.len() != num_committed
            || proof.ta.len() != num_committed
            || proof.tr.len() != num_committed
            || request.scope.is_some() != proof.ap.is_some()
            || request.scope.is_some() != proof.ps.is_some()
        {
            return Ok(false);
        }
        let timer = start_timer!(|| "Verify presentation proof");
        let g = self.ip.g();
        let e = self.ip.e();

        let disclosed_x = disclosed_indices
            .iter()
            .zip(proof.disclosed.iter())
            .map(|(i, a)| compute_x(Some(a.as_slice()), e[i - 1]))
            .collect::<Result<Vec<G::ScalarField>, _>>()?;
        let c = generate_challenge::<G>(
            &compute_token_id(token)?,
            &proof.a,
            &disclosed_indices,
            &disclosed_x,
            &committed_indices,
            &proof.tc,
            &proof.ta,
            request.scope.map(|s| s.p).unwrap_or(0),
            proof.ap.as_ref().map(|ap| ap.as_slice()),
            proof.ps.as_ref(),
            request.message,
            request.device_message,
        )?;

        // h^r_0 * prod_{i not in D} g_i^r_i
        let mut u_bases = Vec::with_capacity(proof.r.len());
        u_bases.push(token.h);
        u_bases.extend(undisclosed_indices.iter().map(|i| g[*i]));
        let u_part = multi_mod_exp(&u_bases, &proof.r)?;

        // g_0 * g_t^x_t * prod_{i in D} g_i^x_i
        let mut d_bases = disclosed_indices.iter().map(|i| g[*i]).collect::<Vec<_>>();
        let mut d_exponents = disclosed_x;
        d_bases.push(*self.ip.gt());
        d_exponents.push(compute_xt(self.ip, &token.ti));
        let d_part = multi_mod_exp(&d_bases, &d_exponents)? + *self.ip.g0();

        let a_input = (u_part - d_part * c).into_affine();
        if hash_element(&a_input)? != proof.a {
            end_timer!(timer);
            return Ok(false);
        }

        // Position of attribute `i` in the responses
        let response_of = |i: usize| {
            undisclosed_indices
                .binary_search(&i)
                .map(|pos| proof.r[pos + 1])
        };

        let generator = self.ip.generator();
        for (j, i) in committed_indices.iter().enumerate() {
            let r_i = match response_of(*i) {
                Ok(r) => r,
                Err(_) => return Ok(false),
            };
            let input = (proof.tc[j] * c + generator * r_i + g[1] * proof.tr[j]).into_affine();
            if hash_element(&input)? != proof.ta[j] {
                end_timer!(timer);
                return Ok(false);
            }
        }

        if let (Some(scope), Some(ap), Some(ps)) = (request.scope, &proof.ap, &proof.ps) {
            let r_p = match response_of(scope.p) {
                Ok(r) => r,
                Err(_) => return Ok(false),
            };
            let gs = scope.scope_element()?;
            let input = (gs * r_p + *ps * c).into_affine();
            if hash_element(&input)? != *ap {
                end_timer!(timer);
                return Ok(false);
            }
        }
        end_timer!(timer);
        Ok(true)
    }

    /// Like [`Self::verify`] but a proof that does not verify is an error
    pub fn ensure_valid(
        &self,
        proof: &Proof<G>,
        token: &UProveToken<G>,
        request: &PresentationRequest<G>,
    ) -> Result<(), UProveError> {
        if self.verify(proof, token, request)? {
            Ok(())
        } else {
            Err(UProveError::ProofVerificationFailed)
        }
    }
}
