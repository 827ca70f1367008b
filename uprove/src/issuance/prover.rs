use crate::{
    common::{compute_gamma, compute_sigma_c_prime, elements_from_wire, scalars_from_wire, scalars_to_wire},
    error::UProveError,
    group::UProveGroup,
    issuance::{FirstMessage, SecondMessage},
    issuer_params::IssuerParams,
    messages::{IssuanceState, SerializedFirstMessage, SerializedSecondMessage, SerializedThirdMessage},
    rng::RandomNumberGenerator,
    token::{KeyAndToken, UProveToken},
};
use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::Field;
use ark_std::{cfg_into_iter, end_timer, start_timer, string::ToString, vec::Vec};
use uprove_crypto_utils::ec::elements_to_bytes;
use zeroize::{Zeroize, ZeroizeOnDrop};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProverState {
    Initialized,
    FirstMessageParsed,
    SecondMessageSent,
    TokensGenerated,
}

/// What the prover keeps about a token between the second and third messages
#[derive(Clone, Debug, Zeroize, ZeroizeOnDrop)]
struct PendingToken<G: AffineRepr> {
    #[zeroize(skip)]
    h: G,
    alpha_inverse: G::ScalarField,
    beta2: G::ScalarField,
    #[zeroize(skip)]
    szp: G,
    #[zeroize(skip)]
    scp: G::ScalarField,
    /// `sigma_a' * sigma_b' * (g_0 * sigma_z')^sigma_c'`, absent when token validation is skipped
    #[zeroize(skip)]
    validation: Option<G>,
}

/// Prover side of a batch issuance
pub struct Prover<'a, G: UProveGroup> {
    ip: &'a IssuerParams<G>,
    state: ProverState,
    first_message: Option<FirstMessage<G>>,
    ti: Vec<u8>,
    pi: Vec<u8>,
    pending: Vec<PendingToken<G>>,
}

impl<'a, G: UProveGroup> Prover<'a, G> {
    pub fn new(ip: &'a IssuerParams<G>) -> Self {
        Self {
            ip,
            state: ProverState::Initialized,
            first_message: None,
            ti: Vec::new(),
            pi: Vec::new(),
            pending: Vec::new(),
        }
    }

    pub fn state(&self) -> ProverState {
        self.state
    }

    pub fn receive_first_message(&mut self, msg: &SerializedFirstMessage) -> Result<(), UProveError> {
        if self.state != ProverState::Initialized {
            return Err(UProveError::OutOfSequence(
                "first message was already received",
            ));
        }
        let fm = self.ip.parse_first_message(msg)?;
        if fm.is_empty() {
            return Err(UProveError::InvalidNumberOfTokens(0));
        }
        self.first_message = Some(fm);
        self.state = ProverState::FirstMessageParsed;
        Ok(())
    }

    /// Blind the issuer's first message for `num_tokens` tokens. `attributes` are the encoded attribute
    /// values; they are ignored when `external_gamma` gives `gamma` directly. With `skip_token_validation`
    /// the tokens are not checked against the issuer's responses when generated.
    pub fn generate_second_message<R: RandomNumberGenerator<G::ScalarField>, B: AsRef<[u8]>>(
        &mut self,
        rng: &mut R,
        num_tokens: usize,
        attributes: &[B],
        ti: &[u8],
        pi: &[u8],
        external_gamma: Option<G>,
        skip_token_validation: bool,
    ) -> Result<SerializedSecondMessage, UProveError> {
        let fm = match (&self.state, &self.first_message) {
            (ProverState::FirstMessageParsed, Some(fm)) => fm,
            (ProverState::Initialized, _) => {
                return Err(UProveError::OutOfSequence(
                    "second message requested before the first message was received",
                ))
            }
            _ => {
                return Err(UProveError::OutOfSequence(
                    "second message was already generated",
                ))
            }
        };
        if num_tokens != fm.len() {
            return Err(UProveError::LengthMismatch(fm.len(), num_tokens));
        }
        let timer = start_timer!(|| "Prover second message");
        let gamma = match external_gamma {
            Some(gamma) => gamma,
            None => compute_gamma(self.ip, attributes, ti)?,
        };

        // Randomness is drawn in token order so runs with a deterministic source are reproducible
        let blindings = (0..num_tokens)
            .map(|_| {
                let alpha = rng.random_nonzero_zq_element()?;
                let beta1 = rng.random_zq_element();
                let beta2 = rng.random_zq_element();
                Ok((alpha, beta1, beta2))
            })
            .collect::<Result<Vec<_>, UProveError>>()?;

        let g = G::generator();
        let g0 = *self.ip.g0();
        let sz = fm.sz;
        let results = cfg_into_iter!(blindings)
            .enumerate()
            .map(|(i, (alpha, beta1, beta2))| {
                let h = (gamma * alpha).into_affine();
                let szp = (sz * alpha).into_affine();
                let sap = (g0 * beta1 + g * beta2 + fm.sa[i]).into_affine();
                let sbp = (szp * beta1 + h * beta2 + fm.sb[i] * alpha).into_affine();
                let scp = compute_sigma_c_prime(&h, pi, &szp, &sap, &sbp)?;
                let sc = scp + beta1;
                let validation = if skip_token_validation {
                    None
                } else {
                    Some((sap + sbp + (g0 + szp) * scp).into_affine())
                };
                // alpha is non zero so the inverse exists
                let alpha_inverse = alpha.inverse().unwrap_or_default();
                Ok((
                    sc,
                    PendingToken {
                        h,
                        alpha_inverse,
                        beta2,
                        szp,
                        scp,
                        validation,
                    },
                ))
            })
            .collect::<Result<Vec<_>, UProveError>>()?;
        let (sc, pending): (Vec<_>, Vec<_>) = results.into_iter().unzip();

        self.pending = pending;
        self.ti = ti.to_vec();
        self.pi = pi.to_vec();
        self.state = ProverState::SecondMessageSent;
        end_timer!(timer);
        Ok(SecondMessage { sc }.to_serialized())
    }

    /// Unblind the issuer's responses into tokens. Fails without consuming the session if any token
    /// does not validate.
    pub fn generate_tokens(
        &mut self,
        msg: &SerializedThirdMessage,
    ) -> Result<Vec<KeyAndToken<G>>, UProveError> {
        if self.state != ProverState::SecondMessageSent {
            return Err(UProveError::OutOfSequence(match self.state {
                ProverState::TokensGenerated => "tokens were already generated",
                _ => "tokens requested before the second message was generated",
            }));
        }
        let tm = self.ip.parse_third_message(msg)?;
        if tm.sr.len() != self.pending.len() {
            return Err(UProveError::LengthMismatch(self.pending.len(), tm.sr.len()));
        }
        let timer = start_timer!(|| "Prover generate tokens");
        let g = G::generator();
        let (ip, ti, pi) = (self.ip, &self.ti, &self.pi);
        let tokens = cfg_into_iter!(0..tm.sr.len())
            .map(|i| {
                let p = &self.pending[i];
                let srp = tm.sr[i] + p.beta2;
                if let Some(v) = p.validation {
                    if (g + p.h) * srp != v.into_group() {
                        return Err(UProveError::InvalidTokenSignature(i));
                    }
                }
                Ok(KeyAndToken {
                    token: UProveToken {
                        uidp: ip.uidp().to_vec(),
                        h: p.h,
                        ti: ti.clone(),
                        pi: pi.clone(),
                        szp: p.szp,
                        scp: p.scp,
                        srp,
                        is_device_protected: false,
                    },
                    key: p.alpha_inverse,
                })
            })
            .collect::<Result<Vec<_>, UProveError>>()?;
        self.pending.clear();
        self.state = ProverState::TokensGenerated;
        end_timer!(timer);
        Ok(tokens)
    }

    /// State needed to finish issuance with `set_issuance_state`, possibly in another process. It
    /// contains the token private keys.
    pub fn issuance_state(&self) -> Result<IssuanceState, UProveError> {
        if self.state != ProverState::SecondMessageSent {
            return Err(UProveError::OutOfSequence(
                "issuance state exists only between the second and third messages",
            ));
        }
        let h = self.pending.iter().map(|p| p.h).collect::<Vec<_>>();
        let szp = self.pending.iter().map(|p| p.szp).collect::<Vec<_>>();
        let alpha_inverse = self.pending.iter().map(|p| p.alpha_inverse).collect::<Vec<_>>();
        let beta2 = self.pending.iter().map(|p| p.beta2).collect::<Vec<_>>();
        let scp = self.pending.iter().map(|p| p.scp).collect::<Vec<_>>();
        let validation = self
            .pending
            .iter()
            .map(|p| p.validation)
            .collect::<Option<Vec<_>>>();
        Ok(IssuanceState {
            h: elements_to_bytes(&h)?,
            alpha_inverse: scalars_to_wire(&alpha_inverse),
            beta2: scalars_to_wire(&beta2),
            sigma_z_prime: elements_to_bytes(&szp)?,
            sigma_c_prime: scalars_to_wire(&scp),
            token_validation_value: validation.map(|v| elements_to_bytes(&v)).transpose()?,
        })
    }

    /// Resume a prover that sent its second message, with the token information and prover information
    /// it used.
    pub fn set_issuance_state(
        &mut self,
        state: &IssuanceState,
        ti: &[u8],
        pi: &[u8],
    ) -> Result<(), UProveError> {
        if matches!(self.state, ProverState::SecondMessageSent | ProverState::TokensGenerated) {
            return Err(UProveError::OutOfSequence(
                "issuance state can only be set before the second message",
            ));
        }
        let parse = || {
            let n = state.h.len();
            let lengths = [
                state.alpha_inverse.len(),
                state.beta2.len(),
                state.sigma_z_prime.len(),
                state.sigma_c_prime.len(),
            ];
            if n == 0 || lengths.iter().any(|l| *l != n) {
                return Err(UProveError::InvalidSerialization(
                    "issuance state lists must be non empty and of equal length".to_string(),
                ));
            }
            let h = elements_from_wire::<G, _>(&state.h, "h")?;
            let alpha_inverse = scalars_from_wire(&state.alpha_inverse, "alphaInverse")?;
            let beta2 = scalars_from_wire(&state.beta2, "beta2")?;
            let szp = elements_from_wire::<G, _>(&state.sigma_z_prime, "sigmaZPrime")?;
            let scp = scalars_from_wire(&state.sigma_c_prime, "sigmaCPrime")?;
            let validation: Vec<Option<G>> = match &state.token_validation_value {
                Some(v) if v.len() != n => {
                    return Err(UProveError::InvalidSerialization(
                        "token validation values must have one entry per token".to_string(),
                    ))
                }
                Some(v) => elements_from_wire::<G, _>(v, "tokenValidationValue")?
                    .into_iter()
                    .map(Some)
                    .collect(),
                None => ark_std::vec![None; n],
            };
            Ok((0..n)
                .map(|i| PendingToken {
                    h: h[i],
                    alpha_inverse: alpha_inverse[i],
                    beta2: beta2[i],
                    szp: szp[i],
                    scp: scp[i],
                    validation: validation[i],
                })
                .collect::<Vec<_>>())
        };
        let pending = parse().map_err(|e| UProveError::parse_error("issuance state", e))?;
        self.pending = pending;
        self.ti = ti.to_vec();
        self.pi = pi.to_vec();
        self.state = ProverState::SecondMessageSent;
        Ok(())
    }
}
