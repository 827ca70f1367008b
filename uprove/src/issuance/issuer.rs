use crate::{
    common::{compute_gamma, scalar_from_wire, scalars_from_wire, scalars_to_wire},
    error::UProveError,
    group::UProveGroup,
    issuance::{FirstMessage, SecondMessage, ThirdMessage},
    issuer_params::IssuerParams,
    key_container::PrivateKeyContainer,
    messages::{
        SerializedFirstMessage, SerializedIssuerSession, SerializedSecondMessage,
        SerializedThirdMessage,
    },
    rng::RandomNumberGenerator,
};
use ark_ec::CurveGroup;
use ark_std::{cfg_iter, end_timer, start_timer, string::ToString, vec::Vec};
use zeroize::Zeroize;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IssuerState {
    Created,
    FirstMessageSent,
    SecondMessageReceived,
    ThirdMessageSent,
}

/// Issuer side of a batch issuance. Created with the attributes and token information all tokens of
/// the batch will carry.
pub struct IssuerSession<'a, G: UProveGroup, K: PrivateKeyContainer> {
    ip: &'a IssuerParams<G>,
    key_container: &'a K,
    attributes: Vec<Vec<u8>>,
    ti: Vec<u8>,
    num_tokens: usize,
    /// Nonce of each token's signature
    w: Vec<G::ScalarField>,
    gamma: G,
    first_message: Option<FirstMessage<G>>,
    second_message: Option<SecondMessage<G::ScalarField>>,
    third_message: Option<ThirdMessage<G::ScalarField>>,
}

impl<'a, G: UProveGroup, K: PrivateKeyContainer> Drop for IssuerSession<'a, G, K> {
    fn drop(&mut self) {
        self.w.zeroize();
    }
}

impl<'a, G: UProveGroup, K: PrivateKeyContainer> IssuerSession<'a, G, K> {
    /// `attributes` are the encoded attribute values, one per attribute of the issuer parameters
    pub fn new<R: RandomNumberGenerator<G::ScalarField>>(
        rng: &mut R,
        ip: &'a IssuerParams<G>,
        key_container: &'a K,
        num_tokens: usize,
        attributes: Vec<Vec<u8>>,
        ti: Vec<u8>,
    ) -> Result<Self, UProveError> {
        if num_tokens == 0 {
            return Err(UProveError::InvalidNumberOfTokens(num_tokens));
        }
        let gamma = compute_gamma(ip, &attributes, &ti)?;
        let w = (0..num_tokens).map(|_| rng.random_zq_element()).collect();
        Ok(Self {
            ip,
            key_container,
            attributes,
            ti,
            num_tokens,
            w,
            gamma,
            first_message: None,
            second_message: None,
            third_message: None,
        })
    }

    pub fn state(&self) -> IssuerState {
        if self.third_message.is_some() {
            IssuerState::ThirdMessageSent
        } else if self.second_message.is_some() {
            IssuerState::SecondMessageReceived
        } else if self.first_message.is_some() {
            IssuerState::FirstMessageSent
        } else {
            IssuerState::Created
        }
    }

    pub fn num_tokens(&self) -> usize {
        self.num_tokens
    }

    fn private_key(&self) -> Result<G::ScalarField, UProveError> {
        scalar_from_wire(&self.key_container.private_key_bytes(), "issuer private key")
    }

    /// Creates the first message on the first call. Later calls return the same message.
    pub fn get_first_message(&mut self) -> Result<SerializedFirstMessage, UProveError> {
        if let Some(fm) = &self.first_message {
            return fm.to_serialized();
        }
        let timer = start_timer!(|| "Issuer first message");
        let mut y0 = self.private_key()?;
        let g = G::generator();
        let gamma = self.gamma;
        let sz = (gamma * y0).into_affine();
        y0.zeroize();
        let sa = G::Group::normalize_batch(&cfg_iter!(self.w).map(|w| g * w).collect::<Vec<_>>());
        let sb = G::Group::normalize_batch(&cfg_iter!(self.w).map(|w| gamma * w).collect::<Vec<_>>());
        let fm = FirstMessage { sz, sa, sb };
        let ser = fm.to_serialized()?;
        self.first_message = Some(fm);
        end_timer!(timer);
        Ok(ser)
    }

    pub fn receive_second_message(
        &mut self,
        msg: &SerializedSecondMessage,
    ) -> Result<(), UProveError> {
        match self.state() {
            IssuerState::FirstMessageSent => (),
            IssuerState::Created => {
                return Err(UProveError::OutOfSequence(
                    "second message received before the first message was sent",
                ))
            }
            _ => {
                return Err(UProveError::OutOfSequence(
                    "second message was already received",
                ))
            }
        }
        let sm = self.ip.parse_second_message(msg)?;
        if sm.sc.len() != self.num_tokens {
            return Err(UProveError::LengthMismatch(self.num_tokens, sm.sc.len()));
        }
        self.second_message = Some(sm);
        Ok(())
    }

    /// Creates the third message on the first call. Later calls return the same message.
    pub fn get_third_message(&mut self) -> Result<SerializedThirdMessage, UProveError> {
        if let Some(tm) = &self.third_message {
            return Ok(tm.to_serialized());
        }
        let sc = match &self.second_message {
            Some(sm) => &sm.sc,
            None => {
                return Err(UProveError::OutOfSequence(
                    "third message requested before the second message was received",
                ))
            }
        };
        let mut y0 = self.private_key()?;
        let sr = cfg_iter!(sc)
            .zip(cfg_iter!(self.w))
            .map(|(c, w)| *c * y0 + w)
            .collect::<Vec<_>>();
        y0.zeroize();
        let tm = ThirdMessage { sr };
        let ser = tm.to_serialized();
        self.third_message = Some(tm);
        Ok(ser)
    }

    /// Session without its secrets, see `serialize_w`
    pub fn serialize(&self) -> Result<SerializedIssuerSession, UProveError> {
        Ok(SerializedIssuerSession {
            ip: self.ip.to_serialized()?,
            ti: self.ti.clone(),
            attributes: self.attributes.clone(),
            num_tokens: self.num_tokens,
            first_message: self
                .first_message
                .as_ref()
                .map(|fm| fm.to_serialized())
                .transpose()?,
            second_message: self.second_message.as_ref().map(|sm| sm.to_serialized()),
            third_message: self.third_message.as_ref().map(|tm| tm.to_serialized()),
        })
    }

    /// The signature nonces. They must be stored as securely as the issuer private key.
    pub fn serialize_w(&self) -> Vec<Vec<u8>> {
        scalars_to_wire(&self.w)
    }

    /// Restore a session from `serialize` and `serialize_w` output. The serialized session must have
    /// been created with the given issuer parameters.
    pub fn load(
        ser: &SerializedIssuerSession,
        ip: &'a IssuerParams<G>,
        key_container: &'a K,
        w: &[Vec<u8>],
    ) -> Result<Self, UProveError> {
        if IssuerParams::<G>::parse(&ser.ip)?.digest() != ip.digest() {
            return Err(UProveError::InvalidSerialization(
                "session belongs to different issuer parameters".to_string(),
            ));
        }
        if ser.num_tokens == 0 {
            return Err(UProveError::InvalidNumberOfTokens(0));
        }
        let w = scalars_from_wire(w, "w")?;
        if w.len() != ser.num_tokens {
            return Err(UProveError::LengthMismatch(ser.num_tokens, w.len()));
        }
        if (ser.second_message.is_some() && ser.first_message.is_none())
            || (ser.third_message.is_some() && ser.second_message.is_none())
        {
            return Err(UProveError::InvalidSerialization(
                "session messages are out of sequence".to_string(),
            ));
        }
        let first_message = ser
            .first_message
            .as_ref()
            .map(|fm| ip.parse_first_message(fm))
            .transpose()?;
        let second_message = ser
            .second_message
            .as_ref()
            .map(|sm| ip.parse_second_message(sm))
            .transpose()?;
        let third_message = ser
            .third_message
            .as_ref()
            .map(|tm| ip.parse_third_message(tm))
            .transpose()?;
        let n = ser.num_tokens;
        let lengths = first_message
            .iter()
            .flat_map(|fm| [fm.sa.len(), fm.sb.len()])
            .chain(second_message.iter().map(|sm| sm.sc.len()))
            .chain(third_message.iter().map(|tm| tm.sr.len()));
        for len in lengths {
            if len != n {
                return Err(UProveError::LengthMismatch(n, len));
            }
        }
        let gamma = compute_gamma(ip, &ser.attributes, &ser.ti)?;
        Ok(Self {
            ip,
            key_container,
            attributes: ser.attributes.clone(),
            ti: ser.ti.clone(),
            num_tokens: ser.num_tokens,
            w,
            gamma,
            first_message,
            second_message,
            third_message,
        })
    }
}
