//! Typed, named attributes and their canonical byte encoding.
//!
//! An attribute is encoded as `type || name length || name || value` where the value section is
//! - string: `value length || value`
//! - number: 8 byte big-endian IEEE-754 double
//! - boolean: 1 byte, 0 or 1
//! - null: empty
//!
//! Names and strings are sequences of Latin-1 characters, one byte each, so at most 255 characters
//! long. The encoded bytes are what gets mapped into `Z_q` when issuing and presenting tokens.

use crate::error::UProveError;
use ark_std::{
    format,
    string::{String, ToString},
    vec::Vec,
};
use serde_json::{Map, Number, Value};

/// Strings at least this long don't fit in `Z_q` and should be issued with the hashed encoding policy
pub const HASHED_STRING_THRESHOLD: usize = 32;

const MAX_LENGTH: usize = u8::MAX as usize;

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttributeType {
    String = 0,
    Null = 1,
    Number = 2,
    Boolean = 3,
}

impl TryFrom<u8> for AttributeType {
    type Error = UProveError;

    fn try_from(b: u8) -> Result<Self, Self::Error> {
        match b {
            0 => Ok(Self::String),
            1 => Ok(Self::Null),
            2 => Ok(Self::Number),
            3 => Ok(Self::Boolean),
            _ => Err(UProveError::InvalidSerialization(format!(
                "unknown attribute type {}",
                b
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum AttributeValue {
    String(String),
    Number(f64),
    Boolean(bool),
    Null,
}

impl AttributeValue {
    pub fn attribute_type(&self) -> AttributeType {
        match self {
            Self::String(_) => AttributeType::String,
            Self::Number(_) => AttributeType::Number,
            Self::Boolean(_) => AttributeType::Boolean,
            Self::Null => AttributeType::Null,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            Self::String(s) => Value::String(s.clone()),
            Self::Number(n) => Number::from_f64(*n).map_or(Value::Null, Value::Number),
            Self::Boolean(b) => Value::Bool(*b),
            Self::Null => Value::Null,
        }
    }

    /// Arrays and objects have no attribute representation and give `None`
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self::String(s.clone())),
            Value::Number(n) => n.as_f64().map(Self::Number),
            Value::Bool(b) => Some(Self::Boolean(*b)),
            Value::Null => Some(Self::Null),
            Value::Array(_) | Value::Object(_) => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Attribute {
    name: String,
    value: AttributeValue,
}

fn check_latin1(s: &str, what: &str) -> Result<(), UProveError> {
    if let Some(c) = s.chars().find(|c| *c as u32 > 0xFF) {
        return Err(UProveError::InvalidAttribute(format!(
            "{} contains character {:?} which is not Latin-1",
            what, c
        )));
    }
    let len = s.chars().count();
    if len > MAX_LENGTH {
        return Err(UProveError::InvalidAttribute(format!(
            "{} has {} characters but at most {} are allowed",
            what, len, MAX_LENGTH
        )));
    }
    Ok(())
}

/// Length prefixed Latin-1 bytes. Caller must have checked the string with `check_latin1`.
fn push_latin1(out: &mut Vec<u8>, s: &str) {
    out.push(s.chars().count() as u8);
    out.extend(s.chars().map(|c| c as u8));
}

/// Reads a length prefixed Latin-1 string starting at `offset`, returns it with the offset past its end.
fn read_latin1(bytes: &[u8], offset: usize) -> Result<(String, usize), UProveError> {
    let len = *bytes
        .get(offset)
        .ok_or_else(|| UProveError::InvalidSerialization("missing length byte".to_string()))?
        as usize;
    let start = offset + 1;
    let s = bytes.get(start..start + len).ok_or_else(|| {
        UProveError::InvalidSerialization(format!(
            "expected {} bytes at offset {} but only {} remain",
            len,
            start,
            bytes.len().saturating_sub(start)
        ))
    })?;
    Ok((s.iter().map(|b| *b as char).collect(), start + len))
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: AttributeValue) -> Result<Self, UProveError> {
        let name = name.into();
        check_latin1(&name, "attribute name")?;
        if let AttributeValue::String(s) = &value {
            check_latin1(s, "attribute value")?;
        }
        Ok(Self { name, value })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &AttributeValue {
        &self.value
    }

    /// Whether the value is too long to be encoded directly in `Z_q`
    pub fn hashed(&self) -> bool {
        match &self.value {
            AttributeValue::String(s) => s.chars().count() >= HASHED_STRING_THRESHOLD,
            _ => false,
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(2 + self.name.len() + 9);
        out.push(self.value.attribute_type() as u8);
        push_latin1(&mut out, &self.name);
        match &self.value {
            AttributeValue::String(s) => push_latin1(&mut out, s),
            AttributeValue::Number(n) => out.extend_from_slice(&n.to_be_bytes()),
            AttributeValue::Boolean(b) => out.push(*b as u8),
            AttributeValue::Null => (),
        }
        out
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, UProveError> {
        let type_byte = *bytes
            .first()
            .ok_or_else(|| UProveError::InvalidSerialization("empty attribute".to_string()))?;
        let attr_type = AttributeType::try_from(type_byte)?;
        let (name, offset) = read_latin1(bytes, 1)?;
        let rest = &bytes[offset..];
        let (value, consumed) = match attr_type {
            AttributeType::String => {
                let (s, end) = read_latin1(rest, 0)?;
                (AttributeValue::String(s), end)
            }
            AttributeType::Number => {
                let n: [u8; 8] = rest.get(..8).and_then(|b| b.try_into().ok()).ok_or_else(|| {
                    UProveError::InvalidSerialization(format!(
                        "number attribute {} needs 8 value bytes",
                        name
                    ))
                })?;
                (AttributeValue::Number(f64::from_be_bytes(n)), 8)
            }
            AttributeType::Boolean => match rest.first() {
                Some(0) => (AttributeValue::Boolean(false), 1),
                Some(1) => (AttributeValue::Boolean(true), 1),
                _ => {
                    return Err(UProveError::InvalidSerialization(format!(
                        "boolean attribute {} needs a value byte of 0 or 1",
                        name
                    )))
                }
            },
            AttributeType::Null => (AttributeValue::Null, 0),
        };
        if consumed != rest.len() {
            return Err(UProveError::InvalidSerialization(format!(
                "{} trailing bytes after attribute {}",
                rest.len() - consumed,
                name
            )));
        }
        Ok(Self { name, value })
    }
}

/// An ordered list of attributes. Attribute `i` of a token (1-based) is the `i-1`th entry.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AttributeSet(Vec<Attribute>);

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, attribute: Attribute) {
        self.0.push(attribute)
    }

    pub fn add_string_attribute(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), UProveError> {
        self.push(Attribute::new(name, AttributeValue::String(value.into()))?);
        Ok(())
    }

    pub fn add_number_attribute(
        &mut self,
        name: impl Into<String>,
        value: f64,
    ) -> Result<(), UProveError> {
        self.push(Attribute::new(name, AttributeValue::Number(value))?);
        Ok(())
    }

    pub fn add_boolean_attribute(
        &mut self,
        name: impl Into<String>,
        value: bool,
    ) -> Result<(), UProveError> {
        self.push(Attribute::new(name, AttributeValue::Boolean(value))?);
        Ok(())
    }

    pub fn add_null_attribute(&mut self, name: impl Into<String>) -> Result<(), UProveError> {
        self.push(Attribute::new(name, AttributeValue::Null)?);
        Ok(())
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 0-based position of the first attribute with this name
    pub fn index_of_attribute(&self, name: &str) -> Option<usize> {
        self.0.iter().position(|a| a.name == name)
    }

    pub fn encode(&self) -> Vec<Vec<u8>> {
        self.0.iter().map(|a| a.encode()).collect()
    }

    pub fn decode<B: AsRef<[u8]>>(encoded: &[B]) -> Result<Self, UProveError> {
        encoded
            .iter()
            .map(|b| Attribute::decode(b.as_ref()))
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    /// Encoding policy byte for each attribute: 1 for values that must be hashed into `Z_q`, 0 otherwise
    pub fn encoding_policy(&self) -> Vec<u8> {
        self.0.iter().map(|a| a.hashed() as u8).collect()
    }

    /// Mapping from attribute name to value, keeping attribute order
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        for a in &self.0 {
            map.insert(a.name.clone(), a.value.to_json());
        }
        Value::Object(map)
    }

    /// Builds a set from a JSON object. Values that are arrays or objects are skipped.
    pub fn from_json(json: &Value) -> Result<Self, UProveError> {
        let map = json.as_object().ok_or_else(|| {
            UProveError::InvalidSerialization("attributes must be a JSON object".to_string())
        })?;
        let mut set = Self::new();
        for (name, value) in map {
            if let Some(v) = AttributeValue::from_json(value) {
                set.push(Attribute::new(name.clone(), v)?);
            }
        }
        Ok(set)
    }

    pub fn from_json_str(json: &str) -> Result<Self, UProveError> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| UProveError::InvalidSerialization(e.to_string()))?;
        Self::from_json(&value)
    }
}
