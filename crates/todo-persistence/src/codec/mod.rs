//! # Enum Codec Module
//!
//! Bidirectional codecs between domain enums and the primitive codes the
//! data store persists for them. One codec exists per enum type: integer
//! codes go through [`IntEnumCodec`], lowercase tokens through
//! [`TextEnumCodec`]. Codecs are assembled into a [`CodecRegistry`] once
//! at startup and read everywhere afterward.

pub mod registry;

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;
use todo_domain::{IntCoded, TextCoded, TodoCategory, TodoStatus};

pub use registry::{CodecRegistry, CodecRegistryBuilder};

/// Primitive wire representation of one enum variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EnumCode {
    Int(i64),
    Text(String),
}

impl fmt::Display for EnumCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(code) => write!(f, "{code}"),
            Self::Text(token) => write!(f, "{token}"),
        }
    }
}

/// Codec errors.
///
/// `DuplicateCodec` and `DuplicateCode` are configuration defects caught
/// at registry build time; `Unregistered` is a configuration defect
/// surfaced at the first decode attempt; `UnknownCode` signals corrupt or
/// stale stored data and is never recovered into a default variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("codec for {enum_name} registered twice")]
    DuplicateCodec { enum_name: &'static str },

    #[error("{enum_name} declares code {code} twice")]
    DuplicateCode {
        enum_name: &'static str,
        code: EnumCode,
    },

    #[error("no codec registered for {enum_name}")]
    Unregistered { enum_name: &'static str },

    #[error("unknown code {code} for {enum_name}")]
    UnknownCode {
        enum_name: &'static str,
        code: EnumCode,
    },
}

/// Bidirectional mapping between one enum type and its wire code.
///
/// `encode` is total; `decode` rejects any code outside the declared set.
pub trait EnumCodec<E>: Send + Sync {
    /// Name of the enum type, for error reporting.
    fn enum_name(&self) -> &'static str;

    /// Render a variant into its stored code. Never fails: the type
    /// system guarantees the variant is drawn from the closed set.
    fn encode(&self, value: E) -> EnumCode;

    /// Resolve a stored code into a variant.
    fn decode(&self, code: &EnumCode) -> Result<E, CodecError>;
}

/// Codec for integer-coded enums.
pub struct IntEnumCodec<E> {
    enum_name: &'static str,
    by_code: HashMap<i64, E>,
}

impl<E: IntCoded> IntEnumCodec<E> {
    /// Build the code table, rejecting duplicate codes up front.
    pub fn new(enum_name: &'static str) -> Result<Self, CodecError> {
        let mut by_code = HashMap::with_capacity(E::VARIANTS.len());
        for &variant in E::VARIANTS {
            if by_code.insert(variant.code(), variant).is_some() {
                return Err(CodecError::DuplicateCode {
                    enum_name,
                    code: EnumCode::Int(variant.code()),
                });
            }
        }
        Ok(Self { enum_name, by_code })
    }
}

impl<E: IntCoded + Send + Sync> EnumCodec<E> for IntEnumCodec<E> {
    fn enum_name(&self) -> &'static str {
        self.enum_name
    }

    fn encode(&self, value: E) -> EnumCode {
        EnumCode::Int(value.code())
    }

    fn decode(&self, code: &EnumCode) -> Result<E, CodecError> {
        let found = match code {
            EnumCode::Int(raw) => self.by_code.get(raw).copied(),
            EnumCode::Text(_) => None,
        };
        found.ok_or_else(|| CodecError::UnknownCode {
            enum_name: self.enum_name,
            code: code.clone(),
        })
    }
}

/// Codec for token-coded enums.
pub struct TextEnumCodec<E> {
    enum_name: &'static str,
    by_token: HashMap<&'static str, E>,
}

impl<E: TextCoded> TextEnumCodec<E> {
    /// Build the token table, rejecting duplicate tokens up front.
    pub fn new(enum_name: &'static str) -> Result<Self, CodecError> {
        let mut by_token = HashMap::with_capacity(E::VARIANTS.len());
        for &variant in E::VARIANTS {
            if by_token.insert(variant.token(), variant).is_some() {
                return Err(CodecError::DuplicateCode {
                    enum_name,
                    code: EnumCode::Text(variant.token().to_string()),
                });
            }
        }
        Ok(Self {
            enum_name,
            by_token,
        })
    }
}

impl<E: TextCoded + Send + Sync> EnumCodec<E> for TextEnumCodec<E> {
    fn enum_name(&self) -> &'static str {
        self.enum_name
    }

    fn encode(&self, value: E) -> EnumCode {
        EnumCode::Text(value.token().to_string())
    }

    fn decode(&self, code: &EnumCode) -> Result<E, CodecError> {
        let found = match code {
            EnumCode::Text(raw) => self.by_token.get(raw.as_str()).copied(),
            EnumCode::Int(_) => None,
        };
        found.ok_or_else(|| CodecError::UnknownCode {
            enum_name: self.enum_name,
            code: code.clone(),
        })
    }
}

/// Registry covering every coded enum in the domain model.
///
/// One entry per enum type; an enum left off this list surfaces as an
/// `Unregistered` error on its first decode.
pub fn domain_codecs() -> Result<CodecRegistry, CodecError> {
    Ok(CodecRegistry::builder()
        // integer-coded enums
        .register(IntEnumCodec::<TodoStatus>::new("TodoStatus")?)?
        // token-coded enums
        .register(TextEnumCodec::<TodoCategory>::new("TodoCategory")?)?
        .build())
}
