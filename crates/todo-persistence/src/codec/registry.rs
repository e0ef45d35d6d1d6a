//! Enum codec registry.
//!
//! An immutable table from enum type identity to its codec: built once at
//! startup through the builder, then shared behind `Arc` and read
//! concurrently without locking.

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::sync::Arc;

use super::{CodecError, EnumCode, EnumCodec};

type CodecEntry = Box<dyn Any + Send + Sync>;

/// Write-once lookup from enum type to codec.
pub struct CodecRegistry {
    codecs: HashMap<TypeId, CodecEntry>,
}

impl CodecRegistry {
    #[must_use]
    pub fn builder() -> CodecRegistryBuilder {
        CodecRegistryBuilder {
            codecs: HashMap::new(),
        }
    }

    /// Look up the codec for `E`.
    ///
    /// A missing codec is a configuration defect, surfaced here at the
    /// first decode attempt rather than deferred silently.
    pub fn lookup<E: 'static>(&self) -> Result<&dyn EnumCodec<E>, CodecError> {
        self.codecs
            .get(&TypeId::of::<E>())
            .and_then(|entry| entry.downcast_ref::<Arc<dyn EnumCodec<E>>>())
            .map(|codec| codec.as_ref())
            .ok_or(CodecError::Unregistered {
                enum_name: short_type_name::<E>(),
            })
    }

    /// Decode a stored code into a variant of `E`.
    pub fn decode<E: 'static>(&self, code: &EnumCode) -> Result<E, CodecError> {
        self.lookup::<E>()?.decode(code)
    }

    /// Encode a variant of `E` into its stored code.
    pub fn encode<E: 'static>(&self, value: E) -> Result<EnumCode, CodecError> {
        Ok(self.lookup::<E>()?.encode(value))
    }
}

/// Builder enforcing one codec per enum type.
pub struct CodecRegistryBuilder {
    codecs: HashMap<TypeId, CodecEntry>,
}

impl CodecRegistryBuilder {
    /// Add a codec; registering a second codec for the same enum type is
    /// a configuration error and fails fast.
    pub fn register<E, C>(mut self, codec: C) -> Result<Self, CodecError>
    where
        E: 'static,
        C: EnumCodec<E> + 'static,
    {
        let enum_name = codec.enum_name();
        let entry: Arc<dyn EnumCodec<E>> = Arc::new(codec);
        if self
            .codecs
            .insert(TypeId::of::<E>(), Box::new(entry))
            .is_some()
        {
            return Err(CodecError::DuplicateCodec { enum_name });
        }
        Ok(self)
    }

    #[must_use]
    pub fn build(self) -> CodecRegistry {
        CodecRegistry {
            codecs: self.codecs,
        }
    }
}

fn short_type_name<E>() -> &'static str {
    let full = type_name::<E>();
    full.rsplit("::").next().unwrap_or(full)
}
