//! The encode → text → encrypt → sink pipeline and its reverse.

use json_model::{JsonField, Mapper, Model, Value};

use crate::cipher::Encryptor;
use crate::error::StoreError;
use crate::io::{ByteSink, ByteSource};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// Emit indented JSON text instead of the compact form.
    pub pretty: bool,
}

/// Encodes `value` and hands the resulting bytes to `sink`.
///
/// Returns the number of bytes written, after encryption when an encryptor
/// is given.
pub fn write<F, S>(mapper: &Mapper<'_>, value: &F, sink: S, encryptor: Option<&dyn Encryptor>) -> Result<usize, StoreError>
where
    F: JsonField,
    S: ByteSink,
{
    write_with(mapper, value, sink, encryptor, &WriteOptions::default())
}

pub fn write_with<F, S>(
    mapper: &Mapper<'_>,
    value: &F,
    mut sink: S,
    encryptor: Option<&dyn Encryptor>,
    options: &WriteOptions,
) -> Result<usize, StoreError>
where
    F: JsonField,
    S: ByteSink,
{
    let bytes = to_bytes(mapper, value, encryptor, options)?;
    sink.write_bytes(&bytes)?;
    log::debug!("wrote {} bytes (encrypted: {})", bytes.len(), encryptor.is_some());
    Ok(bytes.len())
}

/// Reads, optionally decrypts, parses and decodes a `T`.
///
/// Well-formed JSON that is not an object decodes to `T::default()`.
pub fn read<T, S>(mapper: &Mapper<'_>, source: S, encryptor: Option<&dyn Encryptor>) -> Result<T, StoreError>
where
    T: Model,
    S: ByteSource,
{
    let value = read_value(source, encryptor)?;
    Ok(mapper.decode_value(&value))
}

/// Reads the stored JSON without decoding it into a model.
pub fn read_value<S: ByteSource>(mut source: S, encryptor: Option<&dyn Encryptor>) -> Result<Value, StoreError> {
    let bytes = source.read_bytes()?;
    log::debug!("read {} bytes (encrypted: {})", bytes.len(), encryptor.is_some());
    from_bytes(&bytes, encryptor)
}

pub(crate) fn to_bytes<F: JsonField>(
    mapper: &Mapper<'_>,
    value: &F,
    encryptor: Option<&dyn Encryptor>,
    options: &WriteOptions,
) -> Result<Vec<u8>, StoreError> {
    let json = mapper.serialize(value)?;
    let text = if options.pretty {
        serde_json::to_vec_pretty(&json)
    } else {
        serde_json::to_vec(&json)
    }
    .map_err(StoreError::Serialize)?;
    match encryptor {
        Some(encryptor) => encryptor.encrypt(&text).map_err(StoreError::Encryption),
        None => Ok(text),
    }
}

pub(crate) fn from_bytes(bytes: &[u8], encryptor: Option<&dyn Encryptor>) -> Result<Value, StoreError> {
    let plain;
    let text = match encryptor {
        Some(encryptor) => {
            plain = encryptor.decrypt(bytes).map_err(StoreError::Decryption)?;
            plain.as_slice()
        }
        None => bytes,
    };
    serde_json::from_slice(text).map_err(StoreError::Parse)
}
