//! Persistence for json-model objects.
//!
//! Values are encoded with a [`Mapper`](json_model::Mapper), written as JSON
//! text, optionally passed through an [`Encryptor`], and handed to a byte
//! sink. Reading runs the same steps backwards. Settings stores apply the
//! pipeline per key.

mod cipher;
mod codec;
mod error;
mod file;
mod io;
mod settings;

pub use cipher::Encryptor;
pub use codec::{read, read_value, write, write_with, WriteOptions};
pub use error::{CipherError, StoreError};
pub use file::{read_file, read_file_value, write_file, write_file_with};
pub use io::{ByteSink, ByteSource, FileLocation};
pub use settings::{DirSettings, MemorySettings, Settings, SettingsStore};
