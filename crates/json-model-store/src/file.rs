//! Path-based shortcuts over [`FileLocation`].

use std::path::Path;

use json_model::{JsonField, Mapper, Model, Value};

use crate::cipher::Encryptor;
use crate::codec::{self, WriteOptions};
use crate::error::StoreError;
use crate::io::FileLocation;

pub fn write_file<F: JsonField>(
    mapper: &Mapper<'_>,
    value: &F,
    path: impl AsRef<Path>,
    encryptor: Option<&dyn Encryptor>,
) -> Result<usize, StoreError> {
    write_file_with(mapper, value, path, encryptor, &WriteOptions::default())
}

pub fn write_file_with<F: JsonField>(
    mapper: &Mapper<'_>,
    value: &F,
    path: impl AsRef<Path>,
    encryptor: Option<&dyn Encryptor>,
    options: &WriteOptions,
) -> Result<usize, StoreError> {
    let location = FileLocation::new(path.as_ref());
    log::debug!("writing {}", location.path().display());
    codec::write_with(mapper, value, location, encryptor, options)
}

pub fn read_file<T: Model>(
    mapper: &Mapper<'_>,
    path: impl AsRef<Path>,
    encryptor: Option<&dyn Encryptor>,
) -> Result<T, StoreError> {
    codec::read(mapper, FileLocation::new(path.as_ref()), encryptor)
}

pub fn read_file_value(path: impl AsRef<Path>, encryptor: Option<&dyn Encryptor>) -> Result<Value, StoreError> {
    codec::read_value(FileLocation::new(path.as_ref()), encryptor)
}
