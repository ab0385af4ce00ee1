use crate::error::CipherError;

/// Symmetric byte transform applied to stored JSON text.
///
/// Implementations must satisfy `decrypt(encrypt(b)) == b`. The algorithm and
/// key handling are up to the implementor.
pub trait Encryptor: Send + Sync {
    fn encrypt(&self, plain: &[u8]) -> Result<Vec<u8>, CipherError>;

    fn decrypt(&self, sealed: &[u8]) -> Result<Vec<u8>, CipherError>;
}

impl<E: Encryptor + ?Sized> Encryptor for &E {
    fn encrypt(&self, plain: &[u8]) -> Result<Vec<u8>, CipherError> {
        (**self).encrypt(plain)
    }

    fn decrypt(&self, sealed: &[u8]) -> Result<Vec<u8>, CipherError> {
        (**self).decrypt(sealed)
    }
}

impl<E: Encryptor + ?Sized> Encryptor for Box<E> {
    fn encrypt(&self, plain: &[u8]) -> Result<Vec<u8>, CipherError> {
        (**self).encrypt(plain)
    }

    fn decrypt(&self, sealed: &[u8]) -> Result<Vec<u8>, CipherError> {
        (**self).decrypt(sealed)
    }
}
