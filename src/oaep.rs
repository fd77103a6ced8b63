//! Encryption and decryption with the held key material using RSAES-OAEP
//! with SHA-256, as described in [RFC8017 § 7.1].
//!
//! [RFC8017 § 7.1]: https://datatracker.ietf.org/doc/html/rfc8017#section-7.1

use rand_core::{CryptoRngCore, OsRng};
use rsa::Oaep;
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::{
    errors::{Error, Result},
    RsaKeyPair,
};

impl RsaKeyPair {
    /// Encrypt `msg` to the public key.
    pub fn encrypt(&self, msg: &[u8]) -> Result<Vec<u8>> {
        self.encrypt_with_rng(&mut OsRng, msg)
    }

    /// Encrypt `msg` to the public key, drawing the OAEP seed from `rng`.
    pub fn encrypt_with_rng<R: CryptoRngCore>(&self, rng: &mut R, msg: &[u8]) -> Result<Vec<u8>> {
        let public_key = self.require_public_key()?;
        public_key
            .encrypt(rng, Oaep::new::<Sha256>(), msg)
            .map_err(Error::Encryption)
    }

    /// Decrypt a ciphertext produced by [`encrypt`](Self::encrypt).
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
        let private_key = self.require_private_key()?;
        private_key
            .decrypt(Oaep::new::<Sha256>(), ciphertext)
            .map(Zeroizing::new)
            .map_err(Error::Decryption)
    }
}
