//! Loading keys from files.

use std::{
    io,
    path::{Path, PathBuf},
};

use rsa::traits::PublicKeyParts;
use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::{
    encoding::{decode_private_key, decode_public_key},
    errors::{Error, Result},
    RsaKeyPair,
};

impl RsaKeyPair {
    /// Load a public key from the file at `path`.
    ///
    /// The file may hold an SPKI (`PUBLIC KEY`) or PKCS#1 (`RSA PUBLIC KEY`)
    /// key, as PEM or DER. PEM files with several blocks are searched for the
    /// first public key, so the output of [`encode`](Self::encode) with a
    /// password can be loaded back.
    ///
    /// On success any previously held key material is replaced, including a
    /// private key. On error the instance is left unchanged.
    pub async fn load_public_key(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let contents = read_key_file(path).await?;
        let key = decode_public_key(&contents)?;

        let modulus_bits = key.n().bits();
        debug!(path = %path.display(), modulus_bits, "loaded public key");
        self.warn_on_size_mismatch(path, modulus_bits);
        self.set_public_loaded(key);
        Ok(())
    }

    /// Load a private key from the file at `path`.
    ///
    /// The file may hold a PKCS#8 (`PRIVATE KEY`), encrypted PKCS#8
    /// (`ENCRYPTED PRIVATE KEY`) or PKCS#1 (`RSA PRIVATE KEY`) key, as PEM or
    /// DER. `password` is needed for encrypted keys; an empty password counts
    /// as none. Decoding runs on tokio's blocking pool since decrypting a key
    /// derives the encryption key from the password.
    pub async fn load_private_key(
        &mut self,
        path: impl AsRef<Path>,
        password: Option<&str>,
    ) -> Result<()> {
        let path = path.as_ref();
        let contents = read_key_file(path).await?;
        let password = password.map(|password| Zeroizing::new(password.to_owned()));
        let key = tokio::task::spawn_blocking(move || {
            decode_private_key(&contents, password.as_ref().map(|p| p.as_str()))
        })
        .await??;

        let modulus_bits = key.n().bits();
        debug!(path = %path.display(), modulus_bits, "loaded private key");
        self.warn_on_size_mismatch(path, modulus_bits);
        self.set_private_loaded(key);
        Ok(())
    }

    fn warn_on_size_mismatch(&self, path: &Path, modulus_bits: usize) {
        if modulus_bits != self.bits() {
            warn!(
                path = %path.display(),
                configured_bits = self.bits(),
                modulus_bits,
                "loaded key size differs from configured size"
            );
        }
    }
}

async fn read_key_file(path: &Path) -> Result<Zeroizing<Vec<u8>>> {
    match tokio::fs::read(path).await {
        Ok(contents) => Ok(Zeroizing::new(contents)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Err(Error::FileNotFound {
            path: PathBuf::from(path),
        }),
        Err(source) => Err(Error::Io {
            path: PathBuf::from(path),
            source,
        }),
    }
}
