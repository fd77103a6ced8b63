use core::fmt;

use rand_core::{CryptoRngCore, OsRng};
use rsa::{traits::PublicKeyParts, RsaPrivateKey, RsaPublicKey};

use crate::{
    errors::{Error, Result},
    generate::generate_private_key,
};

/// Key size used by [`RsaKeyPair::default`].
pub const DEFAULT_KEY_SIZE: usize = 4096;

/// Smallest accepted key size in bits.
pub const MIN_KEY_SIZE: usize = 512;

/// Largest accepted key size in bits.
///
/// Public keys with a larger modulus are rejected by the decoder, so keys
/// above this size could not be loaded back.
pub const MAX_KEY_SIZE: usize = 4096;

/// Half of an RSA key pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyComponent {
    /// The public modulus and exponent.
    Public,
    /// The private exponent and prime factors.
    Private,
}

impl fmt::Display for KeyComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            KeyComponent::Public => "public",
            KeyComponent::Private => "private",
        })
    }
}

/// Where the key material held by an [`RsaKeyPair`] came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyState {
    /// No key material yet.
    Empty,
    /// Freshly generated; both components are present.
    Generated,
    /// Loaded from a public key file; only the public component is present.
    PublicLoaded,
    /// Loaded from a private key file; both components are present.
    PrivateLoaded,
}

#[derive(Clone, Default)]
enum KeyMaterial {
    #[default]
    Empty,
    Generated(RsaPrivateKey),
    PublicLoaded(RsaPublicKey),
    PrivateLoaded(RsaPrivateKey),
}

/// An RSA key pair with a configured size and, once generated or loaded,
/// its key material.
///
/// A new instance holds no key material. [`generate_key_pair`] fills in
/// both components, [`load_public_key`] only the public one. Encoding
/// methods are read-only queries over the current material.
///
/// Generation and loading take `&mut self`, so they can never run
/// concurrently on the same instance.
///
/// [`generate_key_pair`]: RsaKeyPair::generate_key_pair
/// [`load_public_key`]: RsaKeyPair::load_public_key
#[derive(Clone)]
pub struct RsaKeyPair {
    bits: usize,
    material: KeyMaterial,
}

impl RsaKeyPair {
    /// Create an empty key pair which will generate keys of `bits` bits.
    pub fn new(bits: usize) -> Result<Self> {
        check_key_size(bits)?;
        Ok(Self {
            bits,
            material: KeyMaterial::Empty,
        })
    }

    /// Configured key size in bits.
    pub fn bits(&self) -> usize {
        self.bits
    }

    /// Current lifecycle state.
    pub fn state(&self) -> KeyState {
        match self.material {
            KeyMaterial::Empty => KeyState::Empty,
            KeyMaterial::Generated(_) => KeyState::Generated,
            KeyMaterial::PublicLoaded(_) => KeyState::PublicLoaded,
            KeyMaterial::PrivateLoaded(_) => KeyState::PrivateLoaded,
        }
    }

    /// Returns `true` once a key has been generated or loaded.
    pub fn has_public_key(&self) -> bool {
        !matches!(self.material, KeyMaterial::Empty)
    }

    /// Returns `true` if the private component is present.
    pub fn has_private_key(&self) -> bool {
        self.private_key().is_some()
    }

    /// The public component, if any.
    pub fn public_key(&self) -> Option<RsaPublicKey> {
        match &self.material {
            KeyMaterial::Empty => None,
            KeyMaterial::PublicLoaded(key) => Some(key.clone()),
            KeyMaterial::Generated(key) | KeyMaterial::PrivateLoaded(key) => {
                Some(key.to_public_key())
            }
        }
    }

    /// The private component, if any.
    pub fn private_key(&self) -> Option<&RsaPrivateKey> {
        match &self.material {
            KeyMaterial::Generated(key) | KeyMaterial::PrivateLoaded(key) => Some(key),
            KeyMaterial::Empty | KeyMaterial::PublicLoaded(_) => None,
        }
    }

    /// Size of the modulus actually held, which may differ from
    /// [`bits`](Self::bits) after loading a key from a file.
    pub fn modulus_bits(&self) -> Option<usize> {
        match &self.material {
            KeyMaterial::Empty => None,
            KeyMaterial::PublicLoaded(key) => Some(key.n().bits()),
            KeyMaterial::Generated(key) | KeyMaterial::PrivateLoaded(key) => Some(key.n().bits()),
        }
    }

    /// Generate a fresh key pair using the operating system RNG.
    ///
    /// Key generation runs on tokio's blocking pool so the calling task is
    /// only suspended, never blocked. Must be called from within a tokio
    /// runtime. On error the instance is left unchanged.
    ///
    /// Dropping the returned future leaves the instance unchanged as well,
    /// but the blocking generation already started keeps running until it
    /// completes; its result is then discarded.
    pub async fn generate_key_pair(&mut self) -> Result<()> {
        self.generate_key_pair_with_rng(OsRng).await
    }

    /// Like [`generate_key_pair`](Self::generate_key_pair), drawing
    /// randomness from `rng`.
    pub async fn generate_key_pair_with_rng<R>(&mut self, mut rng: R) -> Result<()>
    where
        R: CryptoRngCore + Send + 'static,
    {
        let bits = self.bits;
        let key =
            tokio::task::spawn_blocking(move || generate_private_key(&mut rng, bits)).await??;
        self.material = KeyMaterial::Generated(key);
        Ok(())
    }

    /// Generate a fresh key pair on the current thread.
    pub fn generate_key_pair_sync(&mut self) -> Result<()> {
        self.generate_key_pair_sync_with_rng(&mut OsRng)
    }

    /// Generate a fresh key pair on the current thread, drawing randomness
    /// from `rng`.
    pub fn generate_key_pair_sync_with_rng<R: CryptoRngCore>(&mut self, rng: &mut R) -> Result<()> {
        let key = generate_private_key(rng, self.bits)?;
        self.material = KeyMaterial::Generated(key);
        Ok(())
    }

    pub(crate) fn set_public_loaded(&mut self, key: RsaPublicKey) {
        self.material = KeyMaterial::PublicLoaded(key);
    }

    pub(crate) fn set_private_loaded(&mut self, key: RsaPrivateKey) {
        self.material = KeyMaterial::PrivateLoaded(key);
    }

    pub(crate) fn require_public_key(&self) -> Result<RsaPublicKey> {
        self.public_key()
            .ok_or(Error::NoKeyMaterial(KeyComponent::Public))
    }

    pub(crate) fn require_private_key(&self) -> Result<&RsaPrivateKey> {
        if !self.has_public_key() {
            return Err(Error::NoKeyMaterial(KeyComponent::Public));
        }
        self.private_key()
            .ok_or(Error::NoKeyMaterial(KeyComponent::Private))
    }
}

impl Default for RsaKeyPair {
    fn default() -> Self {
        Self {
            bits: DEFAULT_KEY_SIZE,
            material: KeyMaterial::Empty,
        }
    }
}

// Key material stays out of debug output.
impl fmt::Debug for RsaKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaKeyPair")
            .field("bits", &self.bits)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

pub(crate) fn check_key_size(bits: usize) -> Result<()> {
    if (MIN_KEY_SIZE..=MAX_KEY_SIZE).contains(&bits) {
        Ok(())
    } else {
        Err(Error::InvalidKeySize { bits })
    }
}
