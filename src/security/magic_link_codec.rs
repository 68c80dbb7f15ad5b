use crate::security::MagicLinkPayload;
use anyhow::{Context, bail};
use openssl::symm::{Cipher, Crypter, Mode};

/// AES-256-GCM nonce size in bytes.
const NONCE_SIZE: usize = 12;
/// AES-256-GCM authentication tag size in bytes.
const TAG_SIZE: usize = 16;

/// Errors produced when an encoded magic link payload cannot be turned back into a
/// `MagicLinkPayload`. Always caused by tampering, corruption, or a key mismatch.
#[derive(thiserror::Error, Debug)]
pub enum DecodeError {
    #[error("encoded payload is not valid hex")]
    InvalidEncoding(#[from] hex::FromHexError),
    #[error("encoded payload is too short to contain nonce and tag")]
    TooShort,
    #[error("encoded payload cannot be decrypted")]
    BadCiphertext(#[from] openssl::error::ErrorStack),
    #[error("decrypted payload has an unexpected shape")]
    InvalidShape(#[from] serde_json::Error),
}

/// Encrypts magic link payloads into opaque URL-safe strings and back using AES-256-GCM, making
/// the payload both confidential and tamper-evident.
#[derive(Clone)]
pub struct MagicLinkCodec {
    key: Vec<u8>,
}

impl MagicLinkCodec {
    /// Creates a new instance from a hex-encoded 32-byte key.
    pub fn new(hex_key: &str) -> anyhow::Result<Self> {
        let key = hex::decode(hex_key).with_context(|| "Magic link key is not valid hex.")?;
        if key.len() != 32 {
            bail!(
                "Magic link key must be 32 bytes (256 bits), got {} bytes.",
                key.len()
            );
        }
        Ok(Self { key })
    }

    /// Serializes the payload to its canonical JSON form and encrypts it. The result is a
    /// hex-encoded opaque string suitable for a URL query parameter.
    pub fn encode(&self, payload: &MagicLinkPayload) -> anyhow::Result<String> {
        Ok(hex::encode(self.encrypt(&serde_json::to_vec(payload)?)?))
    }

    /// Decrypts a string previously produced by [`MagicLinkCodec::encode`] and parses it back
    /// into a payload.
    pub fn decode(&self, encoded: &str) -> Result<MagicLinkPayload, DecodeError> {
        let plaintext = self.decrypt(&hex::decode(encoded)?)?;
        Ok(serde_json::from_slice(&plaintext)?)
    }

    /// Encrypts plaintext using AES-256-GCM with a random nonce. Returns
    /// `nonce || ciphertext || tag`.
    fn encrypt(&self, plaintext: &[u8]) -> anyhow::Result<Vec<u8>> {
        let cipher = Cipher::aes_256_gcm();
        let nonce = Self::random_nonce()?;

        let mut crypter = Crypter::new(cipher, Mode::Encrypt, &self.key, Some(&nonce))?;
        let mut ciphertext = vec![0u8; plaintext.len() + cipher.block_size()];
        let mut count = crypter.update(plaintext, &mut ciphertext)?;
        count += crypter.finalize(&mut ciphertext[count..])?;
        ciphertext.truncate(count);

        let mut tag = vec![0u8; TAG_SIZE];
        crypter.get_tag(&mut tag)?;

        let mut output = Vec::with_capacity(NONCE_SIZE + ciphertext.len() + TAG_SIZE);
        output.extend_from_slice(&nonce);
        output.extend_from_slice(&ciphertext);
        output.extend_from_slice(&tag);

        Ok(output)
    }

    /// Decrypts data previously produced by [`MagicLinkCodec::encrypt`]. Expects
    /// `nonce || ciphertext || tag`.
    fn decrypt(&self, data: &[u8]) -> Result<Vec<u8>, DecodeError> {
        if data.len() < NONCE_SIZE + TAG_SIZE {
            return Err(DecodeError::TooShort);
        }

        let cipher = Cipher::aes_256_gcm();
        let nonce = &data[..NONCE_SIZE];
        let tag = &data[data.len() - TAG_SIZE..];
        let ciphertext = &data[NONCE_SIZE..data.len() - TAG_SIZE];

        let mut crypter = Crypter::new(cipher, Mode::Decrypt, &self.key, Some(nonce))?;
        crypter.set_tag(tag)?;

        let mut plaintext = vec![0u8; ciphertext.len() + cipher.block_size()];
        let mut count = crypter.update(ciphertext, &mut plaintext)?;
        count += crypter.finalize(&mut plaintext[count..])?;
        plaintext.truncate(count);

        Ok(plaintext)
    }

    fn random_nonce() -> anyhow::Result<[u8; NONCE_SIZE]> {
        let mut nonce = [0u8; NONCE_SIZE];
        openssl::rand::rand_bytes(&mut nonce)?;
        Ok(nonce)
    }
}
