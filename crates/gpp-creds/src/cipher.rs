//! Decoder for the legacy preference credential field.
//!
//! The protection scheme is AES-256-CBC under a key Microsoft published with
//! the preference documentation (the weakness behind MS14-025). Recovering
//! the plaintext is the point of the check, so the key lives here as a plain
//! named constant.

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, KeyIvInit};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use privsweep_common::{Error, Result};

type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// The published AES-256 key every domain shares for preference credentials.
pub const GPP_AES_KEY: [u8; 32] = [
    0x4e, 0x99, 0x06, 0xe8, 0xfc, 0xb6, 0x6c, 0xc9, 0xfa, 0xf4, 0x93, 0x10, 0x62, 0x0f, 0xfe,
    0xe8, 0xf4, 0x96, 0xe8, 0x06, 0xcc, 0x05, 0x79, 0x90, 0x20, 0x9b, 0x09, 0xa4, 0x33, 0xb6,
    0x6c, 0x1b,
];

/// CBC initialization vector. The scheme fixes it to all zeroes.
pub const GPP_AES_IV: [u8; 16] = [0u8; 16];

/// Restore the base64 padding the issuing system strips from the field.
///
/// A length of 1 mod 4 can never come from stripping padding; dropping the
/// final character is a best-effort recovery for a truncated field and does
/// not promise the original ciphertext back.
pub fn normalize_padding(field: &str) -> String {
    match field.chars().count() % 4 {
        1 => {
            let mut s = field.to_string();
            s.pop();
            s
        }
        rem @ (2 | 3) => {
            let mut s = String::with_capacity(field.len() + (4 - rem));
            s.push_str(field);
            for _ in rem..4 {
                s.push('=');
            }
            s
        }
        _ => field.to_string(),
    }
}

/// Decrypt a raw credential field into its plaintext.
pub fn decrypt_cpassword(field: &str) -> Result<String> {
    let padded = normalize_padding(field);
    let mut buf = BASE64
        .decode(padded)
        .map_err(|e| Error::DecodeFailure(format!("invalid base64: {e}")))?;

    let cipher = Aes256CbcDec::new(&GPP_AES_KEY.into(), &GPP_AES_IV.into());
    let plain = cipher
        .decrypt_padded_mut::<Pkcs7>(&mut buf)
        .map_err(|_| Error::DecodeFailure("invalid ciphertext length or block padding".to_string()))?;

    utf16_le_string(plain)
}

/// The issuing system writes the plaintext as UTF-16LE.
fn utf16_le_string(bytes: &[u8]) -> Result<String> {
    if bytes.len() % 2 != 0 {
        return Err(Error::DecodeFailure("plaintext is not UTF-16".to_string()));
    }
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    String::from_utf16(&units).map_err(|_| Error::DecodeFailure("plaintext is not UTF-16".to_string()))
}
