//! Password hashing.
//!
//! New hashes are `pbkdf2_sha256$<iterations>$<salt>$<hash>` with unpadded
//! standard base64 for salt and hash. Two legacy forms written by older
//! admin tooling still verify: a bare 64-character hex digest and the same
//! digest prefixed with `pbkdf2hex$`. Both used a fixed salt. Hashes
//! written by passlib (`$pbkdf2-sha256$<rounds>$<salt>$<hash>`, adapted
//! base64 with `.` for `+`) also verify.

use base64::Engine;
use base64::engine::general_purpose::STANDARD_NO_PAD;
use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::Sha256;
use subtle::ConstantTimeEq;

pub const PBKDF2_ITERATIONS: u32 = 200_000;
pub const SALT_LENGTH: usize = 16;
pub const HASH_LENGTH: usize = 32;

const SCHEME: &str = "pbkdf2_sha256";
const PASSLIB_PREFIX: &str = "$pbkdf2-sha256$";
const LEGACY_PREFIX: &str = "pbkdf2hex$";
const LEGACY_SALT: &[u8] = b"ayur_salt_v2";
const LEGACY_ITERATIONS: u32 = 200_000;

fn derive(password: &str, salt: &[u8], iterations: u32) -> [u8; HASH_LENGTH] {
    let mut out = [0u8; HASH_LENGTH];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, iterations, &mut out);
    out
}

fn generate_salt() -> [u8; SALT_LENGTH] {
    let mut salt = [0u8; SALT_LENGTH];
    rand::thread_rng().fill_bytes(&mut salt);
    salt
}

/// Hash with a fresh random salt.
pub fn hash_password(password: &str) -> String {
    let salt = generate_salt();
    let hash = derive(password, &salt, PBKDF2_ITERATIONS);
    format!(
        "{SCHEME}${PBKDF2_ITERATIONS}${}${}",
        STANDARD_NO_PAD.encode(salt),
        STANDARD_NO_PAD.encode(hash),
    )
}

/// Fixed-salt hex digest as produced by the old admin reset script.
pub fn legacy_hash(password: &str) -> String {
    derive(password, LEGACY_SALT, LEGACY_ITERATIONS)
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

/// Check `password` against any supported stored form. Malformed hashes
/// never verify.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let stored = stored.trim();
    if let Some(rest) = stored.strip_prefix(SCHEME).and_then(|r| r.strip_prefix('$')) {
        return verify_pbkdf2(password, rest, |s| STANDARD_NO_PAD.decode(s).ok());
    }
    if let Some(rest) = stored.strip_prefix(PASSLIB_PREFIX) {
        return verify_pbkdf2(password, rest, decode_ab64);
    }
    let hex = stored.strip_prefix(LEGACY_PREFIX).unwrap_or(stored);
    if hex.len() != HASH_LENGTH * 2 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return false;
    }
    let expected = hex.to_ascii_lowercase();
    legacy_hash(password).as_bytes().ct_eq(expected.as_bytes()).into()
}

/// passlib's adapted base64: unpadded, `.` in place of `+`.
fn decode_ab64(text: &str) -> Option<Vec<u8>> {
    STANDARD_NO_PAD.decode(text.replace('.', "+")).ok()
}

/// `<iterations>$<salt>$<hash>` with salt and hash in the given encoding.
fn verify_pbkdf2(password: &str, rest: &str, decode: impl Fn(&str) -> Option<Vec<u8>>) -> bool {
    let mut parts = rest.split('$');
    let (Some(iterations), Some(salt), Some(hash), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    let Ok(iterations) = iterations.parse::<u32>() else {
        return false;
    };
    if iterations == 0 {
        return false;
    }
    let (Some(salt), Some(expected)) = (decode(salt), decode(hash)) else {
        return false;
    };
    if expected.len() != HASH_LENGTH {
        return false;
    }
    derive(password, &salt, iterations)
        .as_slice()
        .ct_eq(expected.as_slice())
        .into()
}

/// True for hashes that should be rewritten in the current format.
pub fn needs_rehash(stored: &str) -> bool {
    !stored.trim().starts_with(SCHEME)
}
