//! Legacy challenge-response digest

use md5::{Digest, Md5};

use crate::error::{Result, RosError};

/// Compute the `=response=` value for a login challenge
///
/// `"00" + hex(MD5(0x00 || password || challenge))`, where `challenge_hex`
/// is the `ret` attribute sent by the device.
pub fn challenge_response(password: &str, challenge_hex: &str) -> Result<String> {
    let challenge = hex::decode(challenge_hex.trim()).map_err(|e| {
        RosError::AuthenticationFailed(format!("malformed login challenge: {}", e))
    })?;

    let mut hasher = Md5::new();
    hasher.update([0u8]);
    hasher.update(password.as_bytes());
    hasher.update(&challenge);
    let digest = hasher.finalize();

    Ok(format!("00{}", hex::encode(digest)))
}
