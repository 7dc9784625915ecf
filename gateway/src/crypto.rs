//! ECDSA signer recovery for EVM-style 65-byte `r || s || v` signatures.

use cosmwasm_std::Api;

use crate::error::ContractError;
use crate::hash::keccak256;

/// secp256k1 group order divided by two. Signatures with a larger `s` are the
/// malleable twin of a valid signature and are rejected.
const SECP256K1_HALF_ORDER: [u8; 32] = [
    0x7f, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0x5d, 0x57, 0x6e, 0x73, 0x57, 0xa4, 0x50, 0x1d, 0xdf, 0xe9, 0x2f, 0x46, 0x68, 0x1b, 0x20, 0xa0,
];

pub const SIGNATURE_LENGTH: usize = 65;

/// Recover the 20-byte address that signed `message_hash`.
///
/// `v` may be given as 27/28 or as a raw recovery id 0/1.
pub fn recover_signer(
    api: &dyn Api,
    message_hash: &[u8; 32],
    signature: &[u8],
) -> Result<[u8; 20], ContractError> {
    if signature.len() != SIGNATURE_LENGTH {
        return Err(ContractError::InvalidSignature {
            reason: format!("expected 65 bytes, got {}", signature.len()),
        });
    }

    let s = &signature[32..64];
    if s > &SECP256K1_HALF_ORDER[..] {
        return Err(ContractError::InvalidSignature {
            reason: "s value is in the upper half of the curve order".to_string(),
        });
    }

    let recovery_param = match signature[64] {
        0 | 27 => 0,
        1 | 28 => 1,
        v => {
            return Err(ContractError::InvalidSignature {
                reason: format!("invalid recovery byte {}", v),
            })
        }
    };

    let pubkey = api
        .secp256k1_recover_pubkey(message_hash, &signature[..64], recovery_param)
        .map_err(|e| ContractError::InvalidSignature {
            reason: e.to_string(),
        })?;

    pubkey_to_address(&pubkey)
}

/// `keccak256(uncompressed_pubkey[1..])[12..]`
pub fn pubkey_to_address(pubkey: &[u8]) -> Result<[u8; 20], ContractError> {
    if pubkey.len() != 65 || pubkey[0] != 0x04 {
        return Err(ContractError::InvalidSignature {
            reason: "recovered key is not an uncompressed point".to_string(),
        });
    }

    let hash = keccak256(&pubkey[1..]);
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    Ok(address)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::testing::MockApi;
    use k256::ecdsa::SigningKey;
    use k256::elliptic_curve::sec1::ToEncodedPoint;

    fn sign(key: &SigningKey, hash: &[u8; 32]) -> Vec<u8> {
        let (signature, recid) = key.sign_prehash_recoverable(hash).unwrap();
        let (signature, recid) = match signature.normalize_s() {
            Some(normalized) => (
                normalized,
                k256::ecdsa::RecoveryId::new(!recid.is_y_odd(), recid.is_x_reduced()),
            ),
            None => (signature, recid),
        };
        let mut bytes = signature.to_bytes().to_vec();
        bytes.push(recid.to_byte() + 27);
        bytes
    }

    fn address_of(key: &SigningKey) -> [u8; 20] {
        let point = k256::PublicKey::from(key.verifying_key()).to_encoded_point(false);
        pubkey_to_address(point.as_bytes()).unwrap()
    }

    #[test]
    fn test_recovers_signer_address() {
        let api = MockApi::default();
        let key = SigningKey::from_slice(&[7u8; 32]).unwrap();
        let hash = keccak256(b"message");

        let signature = sign(&key, &hash);
        assert_eq!(recover_signer(&api, &hash, &signature).unwrap(), address_of(&key));

        // raw recovery id is accepted too
        let mut raw = signature.clone();
        raw[64] -= 27;
        assert_eq!(recover_signer(&api, &hash, &raw).unwrap(), address_of(&key));
    }

    #[test]
    fn test_other_message_recovers_other_address() {
        let api = MockApi::default();
        let key = SigningKey::from_slice(&[7u8; 32]).unwrap();
        let signature = sign(&key, &keccak256(b"message"));

        let recovered = recover_signer(&api, &keccak256(b"other"), &signature);
        assert_ne!(recovered.ok(), Some(address_of(&key)));
    }

    #[test]
    fn test_rejects_malformed_signatures() {
        let api = MockApi::default();
        let hash = keccak256(b"message");

        assert!(matches!(
            recover_signer(&api, &hash, &[0u8; 64]),
            Err(ContractError::InvalidSignature { .. })
        ));

        let key = SigningKey::from_slice(&[7u8; 32]).unwrap();
        let mut bad_v = sign(&key, &hash);
        bad_v[64] = 29;
        assert!(matches!(
            recover_signer(&api, &hash, &bad_v),
            Err(ContractError::InvalidSignature { .. })
        ));
    }

    #[test]
    fn test_rejects_high_s() {
        let api = MockApi::default();
        let hash = keccak256(b"message");
        let mut signature = vec![1u8; 65];
        signature[32..64].copy_from_slice(&[0xff; 32]);
        signature[64] = 27;

        let err = recover_signer(&api, &hash, &signature).unwrap_err();
        assert!(err.to_string().contains("upper half"));
    }
}
