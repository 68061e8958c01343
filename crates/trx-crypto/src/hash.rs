//! Keccak-256 and SHA-256 hashing

use sha2::Sha256;
use sha3::{Digest, Keccak256};
use trx_primitives::H256;

/// Compute the Keccak-256 hash of the input data
pub fn keccak256(data: &[u8]) -> H256 {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    H256::from_bytes(hasher.finalize().into())
}

/// Compute the SHA-256 hash of the input data
pub fn sha256(data: &[u8]) -> H256 {
    let mut hasher = Sha256::new();
    hasher.update(data);
    H256::from_bytes(hasher.finalize().into())
}

/// Compute SHA-256 twice (the base58check checksum hash)
pub fn sha256d(data: &[u8]) -> H256 {
    sha256(sha256(data).as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keccak256_empty() {
        // keccak256("")
        let hash = keccak256(&[]);
        assert_eq!(
            hash.to_hex(),
            "0xc5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_keccak256_hello() {
        let hash = keccak256(b"hello");
        assert_eq!(
            hash.to_hex(),
            "0x1c8aff950685c2ed4bc3174f3472287b56d9517b9c948127319a09a7a36deac8"
        );
    }

    #[test]
    fn test_keccak256_transfer_selector() {
        // keccak256("transfer(address,uint256)") starts with the ERC-20/TRC-20
        // transfer selector a9059cbb
        let hash = keccak256(b"transfer(address,uint256)");
        assert_eq!(&hash.as_bytes()[..4], &[0xa9, 0x05, 0x9c, 0xbb]);
    }

    #[test]
    fn test_sha256_empty() {
        let hash = sha256(&[]);
        assert_eq!(
            hash.to_hex(),
            "0xe3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_sha256_abc() {
        let hash = sha256(b"abc");
        assert_eq!(
            hash.to_hex(),
            "0xba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_sha256d_matches_manual() {
        let data = b"checksum input";
        assert_eq!(sha256d(data), sha256(sha256(data).as_bytes()));
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(keccak256(b"x"), keccak256(b"x"));
        assert_ne!(keccak256(b"x"), keccak256(b"y"));
        assert_ne!(sha256(b"x"), keccak256(b"x"));
    }
}
