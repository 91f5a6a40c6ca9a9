use std::path::{Path, PathBuf};

use solana_sdk::signature::{read_keypair_file, Keypair};

use crate::error::AuthorityError;

pub fn load_keypair(path: &Path) -> Result<Keypair, AuthorityError> {
    read_keypair_file(path).map_err(|e| AuthorityError::KeypairLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Loads every keypair eagerly, in order. Fails on the first unreadable file.
pub fn load_keypairs(paths: &[PathBuf]) -> Result<Vec<Keypair>, AuthorityError> {
    paths.iter().map(|path| load_keypair(path)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::signature::{write_keypair_file, Signer};

    #[test]
    fn test_load_keypairs_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let first = Keypair::new();
        let second = Keypair::new();
        let first_path = dir.path().join("first.json");
        let second_path = dir.path().join("second.json");
        write_keypair_file(&first, &first_path).unwrap();
        write_keypair_file(&second, &second_path).unwrap();

        let loaded = load_keypairs(&[second_path, first_path]).unwrap();
        assert_eq!(loaded[0].pubkey(), second.pubkey());
        assert_eq!(loaded[1].pubkey(), first.pubkey());
    }

    #[test]
    fn test_missing_keypair_file() {
        let result = load_keypair(Path::new("/nonexistent/payer.json"));
        assert!(matches!(result, Err(AuthorityError::KeypairLoad { .. })));
    }
}
