//! Loading the deployer key from the credential sources.

use std::str::FromStr;

use alloy_signer_local::{MnemonicBuilder, PrivateKeySigner, coins_bip39::English};
use anyhow::{Context, Result};

/// Build the signer from a hex private key or a BIP-39 mnemonic.
///
/// The private key takes precedence. Blank values count as absent, so an empty
/// `PRIVATE_KEY=` line yields `Ok(None)` rather than an error. A value that is present
/// but malformed is an error. The messages never echo the secret.
pub fn load_signer(
    private_key: Option<&str>,
    mnemonic: Option<&str>,
    mnemonic_index: u32,
) -> Result<Option<PrivateKeySigner>> {
    let private_key = private_key.map(str::trim).filter(|key| !key.is_empty());
    let mnemonic = mnemonic.map(str::trim).filter(|phrase| !phrase.is_empty());

    if let Some(key) = private_key {
        if mnemonic.is_some() {
            tracing::warn!("Both a private key and a mnemonic are set, using the private key");
        }
        let signer =
            PrivateKeySigner::from_str(key).context("PRIVATE_KEY is not a valid hex secp256k1 key")?;
        return Ok(Some(signer));
    }

    if let Some(phrase) = mnemonic {
        let signer = MnemonicBuilder::<English>::default()
            .phrase(phrase)
            .index(mnemonic_index)
            .context("Invalid mnemonic derivation index")?
            .build()
            .context("MNEMONIC is not a valid BIP-39 phrase")?;
        tracing::debug!(index = mnemonic_index, "Derived signer from mnemonic");
        return Ok(Some(signer));
    }

    Ok(None)
}
