/*++

Licensed under the Apache-2.0 license.

File Name:

   rotpk.rs

Abstract:

    File contains implementation of the ROTPK hash command.

--*/

use anyhow::{bail, Context};
use clap::ArgMatches;
use cot_auth::HashAlgorithm;
use cot_cert_gen::{CertGenerator, RustCrypto};
use cot_cert_types::CertSigAlg;
use std::path::PathBuf;

use crate::create::config::load_priv_key;

fn sig_alg(name: &str) -> anyhow::Result<CertSigAlg> {
    Ok(match name {
        "ecdsa-p384-sha384" => CertSigAlg::EcdsaP384Sha384,
        "ecdsa-p256-sha256" => CertSigAlg::EcdsaP256Sha256,
        _ => bail!("Unsupported signature algorithm {name}"),
    })
}

fn hash_alg(name: &str) -> anyhow::Result<HashAlgorithm> {
    Ok(match name {
        "sha256" => HashAlgorithm::Sha256,
        "sha384" => HashAlgorithm::Sha384,
        "sha512" => HashAlgorithm::Sha512,
        _ => bail!("Unsupported hash algorithm {name}"),
    })
}

/// Hash of the public key of `priv_key`, as fused in the platform
pub(crate) fn rotpk_hash(
    alg: CertSigAlg,
    hash_alg: HashAlgorithm,
    priv_key: &[u8],
) -> anyhow::Result<Vec<u8>> {
    let gen = CertGenerator::new(RustCrypto::default());
    let pub_key = gen.pub_key(alg, priv_key)?;
    gen.rotpk_hash(hash_alg, &pub_key)
}

/// Run the command
pub(crate) fn run_cmd(args: &ArgMatches) -> anyhow::Result<()> {
    let key_path: &PathBuf = args
        .get_one::<PathBuf>("key")
        .with_context(|| "key arg not specified")?;

    let alg: &String = args
        .get_one::<String>("alg")
        .with_context(|| "alg arg not specified")?;

    let hash: &String = args
        .get_one::<String>("hash-alg")
        .with_context(|| "hash-alg arg not specified")?;

    let priv_key = load_priv_key(key_path)?;
    let digest = rotpk_hash(sig_alg(alg)?, hash_alg(hash)?, &priv_key)?;
    println!("{}", hex::encode(digest));
    Ok(())
}
