/*++

Licensed under the Apache-2.0 license.

File Name:

   mod.rs

Abstract:

    File contains implementation of the certificate chain creation command.

--*/

pub(crate) mod config;

use anyhow::{anyhow, Context};
use clap::ArgMatches;
use config::{ChainConfig, ExtConfig};
use cot_auth::HashAlgorithm;
use cot_cert_gen::*;
use cot_cert_types::CertSigAlg;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Loaded private key
struct Key {
    alg: CertSigAlg,
    priv_key: Vec<u8>,
    pub_key: Vec<u8>,
}

/// Run the command
pub(crate) fn run_cmd(args: &ArgMatches) -> anyhow::Result<()> {
    let config_path: &PathBuf = args
        .get_one::<PathBuf>("config")
        .with_context(|| "config arg not specified")?;

    let config = config::load_chain_config(config_path)?;
    let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));

    for out in create_chain(&config, base_dir)? {
        println!("{}", out.display());
    }
    Ok(())
}

/// Create every certificate of `config`. Relative paths are resolved
/// against `base_dir`.
///
/// # Returns
///
/// * `Vec<PathBuf>` - Certificate files written
pub(crate) fn create_chain(config: &ChainConfig, base_dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let gen = CertGenerator::new(RustCrypto::default());
    let hash_alg = HashAlgorithm::from(config.hash_alg);

    let mut keys = BTreeMap::new();
    for (name, key_config) in config.keys.iter() {
        let priv_key = config::load_priv_key(&base_dir.join(&key_config.file))?;
        let pub_key = gen
            .pub_key(key_config.alg, &priv_key)
            .with_context(|| format!("Invalid key {name}"))?;
        keys.insert(
            name.as_str(),
            Key {
                alg: key_config.alg,
                priv_key,
                pub_key,
            },
        );
    }
    let key = |name: &str| {
        keys.get(name)
            .ok_or_else(|| anyhow!("Key {name} is not defined"))
    };

    let mut written = vec![];
    for cert_config in config.certs.iter() {
        let signing_key = key(&cert_config.signing_key)?;
        let mut extensions = vec![];
        for ext in cert_config.extensions.iter() {
            extensions.push(match ext {
                ExtConfig::NvCounter { oid, value } => CertExtension::nv_counter(oid, *value),
                ExtConfig::Hash { oid, file } => {
                    let path = base_dir.join(file);
                    let data = std::fs::read(&path)
                        .with_context(|| format!("Failed to read image {}", path.display()))?;
                    CertExtension::hash(oid, &gen.digest(hash_alg, &data)?)
                }
                ExtConfig::PubKey { oid, key: name } => {
                    CertExtension::pub_key(oid, &key(name)?.pub_key)
                }
            });
        }

        let cert_gen_config = CertConfig {
            sig_alg: signing_key.alg,
            subject_pub_key: key(&cert_config.subject_key)?.pub_key.clone(),
            extensions,
        };
        let out = base_dir.join(&cert_config.out);
        let cert = gen
            .generate(&cert_gen_config, &signing_key.priv_key)
            .with_context(|| format!("Failed to generate {}", out.display()))?;
        std::fs::write(&out, cert)
            .with_context(|| format!("Failed to write certificate {}", out.display()))?;
        written.push(out);
    }
    Ok(written)
}
