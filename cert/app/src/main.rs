/*++

Licensed under the Apache-2.0 license.

File Name:

   main.rs

Abstract:

    Main entry point of the Chain-of-Trust certificate tool

--*/
use std::path::PathBuf;

use clap::{arg, value_parser, Command};

mod create;
mod rotpk;

/// Entry point
fn main() {
    let sub_cmds = vec![
        Command::new("create")
            .about("Create a certificate chain")
            .arg(
                arg!(--"config" <FILE> "Chain configuration file")
                    .required(true)
                    .value_parser(value_parser!(PathBuf)),
            ),
        Command::new("rotpk-hash")
            .about("Print the ROTPK hash of a private key")
            .arg(
                arg!(--"key" <FILE> "Hex encoded private key")
                    .required(true)
                    .value_parser(value_parser!(PathBuf)),
            )
            .arg(
                arg!(--"alg" <ALG> "Signature algorithm")
                    .required(false)
                    .value_parser(["ecdsa-p384-sha384", "ecdsa-p256-sha256"])
                    .default_value("ecdsa-p384-sha384"),
            )
            .arg(
                arg!(--"hash-alg" <ALG> "Hash algorithm")
                    .required(false)
                    .value_parser(["sha256", "sha384", "sha512"])
                    .default_value("sha256"),
            ),
    ];

    let cmd = Command::new("cot-cert")
        .arg_required_else_help(true)
        .subcommands(sub_cmds)
        .about("Chain-of-Trust certificate tools")
        .get_matches();

    let result = match cmd.subcommand() {
        Some(("create", args)) => create::run_cmd(args),
        Some(("rotpk-hash", args)) => rotpk::run_cmd(args),
        _ => unreachable!(),
    };

    if let Err(err) = result {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

#[no_mangle]
extern "C" fn cfi_panic_handler(code: u32) -> ! {
    eprintln!("CFI panic {code:#x}");
    std::process::exit(1);
}
