// Licensed under the Apache-2.0 license

//! Fixed private keys for tests and sample chains. Never use them to sign
//! anything a platform trusts.
//!
//! Every key is a P-384 scalar. The leading 32 bytes of each key are also a
//! valid P-256 scalar.

use cot_cert_types::CertSigAlg;

/// Scalar of `key` sized for `alg`
pub fn fake_key(key: &[u8; 48], alg: CertSigAlg) -> &[u8] {
    &key[..alg.priv_key_len()]
}

pub const FAKE_ROT_KEY: [u8; 48] = [
    0x29, 0xf9, 0x39, 0xea, 0x41, 0x74, 0x64, 0x99, 0xd5, 0x50, 0xc6, 0xfa,
    0x63, 0x68, 0xb0, 0xd7, 0x61, 0xe0, 0x9b, 0x4c, 0x75, 0xb2, 0x19, 0x22,
    0x86, 0xf9, 0x62, 0x40, 0x00, 0xea, 0x1d, 0x99, 0xac, 0xe9, 0x4b, 0xa6,
    0x7a, 0xe8, 0x9b, 0x0e, 0x3f, 0x21, 0x0c, 0xf1, 0x9a, 0x45, 0xb6, 0xb5,
];

pub const FAKE_TRUSTED_WORLD_KEY: [u8; 48] = [
    0xf2, 0xee, 0x42, 0x7b, 0x44, 0x12, 0xf4, 0x6f, 0x8f, 0xb0, 0x20, 0xa5,
    0xc2, 0x3b, 0x01, 0x54, 0xb3, 0xfc, 0xb2, 0x01, 0xf9, 0x3c, 0x2e, 0xe2,
    0x92, 0x3f, 0xd5, 0x77, 0xf8, 0x53, 0x20, 0xbb, 0x28, 0x9e, 0xb2, 0x76,
    0x2b, 0x6b, 0x21, 0xd3, 0x5c, 0xdb, 0x39, 0x25, 0xa5, 0x7d, 0x50, 0x43,
];

pub const FAKE_NON_TRUSTED_WORLD_KEY: [u8; 48] = [
    0xaf, 0x72, 0xa7, 0x4c, 0xfb, 0xba, 0xcc, 0x3c, 0x7a, 0xd2, 0xf9, 0xd9,
    0xc9, 0x69, 0xd1, 0xc9, 0x19, 0xc2, 0xd8, 0x03, 0x0a, 0x53, 0x74, 0x9a,
    0xee, 0x73, 0x02, 0x67, 0x7c, 0x11, 0xa5, 0x2d, 0xee, 0x63, 0xe4, 0xc8,
    0x0b, 0x5c, 0x02, 0x93, 0x28, 0xd3, 0x5c, 0x27, 0x5f, 0x95, 0x9a, 0xee,
];

pub const FAKE_SCP_FW_CONTENT_KEY: [u8; 48] = [
    0xaf, 0xbd, 0xfc, 0x7d, 0x36, 0xb5, 0x46, 0x29, 0xd1, 0x2c, 0x4c, 0xb5,
    0x33, 0x92, 0x6c, 0x30, 0x20, 0x61, 0x16, 0x17, 0x86, 0xb5, 0x0b, 0x23,
    0x60, 0x46, 0xff, 0x93, 0x17, 0xea, 0x01, 0x44, 0xbc, 0x90, 0x0c, 0x70,
    0xb8, 0xcb, 0x36, 0xac, 0x26, 0x8b, 0x80, 0x79, 0xe3, 0xae, 0xaa, 0xaf,
];

pub const FAKE_SOC_FW_CONTENT_KEY: [u8; 48] = [
    0x59, 0xfd, 0xf8, 0x49, 0xe3, 0x9f, 0x42, 0x56, 0x19, 0x34, 0x2e, 0xd2,
    0x81, 0xd2, 0x8d, 0x3d, 0x45, 0xab, 0x32, 0x19, 0x51, 0x74, 0x58, 0x2c,
    0xec, 0xb4, 0xe9, 0xdf, 0x9c, 0xc2, 0xe9, 0x91, 0xb7, 0x5f, 0x88, 0xfd,
    0xfa, 0x4b, 0xc6, 0xa4, 0x6b, 0x88, 0x34, 0x0f, 0x05, 0xdd, 0x88, 0x90,
];

pub const FAKE_TOS_FW_CONTENT_KEY: [u8; 48] = [
    0x50, 0x5b, 0x77, 0x77, 0x2c, 0x17, 0xf4, 0x31, 0x67, 0x4c, 0x95, 0x09,
    0x28, 0xa3, 0xde, 0x32, 0x2d, 0x00, 0x39, 0x78, 0x7d, 0xd3, 0xdd, 0x3a,
    0x34, 0x78, 0x2b, 0xbf, 0xa3, 0xc6, 0xf2, 0xcb, 0x3e, 0x7c, 0x11, 0xdc,
    0x84, 0x47, 0x88, 0x99, 0xd5, 0x82, 0x13, 0x40, 0x08, 0xfb, 0x74, 0x62,
];

pub const FAKE_NT_FW_CONTENT_KEY: [u8; 48] = [
    0x51, 0xfe, 0x09, 0x97, 0x59, 0xc8, 0xb1, 0x63, 0x10, 0x90, 0xfa, 0x12,
    0x37, 0xe5, 0xfd, 0x59, 0x7a, 0x91, 0x39, 0x2f, 0x80, 0x33, 0x0b, 0x7c,
    0x77, 0x86, 0x13, 0x4d, 0xcd, 0x38, 0x0d, 0x45, 0xdc, 0xb1, 0x4b, 0x84,
    0xf2, 0xee, 0x8d, 0x6e, 0x60, 0x1e, 0x89, 0x68, 0x7a, 0x6f, 0x94, 0x76,
];

pub const FAKE_PROT_KEY: [u8; 48] = [
    0x7b, 0xf5, 0xcc, 0xde, 0x99, 0x5b, 0xd3, 0x66, 0x02, 0x06, 0x45, 0x0e,
    0x30, 0x80, 0xd9, 0x4d, 0x74, 0x8f, 0x34, 0xd4, 0xf0, 0x03, 0xb6, 0xdd,
    0xca, 0x79, 0x86, 0x60, 0xa3, 0x48, 0x08, 0xf7, 0xd7, 0xf2, 0x7f, 0xe0,
    0x6a, 0xc7, 0xf4, 0x62, 0x26, 0xfb, 0xcc, 0x1e, 0x36, 0xbc, 0x3d, 0xbe,
];
