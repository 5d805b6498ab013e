// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

#![no_main]

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use libfuzzer_sys::fuzz_target;

use x509shim::accessors::{
    public_key_parameter_bytes, x509_name_raw_bytes, x509_thumbprint, x509_version,
};
use x509shim::name_info::NameType;
use x509shim::Certificate;

fuzz_target!(|data: &[u8]| {
    let Ok(cert) = Certificate::from_der(data) else {
        return;
    };
    let Ok(runtime) = x509shim::init::runtime() else {
        return;
    };

    for value in 0..6 {
        let Ok(name_type) = NameType::try_from(value) else {
            continue;
        };
        let _ = runtime.name_info(&cert, name_type, false);
        let _ = runtime.name_info(&cert, name_type, true);
    }

    for host in ["www.example.com", "*.example.com", ".example.com", "a"] {
        let _ = runtime.match_hostname(&cert, host);
    }
    let _ = runtime.check_hostname(Some(&cert), Some(data), data.len().min(255) as i32);
    let _ = runtime.match_ip_address(&cert, IpAddr::V4(Ipv4Addr::LOCALHOST));
    let _ = runtime.match_ip_address(&cert, IpAddr::V6(Ipv6Addr::LOCALHOST));

    let mut buf = [0u8; 64];
    let _ = x509_name_raw_bytes(Some(cert.subject()), Some(&mut buf[..]));
    let _ = x509_name_raw_bytes(Some(cert.issuer()), None);
    let _ = public_key_parameter_bytes(Some(&cert), Some(&mut buf[..]));
    let _ = x509_thumbprint(Some(&cert), Some(&mut buf[..]));
    let _ = x509_version(Some(&cert));
    let _ = runtime.is_signature_algorithm_available("ECDSA");
});
