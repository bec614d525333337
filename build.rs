use std::env;

#[allow(clippy::unusual_byte_groupings)]
fn main() {
    println!("cargo:rustc-check-cfg=cfg(boringssl)");
    println!("cargo:rustc-check-cfg=cfg(libressl)");
    println!("cargo:rustc-check-cfg=cfg(libressl381)");
    println!("cargo:rustc-check-cfg=cfg(ossl110)");
    println!("cargo:rustc-check-cfg=cfg(ossl111)");
    println!("cargo:rustc-check-cfg=cfg(ossl300)");

    // exported by openssl-sys, which requires the direct dependency
    if env::var("DEP_OPENSSL_BORINGSSL").is_ok() {
        println!("cargo:rustc-cfg=boringssl");
        return;
    }

    if let Ok(version) = env::var("DEP_OPENSSL_LIBRESSL_VERSION_NUMBER") {
        println!("cargo:rustc-cfg=libressl");

        let version = u64::from_str_radix(&version, 16).unwrap();
        // ex_data class numbers follow OpenSSL 1.1 from here on
        if version >= 0x3_08_01_00_0 {
            println!("cargo:rustc-cfg=libressl381");
        }
        return;
    }

    if let Ok(version) = env::var("DEP_OPENSSL_VERSION_NUMBER") {
        let version = u64::from_str_radix(&version, 16).unwrap();

        if version < 0x1_01_00_00_0 {
            panic!("OpenSSL 1.1.0 or newer is required, found version number {version:#x}");
        }
        println!("cargo:rustc-cfg=ossl110");
        if version >= 0x1_01_01_00_0 {
            println!("cargo:rustc-cfg=ossl111");
        }
        if version >= 0x3_00_00_00_0 {
            println!("cargo:rustc-cfg=ossl300");
        }
    }
}
