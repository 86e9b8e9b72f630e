use std::env;

fn main() {
    let version =
        env::var("BLIGHTCHECK_VERSION").unwrap_or_else(|_| env::var("CARGO_PKG_VERSION").unwrap());
    println!("cargo:rustc-env=BLIGHTCHECK_VERSION={version}");
    println!("cargo:rerun-if-env-changed=BLIGHTCHECK_VERSION");
}
