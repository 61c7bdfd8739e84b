fn main() {
    let build_number = std::fs::read_to_string("BUILD_NUMBER")
        .map_or_else(|_| "0".to_string(), |s| s.trim().to_string());

    println!("cargo:rustc-env=BUILD_NUMBER={build_number}");
    println!("cargo:rerun-if-changed=BUILD_NUMBER");
}
