fn main() {
    println!("cargo:rerun-if-env-changed=SMARTBIN_CONFIG");

    // ESP-IDF link arguments are only needed for the device binary.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
