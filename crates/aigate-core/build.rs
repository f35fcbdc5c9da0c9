fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Vendored protoc keeps the build self-contained.
    unsafe {
        std::env::set_var("PROTOC", protoc_bin_vendored::protoc_bin_path()?);
    }
    let out_dir = std::path::PathBuf::from(std::env::var("OUT_DIR")?);
    tonic_prost_build::configure()
        .build_server(true)
        .build_client(false)
        .file_descriptor_set_path(out_dir.join("aigate_descriptor.bin"))
        .compile_protos(&["proto/aigate.proto"], &["proto"])?;
    println!("cargo:rerun-if-changed=proto/aigate.proto");
    Ok(())
}
