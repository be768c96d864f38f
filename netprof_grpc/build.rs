fn main() {
    tonic_build::configure()
        .build_client(true)
        // the server side only backs the in-process daemon used by tests
        .build_server(true)
        .compile_protos(&["proto/daemon_profiles.proto"], &["proto"])
        .unwrap();
}
