//! Generated from `proto/daemon_profiles.proto` by `build.rs`.

tonic::include_proto!("daemon");
