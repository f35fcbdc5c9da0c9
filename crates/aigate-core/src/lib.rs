//! gRPC service layer for aigate: the shared-secret auth gate and the
//! AiService/HealthService implementations over the agent factory.

pub mod auth;
pub mod service;

pub mod pb {
    tonic::include_proto!("aigate.v1");

    pub const FILE_DESCRIPTOR_SET: &[u8] =
        include_bytes!(concat!(env!("OUT_DIR"), "/aigate_descriptor.bin"));
}
