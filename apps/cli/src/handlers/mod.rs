pub mod negotiate;
pub mod transcode;
