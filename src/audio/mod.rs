//! Audio intake and decoding.

pub mod decode;
pub mod intake;
pub mod wav;

pub use decode::decode_to_samples;
pub use intake::{AudioFormat, UploadedAudio};
