//! Audio Codec Adapter - WAV 编解码实现

mod wav_codec;

pub use wav_codec::WavCodec;
