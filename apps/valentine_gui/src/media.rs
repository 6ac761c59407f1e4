//! Remote image decoding and frame playback for the two screen images.

use std::io::Cursor;

use image::AnimationDecoder;

const MAX_MEDIA_EDGE: u32 = 512;
const DEFAULT_FRAME_DELAY_MS: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFrame {
    pub width: usize,
    pub height: usize,
    pub rgba: Vec<u8>,
    pub delay_ms: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedMedia {
    pub frames: Vec<MediaFrame>,
}

impl DecodedMedia {
    pub fn is_animated(&self) -> bool {
        self.frames.len() > 1
    }
}

fn is_gif(bytes: &[u8]) -> bool {
    bytes.len() >= 6 && (&bytes[..6] == b"GIF87a" || &bytes[..6] == b"GIF89a")
}

/// GIFs keep every frame; anything else decodes to a single still frame.
pub fn decode_media(bytes: &[u8]) -> Result<DecodedMedia, String> {
    if is_gif(bytes) {
        return decode_gif(bytes);
    }

    let still = image::load_from_memory(bytes)
        .map_err(|err| err.to_string())?
        .thumbnail(MAX_MEDIA_EDGE, MAX_MEDIA_EDGE)
        .to_rgba8();
    Ok(DecodedMedia {
        frames: vec![MediaFrame {
            width: still.width() as usize,
            height: still.height() as usize,
            rgba: still.into_raw(),
            delay_ms: DEFAULT_FRAME_DELAY_MS,
        }],
    })
}

fn decode_gif(bytes: &[u8]) -> Result<DecodedMedia, String> {
    let decoder = image::codecs::gif::GifDecoder::new(Cursor::new(bytes))
        .map_err(|e| format!("gif decode init failed: {e}"))?;

    let frames = decoder
        .into_frames()
        .collect_frames()
        .map_err(|e| format!("gif frame decode failed: {e}"))?;

    if frames.is_empty() {
        return Err("gif has no frames".to_string());
    }

    let mut out_frames = Vec::with_capacity(frames.len());
    for frame in frames {
        let (num, den) = frame.delay().numer_denom_ms();
        let delay_ms = if den == 0 {
            DEFAULT_FRAME_DELAY_MS
        } else {
            // clamp so a zero-delay gif does not spin the repaint loop
            ((num as f32 / den as f32).round() as u32).clamp(20, 10_000)
        };

        let resized = image::DynamicImage::ImageRgba8(frame.into_buffer())
            .thumbnail(MAX_MEDIA_EDGE, MAX_MEDIA_EDGE)
            .to_rgba8();
        out_frames.push(MediaFrame {
            width: resized.width() as usize,
            height: resized.height() as usize,
            rgba: resized.into_raw(),
            delay_ms,
        });
    }

    Ok(DecodedMedia { frames: out_frames })
}

/// Frame cursor over decoded media, driven by the UI clock in seconds.
#[derive(Debug, Clone)]
pub struct FramePlayback {
    media: DecodedMedia,
    current: usize,
    next_frame_at_secs: Option<f64>,
}

impl FramePlayback {
    pub fn new(media: DecodedMedia) -> Self {
        Self {
            media,
            current: 0,
            next_frame_at_secs: None,
        }
    }

    pub fn current_frame(&self) -> Option<&MediaFrame> {
        self.media.frames.get(self.current)
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn is_animated(&self) -> bool {
        self.media.is_animated()
    }

    /// Returns true when the visible frame changed.
    pub fn advance(&mut self, now_secs: f64) -> bool {
        if !self.is_animated() {
            return false;
        }

        let Some(mut next_at) = self.next_frame_at_secs else {
            let first_delay = self.media.frames[self.current].delay_ms;
            self.next_frame_at_secs = Some(now_secs + f64::from(first_delay) / 1000.0);
            return false;
        };

        let mut changed = false;
        while now_secs >= next_at {
            self.current = (self.current + 1) % self.media.frames.len();
            next_at += f64::from(self.media.frames[self.current].delay_ms) / 1000.0;
            changed = true;
        }
        self.next_frame_at_secs = Some(next_at);
        changed
    }
}

#[cfg(test)]
#[path = "tests/media_tests.rs"]
mod tests;
