use super::*;
use image::{codecs::gif::GifEncoder, Delay, Frame, ImageFormat, Rgba, RgbaImage};

fn gif_bytes(delays_ms: &[u32]) -> Vec<u8> {
    let mut bytes = Vec::new();
    {
        let mut encoder = GifEncoder::new(&mut bytes);
        let frames = delays_ms.iter().enumerate().map(|(i, delay)| {
            let shade = (i as u8).wrapping_mul(60);
            let buffer = RgbaImage::from_pixel(8, 6, Rgba([shade, 20, 200, 255]));
            Frame::from_parts(buffer, 0, 0, Delay::from_numer_denom_ms(*delay, 1))
        });
        encoder.encode_frames(frames).expect("encode gif");
    }
    bytes
}

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba([255, 0, 0, 255])))
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("encode png");
    bytes
}

fn still(delay_ms: u32) -> MediaFrame {
    MediaFrame {
        width: 1,
        height: 1,
        rgba: vec![0, 0, 0, 255],
        delay_ms,
    }
}

#[test]
fn decodes_every_gif_frame_with_delays() {
    let media = decode_media(&gif_bytes(&[50, 120, 80])).expect("decode");
    assert_eq!(media.frames.len(), 3);
    assert!(media.is_animated());
    assert_eq!(media.frames[0].width, 8);
    assert_eq!(media.frames[0].height, 6);
    assert_eq!(media.frames[0].rgba.len(), 8 * 6 * 4);
    assert_eq!(media.frames[1].delay_ms, 120);
}

#[test]
fn still_images_decode_to_one_frame_and_are_downscaled() {
    let media = decode_media(&png_bytes(1024, 256)).expect("decode");
    assert_eq!(media.frames.len(), 1);
    assert!(!media.is_animated());
    assert_eq!(media.frames[0].width, 512);
    assert_eq!(media.frames[0].height, 128);
}

#[test]
fn garbage_bytes_are_an_error() {
    assert!(decode_media(b"definitely not an image").is_err());
    assert!(decode_media(b"GIF89a-truncated").is_err());
}

#[test]
fn playback_waits_for_first_delay_then_cycles() {
    let mut playback = FramePlayback::new(DecodedMedia {
        frames: vec![still(100), still(200)],
    });
    assert_eq!(playback.current_index(), 0);

    assert!(!playback.advance(10.0));
    assert!(!playback.advance(10.05));
    assert!(playback.advance(10.15));
    assert_eq!(playback.current_index(), 1);
    assert!(!playback.advance(10.2));
    assert!(playback.advance(10.35));
    assert_eq!(playback.current_index(), 0);
}

#[test]
fn playback_catches_up_after_a_stall() {
    let mut playback = FramePlayback::new(DecodedMedia {
        frames: vec![still(100), still(100), still(100)],
    });
    playback.advance(0.0);
    assert!(playback.advance(0.45));
    assert_eq!(playback.current_index(), 1);
}

#[test]
fn single_frame_never_advances() {
    let mut playback = FramePlayback::new(DecodedMedia {
        frames: vec![still(100)],
    });
    assert!(!playback.advance(0.0));
    assert!(!playback.advance(100.0));
    assert_eq!(playback.current_index(), 0);
    assert!(playback.current_frame().is_some());
}
