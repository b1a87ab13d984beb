use sdl2::pixels::PixelFormatEnum;

use otto8::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use otto8::state::FrameBuffer;

const SCALE: usize = 10;

/// # Display
/// The Chip-8 display is composed of 64x32 black/white pixels, exposed by the
/// interpreter as a flat buffer of wide cells (all bits set = on). A `render`
/// call only happens when the frame buffer was actually updated.
pub struct Display {
    canvas: sdl2::render::WindowCanvas,
}

impl Display {
    /// Creates a new display bound to an sdl2 context.
    pub fn new(sdl: &sdl2::Sdl) -> Self {
        let video_subsystem = sdl.video().expect("unable to get SDL2 video subsystem");
        let window = video_subsystem
            .window(
                "otto8",
                (DISPLAY_WIDTH * SCALE) as u32,
                (DISPLAY_HEIGHT * SCALE) as u32,
            )
            .position_centered()
            .opengl()
            .build()
            .expect("unable to build SDL2 window");
        let canvas = window
            .into_canvas()
            .build()
            .expect("unable to build SDL2 canvas");

        Display { canvas }
    }

    /// Flattens a frame buffer into an RGB24 texture: each wide cell becomes
    /// three bytes of either full or zero intensity.
    fn frame_to_texture(frame: &FrameBuffer) -> Vec<u8> {
        frame
            .iter()
            .flat_map(|&cell| {
                let intensity = if cell == 0 { 0x00 } else { 0xFF };
                [intensity; 3]
            })
            .collect()
    }

    /// Uploads the frame buffer as an RGB24 streaming texture and presents it.
    pub fn render(&mut self, frame: &FrameBuffer) {
        let texture_creator = self.canvas.texture_creator();

        let mut texture = texture_creator
            .create_texture_streaming(
                PixelFormatEnum::RGB24,
                DISPLAY_WIDTH as u32,
                DISPLAY_HEIGHT as u32,
            )
            .expect("unable to create streaming texture");

        texture
            .with_lock(None, |buffer: &mut [u8], _pitch: usize| {
                buffer.copy_from_slice(&Display::frame_to_texture(frame));
            })
            .expect("unable to lock streaming texture");

        self.canvas
            .copy(&texture, None, None)
            .expect("unable to copy texture to canvas");
        self.canvas.present()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use otto8::constants::PIXEL_ON;

    #[test]
    fn test_frame_to_texture() {
        let mut frame: FrameBuffer = [0; DISPLAY_WIDTH * DISPLAY_HEIGHT];
        frame[1] = PIXEL_ON; // (1, 0)
        frame[DISPLAY_WIDTH] = PIXEL_ON; // (0, 1)
        let texture = Display::frame_to_texture(&frame);

        let mut expected = vec![0; DISPLAY_WIDTH * DISPLAY_HEIGHT * 3];
        expected[3..6].copy_from_slice(&[0xFF, 0xFF, 0xFF]);
        expected[DISPLAY_WIDTH * 3..DISPLAY_WIDTH * 3 + 3].copy_from_slice(&[0xFF, 0xFF, 0xFF]);

        assert_eq!(texture, expected);
    }
}
