use crate::constants::{
    DISPLAY_HEIGHT, DISPLAY_WIDTH, FONT_START, KEY_COUNT, MEMORY_SIZE, PROGRAM_START,
    REGISTER_COUNT, SPRITE_SHEET, STACK_DEPTH,
};

/// The framebuffer is flat and row-major, indexed as `[y * DISPLAY_WIDTH + x]`.
/// A cell is either [`PIXEL_ON`](crate::constants::PIXEL_ON) or zero.
pub type FrameBuffer = [u32; DISPLAY_WIDTH * DISPLAY_HEIGHT];

/// Pressed status of the 16 hexadecimal keys. Written by the frontend,
/// only ever read by the interpreter.
pub type Keypad = [bool; KEY_COUNT];

/// A snapshot of the machine's internal state
///
/// ## CPU
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) doubles as the carry/borrow/collision flag
/// - (i) a 16-bit memory address register
/// - (pc) a 16-bit program counter
/// - (sp) an 8-bit stack pointer indicating the next free stack slot
///
/// ## Timers
/// - 2 8-bit down-counters (delay & sound)
/// - a non-zero sound timer is the signal to keep a tone audible
///
/// ## Memory
/// - a 16-entry stack of return addresses
/// - 4096 bytes of addressable memory
/// - a 64x32 frame buffer holding the next frame to be drawn
#[derive(Copy, Clone)]
pub struct State {
    pub v: [u8; REGISTER_COUNT],
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub stack: [u16; STACK_DEPTH],
    pub memory: [u8; MEMORY_SIZE],
    pub frame_buffer: FrameBuffer,
    pub draw_flag: bool,
}

impl State {
    pub fn new() -> Self {
        // The font sprite sheet is the only thing resident below 0x200
        let mut memory = [0; MEMORY_SIZE];
        memory[FONT_START..FONT_START + SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);

        State {
            v: [0; REGISTER_COUNT],
            i: 0,
            pc: PROGRAM_START as u16,
            sp: 0,
            delay_timer: 0,
            sound_timer: 0,
            stack: [0; STACK_DEPTH],
            memory,
            frame_buffer: [0; DISPLAY_WIDTH * DISPLAY_HEIGHT],
            draw_flag: false,
        }
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}
