/// Total addressable memory, 0x000..=0xFFF.
pub const MEMORY_SIZE: usize = 4096;

/// Mask that truncates an effective address to the 12-bit address space.
pub const ADDRESS_MASK: usize = 0xFFF;

/// ROMs are loaded (and execution starts) at 0x200; everything below is
/// reserved for the interpreter.
pub const PROGRAM_START: usize = 0x200;

/// The font sprite sheet lives at 0x050..=0x09F.
pub const FONT_START: usize = 0x050;

/// Each font glyph is 8x5 pixels, one byte per row.
pub const FONT_GLYPH_SIZE: usize = 5;

/// The call stack holds at most 16 return addresses.
pub const STACK_DEPTH: usize = 16;

pub const REGISTER_COUNT: usize = 16;
pub const KEY_COUNT: usize = 16;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// A framebuffer cell with every bit set is "on"; zero is "off". The wide
/// representation lets a renderer consume the buffer without unpacking bits.
pub const PIXEL_ON: u32 = u32::MAX;

/// Default instruction rate for frontends that want a sane starting point.
pub const DEFAULT_CYCLES_PER_SECOND: u64 = 700;

/// # Font sprite sheet
/// One 8x5 sprite per hexadecimal digit, one byte per row, high bit leftmost.
/// `Fx29` resolves a digit to its glyph address within this sheet.
pub const SPRITE_SHEET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
