use std::io::Read;

use log::{debug, info, trace};

use crate::constants::{MEMORY_SIZE, PROGRAM_START};
use crate::error::Error;
use crate::instruction::Instruction;
use crate::opcode::Opcode;
use crate::state::{FrameBuffer, Keypad, State};

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - the current `state` snapshot
///  - `pressed_keys` with public interfaces for manipulating them
///  - a count of unmapped opcodes it has skipped
///
/// Supplies interfaces for:
/// - loading ROMs
/// - pressing and releasing keys
/// - advancing the machine one cycle at a time
/// - inspecting its frame buffer for rendering by some display
pub struct Chip8 {
    state: State,
    pressed_keys: Keypad,
    unknown_opcodes: u64,
}

impl Chip8 {
    pub fn new() -> Self {
        Chip8 {
            state: State::new(),
            pressed_keys: [false; 16],
            unknown_opcodes: 0,
        }
    }

    /// Load a ROM image into memory at the program start offset.
    ///
    /// Reads `reader` to its end and returns the number of bytes loaded.
    /// Images that don't fit between the load offset and the end of the
    /// address space are rejected without touching memory.
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<usize, Error> {
        let mut image = Vec::new();
        reader.read_to_end(&mut image)?;

        let max = MEMORY_SIZE - PROGRAM_START;
        if image.len() > max {
            return Err(Error::RomTooLarge {
                size: image.len(),
                max,
            });
        }

        self.state.memory[PROGRAM_START..PROGRAM_START + image.len()].copy_from_slice(&image);
        info!("loaded {} byte ROM", image.len());
        Ok(image.len())
    }

    /// Advances the machine by a single cycle:
    /// - fetches the big-endian opcode at the program counter
    /// - advances the program counter past it
    /// - decodes and executes the instruction
    /// - decrements each non-zero timer by one
    ///
    /// Timer decrement is deliberately coupled 1:1 with instruction
    /// execution; pacing both belongs to the caller.
    pub fn step(&mut self) -> Result<(), Error> {
        let op = self.fetch();
        let instruction = Instruction::decode(op);
        trace!(
            "{:?} -> {:?} [pc {:#06X} i {:#06X}]",
            op,
            instruction,
            self.state.pc,
            self.state.i
        );

        if let Instruction::Unknown(word) = instruction {
            self.unknown_opcodes += 1;
            debug!(
                "skipping unmapped opcode {:#06X} at {:#06X} ({} so far)",
                word,
                self.state.pc.wrapping_sub(2),
                self.unknown_opcodes
            );
        }

        self.state = instruction.execute(&self.state, &self.pressed_keys)?;

        if self.state.delay_timer > 0 {
            self.state.delay_timer -= 1;
        }
        if self.state.sound_timer > 0 {
            self.state.sound_timer -= 1;
        }
        Ok(())
    }

    /// Set the pressed status of a key (0x0..=0xF).
    pub fn key_press(&mut self, key: u8) {
        self.pressed_keys[key as usize & 0xF] = true;
    }

    /// Unset the pressed status of a key (0x0..=0xF).
    pub fn key_release(&mut self, key: u8) {
        self.pressed_keys[key as usize & 0xF] = false;
    }

    /// Returns the frame buffer if the display should be redrawn, clearing
    /// the draw flag in the process.
    pub fn frame(&mut self) -> Option<&FrameBuffer> {
        if self.state.draw_flag {
            self.state.draw_flag = false;
            Some(&self.state.frame_buffer)
        } else {
            None
        }
    }

    /// The frame buffer, regardless of whether anything was redrawn.
    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    /// Whether the external collaborator should keep a tone audible.
    pub fn sound_active(&self) -> bool {
        self.state.sound_timer > 0
    }

    /// How many unmapped opcodes have been skipped as no-ops so far.
    pub fn unknown_opcode_count(&self) -> u64 {
        self.unknown_opcodes
    }

    /// Gets the opcode currently pointed at by the pc and advances past it.
    /// Memory is stored as bytes, but opcodes are 16 bits so two subsequent
    /// bytes are combined big-endian.
    fn fetch(&mut self) -> Opcode {
        let pc = self.state.pc as usize % MEMORY_SIZE;
        let word = u16::from_be_bytes([
            self.state.memory[pc],
            self.state.memory[(pc + 1) % MEMORY_SIZE],
        ]);
        self.state.pc = self.state.pc.wrapping_add(2);
        Opcode::from(word)
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::PIXEL_ON;

    #[test]
    fn test_chip8_fetches_big_endian() {
        let mut chip8 = Chip8::new();
        chip8.state.memory[0x200..0x202].copy_from_slice(&[0xAA, 0xBB]);
        assert_eq!(chip8.fetch().word(), 0xAABB);
        assert_eq!(chip8.state.pc, 0x202);
    }

    #[test]
    fn test_load_rom_and_step() {
        // 0x600A: V0 = 0x0A
        let mut chip8 = Chip8::new();
        let rom: Vec<u8> = vec![0x60, 0x0A];
        assert_eq!(chip8.load_rom(&mut rom.as_slice()).unwrap(), 2);
        chip8.step().unwrap();
        assert_eq!(chip8.state.v[0x0], 10);
        assert_eq!(chip8.state.pc, 0x202);
    }

    #[test]
    fn test_load_rom_rejects_oversized_image() {
        let mut chip8 = Chip8::new();
        let rom = vec![0x0; MEMORY_SIZE - PROGRAM_START + 1];
        let result = chip8.load_rom(&mut rom.as_slice());
        assert!(matches!(
            result,
            Err(Error::RomTooLarge { size: 3585, max: 3584 })
        ));
        // Memory must be untouched after a rejected load
        assert!(chip8.state.memory[PROGRAM_START..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_load_rom_fills_available_memory_exactly() {
        let mut chip8 = Chip8::new();
        let rom = vec![0xAB; MEMORY_SIZE - PROGRAM_START];
        assert_eq!(chip8.load_rom(&mut rom.as_slice()).unwrap(), 3584);
        assert_eq!(chip8.state.memory[MEMORY_SIZE - 1], 0xAB);
    }

    #[test]
    fn test_step_decrements_timers_with_instructions() {
        let mut chip8 = Chip8::new();
        chip8.state.memory[0x200..0x204].copy_from_slice(&[0x60, 0x01, 0x60, 0x02]);
        chip8.state.delay_timer = 2;
        chip8.state.sound_timer = 1;
        chip8.step().unwrap();
        assert_eq!(chip8.state.delay_timer, 1);
        assert_eq!(chip8.state.sound_timer, 0);
        assert!(!chip8.sound_active());
        chip8.step().unwrap();
        // Timers saturate at zero
        assert_eq!(chip8.state.delay_timer, 0);
        assert_eq!(chip8.state.sound_timer, 0);
    }

    #[test]
    fn test_call_then_return_restores_pc() {
        // 0x200: CALL 0x300; 0x300: RET
        let mut chip8 = Chip8::new();
        chip8.state.memory[0x200..0x202].copy_from_slice(&[0x23, 0x00]);
        chip8.state.memory[0x300..0x302].copy_from_slice(&[0x00, 0xEE]);
        chip8.step().unwrap();
        assert_eq!(chip8.state.pc, 0x300);
        chip8.step().unwrap();
        // Back to the address the call's own fetch-advance produced
        assert_eq!(chip8.state.pc, 0x202);
    }

    #[test]
    fn test_clear_after_draw_blanks_the_screen() {
        // 0x200: DRW V0 V0 5; 0x202: CLS
        let mut chip8 = Chip8::new();
        chip8.state.memory[0x200..0x204].copy_from_slice(&[0xD0, 0x05, 0x00, 0xE0]);
        chip8.state.i = 0x050;
        chip8.step().unwrap();
        assert!(chip8.frame_buffer().contains(&PIXEL_ON));
        chip8.step().unwrap();
        assert!(chip8.frame_buffer().iter().all(|&p| p == 0));
    }

    #[test]
    fn test_frame_reports_fresh_draws_once() {
        let mut chip8 = Chip8::new();
        assert!(chip8.frame().is_none());
        chip8.state.memory[0x200..0x202].copy_from_slice(&[0x00, 0xE0]);
        chip8.step().unwrap();
        assert!(chip8.frame().is_some());
        assert!(chip8.frame().is_none());
    }

    #[test]
    fn test_unknown_opcodes_are_counted_and_skipped() {
        let mut chip8 = Chip8::new();
        chip8.state.memory[0x200..0x204].copy_from_slice(&[0x01, 0x23, 0x60, 0xFF]);
        chip8.step().unwrap();
        assert_eq!(chip8.unknown_opcode_count(), 1);
        assert_eq!(chip8.state.pc, 0x202);
        chip8.step().unwrap();
        assert_eq!(chip8.unknown_opcode_count(), 1);
        assert_eq!(chip8.state.v[0x0], 0xFF);
    }

    #[test]
    fn test_wait_key_spins_until_key_press() {
        // 0xF10A: V1 = next key
        let mut chip8 = Chip8::new();
        chip8.state.memory[0x200..0x202].copy_from_slice(&[0xF1, 0x0A]);
        chip8.step().unwrap();
        assert_eq!(chip8.state.pc, 0x200);
        chip8.step().unwrap();
        assert_eq!(chip8.state.pc, 0x200);
        chip8.key_press(0x7);
        chip8.step().unwrap();
        assert_eq!(chip8.state.pc, 0x202);
        assert_eq!(chip8.state.v[0x1], 0x7);
    }

    #[test]
    fn test_key_press_and_release() {
        let mut chip8 = Chip8::new();
        chip8.key_press(0xE);
        assert!(chip8.pressed_keys[0xE]);
        chip8.key_release(0xE);
        assert!(!chip8.pressed_keys[0xE]);
    }

    #[test]
    fn test_step_surfaces_stack_underflow() {
        let mut chip8 = Chip8::new();
        chip8.state.memory[0x200..0x202].copy_from_slice(&[0x00, 0xEE]);
        assert!(matches!(chip8.step(), Err(Error::StackUnderflow { .. })));
    }

    #[test]
    fn test_step_surfaces_stack_overflow() {
        // An endless CALL-to-self exhausts the 16-entry stack
        let mut chip8 = Chip8::new();
        chip8.state.memory[0x200..0x202].copy_from_slice(&[0x22, 0x00]);
        for _ in 0..16 {
            chip8.step().unwrap();
        }
        assert!(matches!(chip8.step(), Err(Error::StackOverflow { .. })));
    }
}
