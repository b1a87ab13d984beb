use crate::error::Error;
use crate::opcode::Opcode;
use crate::operations;
use crate::state::{Keypad, State};

/// A decoded instruction: one variant per operation, with its operand fields
/// already extracted from the opcode's nibbles.
///
/// Decoding routes on at most two keys: the top nibble selects the family,
/// and for the 0x0, 0x8, 0xE and 0xF families a second key (the bottom nibble,
/// or the bottom byte for 0xF) selects the operation within it. Anything that
/// matches no pattern decodes to `Unknown`, never a panic; historically
/// opcodes can be legitimately absent and must execute as a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// 00E0: turn every framebuffer pixel off.
    Clear,
    /// 00EE: pop the program counter off the stack.
    Return,
    /// 1nnn: jump.
    Jump { nnn: u16 },
    /// 2nnn: push the program counter, then jump.
    Call { nnn: u16 },
    /// 3xkk: skip the next instruction if Vx == kk.
    SkipEqImm { x: u8, kk: u8 },
    /// 4xkk: skip the next instruction if Vx != kk.
    SkipNeImm { x: u8, kk: u8 },
    /// 5xy0: skip the next instruction if Vx == Vy.
    SkipEqReg { x: u8, y: u8 },
    /// 6xkk: Vx = kk.
    LoadImm { x: u8, kk: u8 },
    /// 7xkk: Vx += kk, wrapping, no flag.
    AddImm { x: u8, kk: u8 },
    /// 8xy0: Vx = Vy.
    Copy { x: u8, y: u8 },
    /// 8xy1: Vx |= Vy.
    Or { x: u8, y: u8 },
    /// 8xy2: Vx &= Vy.
    And { x: u8, y: u8 },
    /// 8xy3: Vx ^= Vy.
    Xor { x: u8, y: u8 },
    /// 8xy4: Vx += Vy; VF = carry.
    Add { x: u8, y: u8 },
    /// 8xy5: Vx -= Vy; VF = 1 iff Vx > Vy.
    Sub { x: u8, y: u8 },
    /// 8xy6: Vx >>= 1; VF = the bit shifted out.
    ShiftRight { x: u8 },
    /// 8xy7: Vx = Vy - Vx; VF = 1 iff Vy > Vx.
    SubReverse { x: u8, y: u8 },
    /// 8xyE: Vx <<= 1; VF = the bit shifted out.
    ShiftLeft { x: u8 },
    /// 9xy0: skip the next instruction if Vx != Vy.
    SkipNeReg { x: u8, y: u8 },
    /// Annn: I = nnn.
    LoadIndex { nnn: u16 },
    /// Bnnn: jump to nnn + V0.
    JumpOffset { nnn: u16 },
    /// Cxkk: Vx = random byte & kk.
    Random { x: u8, kk: u8 },
    /// Dxyn: XOR an n-row sprite from memory at I onto the framebuffer at
    /// (Vx, Vy); VF = collision.
    Draw { x: u8, y: u8, n: u8 },
    /// Ex9E: skip the next instruction if the key numbered Vx is pressed.
    SkipKeyPressed { x: u8 },
    /// ExA1: skip the next instruction if the key numbered Vx is not pressed.
    SkipKeyReleased { x: u8 },
    /// Fx07: Vx = delay timer.
    ReadDelay { x: u8 },
    /// Fx0A: spin until some key is pressed, then Vx = lowest pressed key.
    WaitKey { x: u8 },
    /// Fx15: delay timer = Vx.
    SetDelay { x: u8 },
    /// Fx18: sound timer = Vx.
    SetSound { x: u8 },
    /// Fx1E: I += Vx, wrapping, no flag.
    AddIndex { x: u8 },
    /// Fx29: I = address of the font glyph for the digit in Vx.
    FontAddress { x: u8 },
    /// Fx33: store the decimal digits of Vx at I, I+1, I+2.
    StoreBcd { x: u8 },
    /// Fx55: store V0..=Vx to memory starting at I.
    StoreRegisters { x: u8 },
    /// Fx65: load V0..=Vx from memory starting at I.
    LoadRegisters { x: u8 },
    /// Anything with no mapped dispatch slot; executes as a no-op.
    Unknown(u16),
}

impl Instruction {
    /// Selects the Instruction for a given Opcode.
    pub fn decode(op: Opcode) -> Self {
        match op.nibbles() {
            (0x0, 0x0, 0xE, 0x0) => Self::Clear,
            (0x0, 0x0, 0xE, 0xE) => Self::Return,
            (0x1, ..) => Self::Jump { nnn: op.nnn() },
            (0x2, ..) => Self::Call { nnn: op.nnn() },
            (0x3, ..) => Self::SkipEqImm { x: op.x(), kk: op.kk() },
            (0x4, ..) => Self::SkipNeImm { x: op.x(), kk: op.kk() },
            (0x5, .., 0x0) => Self::SkipEqReg { x: op.x(), y: op.y() },
            (0x6, ..) => Self::LoadImm { x: op.x(), kk: op.kk() },
            (0x7, ..) => Self::AddImm { x: op.x(), kk: op.kk() },
            (0x8, .., 0x0) => Self::Copy { x: op.x(), y: op.y() },
            (0x8, .., 0x1) => Self::Or { x: op.x(), y: op.y() },
            (0x8, .., 0x2) => Self::And { x: op.x(), y: op.y() },
            (0x8, .., 0x3) => Self::Xor { x: op.x(), y: op.y() },
            (0x8, .., 0x4) => Self::Add { x: op.x(), y: op.y() },
            (0x8, .., 0x5) => Self::Sub { x: op.x(), y: op.y() },
            (0x8, .., 0x6) => Self::ShiftRight { x: op.x() },
            (0x8, .., 0x7) => Self::SubReverse { x: op.x(), y: op.y() },
            (0x8, .., 0xE) => Self::ShiftLeft { x: op.x() },
            (0x9, .., 0x0) => Self::SkipNeReg { x: op.x(), y: op.y() },
            (0xA, ..) => Self::LoadIndex { nnn: op.nnn() },
            (0xB, ..) => Self::JumpOffset { nnn: op.nnn() },
            (0xC, ..) => Self::Random { x: op.x(), kk: op.kk() },
            (0xD, ..) => Self::Draw { x: op.x(), y: op.y(), n: op.n() },
            (0xE, .., 0x9, 0xE) => Self::SkipKeyPressed { x: op.x() },
            (0xE, .., 0xA, 0x1) => Self::SkipKeyReleased { x: op.x() },
            (0xF, _, 0x0, 0x7) => Self::ReadDelay { x: op.x() },
            (0xF, _, 0x0, 0xA) => Self::WaitKey { x: op.x() },
            (0xF, _, 0x1, 0x5) => Self::SetDelay { x: op.x() },
            (0xF, _, 0x1, 0x8) => Self::SetSound { x: op.x() },
            (0xF, _, 0x1, 0xE) => Self::AddIndex { x: op.x() },
            (0xF, _, 0x2, 0x9) => Self::FontAddress { x: op.x() },
            (0xF, _, 0x3, 0x3) => Self::StoreBcd { x: op.x() },
            (0xF, _, 0x5, 0x5) => Self::StoreRegisters { x: op.x() },
            (0xF, _, 0x6, 0x5) => Self::LoadRegisters { x: op.x() },
            _ => Self::Unknown(op.word()),
        }
    }

    /// Executes the instruction against a state snapshot, producing the next
    /// state. The program counter is expected to have already advanced past
    /// this instruction's word; jumps overwrite it, skips add another 2.
    pub fn execute(self, state: &State, pressed_keys: &Keypad) -> Result<State, Error> {
        let next = match self {
            Self::Clear => operations::clear(state),
            Self::Return => operations::ret(state)?,
            Self::Jump { nnn } => operations::jump(nnn, state),
            Self::Call { nnn } => operations::call(nnn, state)?,
            Self::SkipEqImm { x, kk } => operations::skip_eq_imm(x, kk, state),
            Self::SkipNeImm { x, kk } => operations::skip_ne_imm(x, kk, state),
            Self::SkipEqReg { x, y } => operations::skip_eq_reg(x, y, state),
            Self::LoadImm { x, kk } => operations::load_imm(x, kk, state),
            Self::AddImm { x, kk } => operations::add_imm(x, kk, state),
            Self::Copy { x, y } => operations::copy(x, y, state),
            Self::Or { x, y } => operations::or(x, y, state),
            Self::And { x, y } => operations::and(x, y, state),
            Self::Xor { x, y } => operations::xor(x, y, state),
            Self::Add { x, y } => operations::add(x, y, state),
            Self::Sub { x, y } => operations::sub(x, y, state),
            Self::ShiftRight { x } => operations::shift_right(x, state),
            Self::SubReverse { x, y } => operations::sub_reverse(x, y, state),
            Self::ShiftLeft { x } => operations::shift_left(x, state),
            Self::SkipNeReg { x, y } => operations::skip_ne_reg(x, y, state),
            Self::LoadIndex { nnn } => operations::load_index(nnn, state),
            Self::JumpOffset { nnn } => operations::jump_offset(nnn, state),
            Self::Random { x, kk } => operations::random(x, kk, state),
            Self::Draw { x, y, n } => operations::draw(x, y, n, state),
            Self::SkipKeyPressed { x } => operations::skip_key_pressed(x, state, pressed_keys),
            Self::SkipKeyReleased { x } => operations::skip_key_released(x, state, pressed_keys),
            Self::ReadDelay { x } => operations::read_delay(x, state),
            Self::WaitKey { x } => operations::wait_key(x, state, pressed_keys),
            Self::SetDelay { x } => operations::set_delay(x, state),
            Self::SetSound { x } => operations::set_sound(x, state),
            Self::AddIndex { x } => operations::add_index(x, state),
            Self::FontAddress { x } => operations::font_address(x, state),
            Self::StoreBcd { x } => operations::store_bcd(x, state),
            Self::StoreRegisters { x } => operations::store_registers(x, state),
            Self::LoadRegisters { x } => operations::load_registers(x, state),
            Self::Unknown(_) => *state,
        };
        Ok(next)
    }
}
