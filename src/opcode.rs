use std::fmt;

/// # Opcode
///
/// A single 16-bit instruction word. Behavior is cased on some combination of
/// its nibbles:
/// - `(n, _, _, _)` broad categorization; applies to all opcodes
/// - `(_, _, _, n)` specific behavior within a category
/// - `(_, _, n, n)` more specific behavior within a category
///
/// Nibbles not used for routing carry operands:
/// - `(_, n, n, n)` a 12-bit address
/// - `(_, _, n, n)` a byte compared with and/or assigned to Vx
/// - `(_, n, _, _)` the register Vx or the register range V0..=Vx
/// - `(_, _, n, _)` the register Vy
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Opcode(u16);

impl Opcode {
    /// The raw instruction word.
    pub fn word(self) -> u16 {
        self.0
    }

    /// All four component nibbles, most significant first.
    pub fn nibbles(self) -> (u8, u8, u8, u8) {
        (((self.0 & 0xF000) >> 12) as u8, self.x(), self.y(), self.n())
    }

    /// The second nibble. `[_x__]`
    pub fn x(self) -> u8 {
        ((self.0 & 0x0F00) >> 8) as u8
    }

    /// The third nibble. `[__y_]`
    pub fn y(self) -> u8 {
        ((self.0 & 0x00F0) >> 4) as u8
    }

    /// The fourth nibble. `[___n]`
    pub fn n(self) -> u8 {
        (self.0 & 0x000F) as u8
    }

    /// The least significant byte. `[__kk]`
    pub fn kk(self) -> u8 {
        (self.0 & 0x00FF) as u8
    }

    /// The low 12 bits, an address. `[_nnn]`
    pub fn nnn(self) -> u16 {
        self.0 & 0x0FFF
    }
}

impl From<u16> for Opcode {
    fn from(word: u16) -> Self {
        Opcode(word)
    }
}

impl fmt::Debug for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Opcode({:04X})", self.0)
    }
}

#[cfg(test)]
mod test_opcode {
    use super::*;

    #[test]
    fn test_nibbles() {
        let op = Opcode::from(0xABCD);
        assert_eq!(op.nibbles(), (0xA, 0xB, 0xC, 0xD));
    }

    #[test]
    fn test_x() {
        let op = Opcode::from(0xABCD);
        assert_eq!(op.x(), 0xB);
    }

    #[test]
    fn test_y() {
        let op = Opcode::from(0xABCD);
        assert_eq!(op.y(), 0xC);
    }

    #[test]
    fn test_n() {
        let op = Opcode::from(0xABCD);
        assert_eq!(op.n(), 0xD);
    }

    #[test]
    fn test_kk() {
        let op = Opcode::from(0xABCD);
        assert_eq!(op.kk(), 0xCD);
    }

    #[test]
    fn test_nnn() {
        let op = Opcode::from(0xABCD);
        assert_eq!(op.nnn(), 0x0BCD);
    }

    #[test]
    fn test_word_roundtrip() {
        assert_eq!(Opcode::from(0x00E0).word(), 0x00E0);
    }
}
