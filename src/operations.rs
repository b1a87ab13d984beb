//! One pure handler per instruction. Each takes the current state snapshot
//! (plus its decoded operands) and produces the next one; only the subroutine
//! handlers can fail. The program counter has already advanced past the
//! instruction word when a handler runs, so jumps overwrite it and skips add
//! another 2.

use crate::constants::{
    ADDRESS_MASK, DISPLAY_HEIGHT, DISPLAY_WIDTH, FONT_GLYPH_SIZE, FONT_START, PIXEL_ON,
    STACK_DEPTH,
};
use crate::error::Error;
use crate::state::{Keypad, State};

/// 00E0: every pixel off
pub fn clear(state: &State) -> State {
    State {
        frame_buffer: [0; DISPLAY_WIDTH * DISPLAY_HEIGHT],
        draw_flag: true,
        ..*state
    }
}

/// 00EE: PC = STACK.pop()
pub fn ret(state: &State) -> Result<State, Error> {
    if state.sp == 0 {
        return Err(Error::StackUnderflow { pc: state.pc });
    }
    let sp = state.sp - 1;
    Ok(State {
        pc: state.stack[sp as usize],
        sp,
        ..*state
    })
}

/// 1nnn: PC = nnn
pub fn jump(nnn: u16, state: &State) -> State {
    State { pc: nnn, ..*state }
}

/// 2nnn: STACK.push(PC); PC = nnn
pub fn call(nnn: u16, state: &State) -> Result<State, Error> {
    if state.sp as usize >= STACK_DEPTH {
        return Err(Error::StackOverflow { pc: state.pc });
    }
    let mut stack = state.stack;
    stack[state.sp as usize] = state.pc;
    Ok(State {
        pc: nnn,
        sp: state.sp + 1,
        stack,
        ..*state
    })
}

/// 3xkk: if Vx == kk then PC += 2
pub fn skip_eq_imm(x: u8, kk: u8, state: &State) -> State {
    let pc = if state.v[x as usize] == kk {
        state.pc + 0x2
    } else {
        state.pc
    };
    State { pc, ..*state }
}

/// 4xkk: if Vx != kk then PC += 2
pub fn skip_ne_imm(x: u8, kk: u8, state: &State) -> State {
    let pc = if state.v[x as usize] != kk {
        state.pc + 0x2
    } else {
        state.pc
    };
    State { pc, ..*state }
}

/// 5xy0: if Vx == Vy then PC += 2
pub fn skip_eq_reg(x: u8, y: u8, state: &State) -> State {
    let pc = if state.v[x as usize] == state.v[y as usize] {
        state.pc + 0x2
    } else {
        state.pc
    };
    State { pc, ..*state }
}

/// 9xy0: if Vx != Vy then PC += 2
pub fn skip_ne_reg(x: u8, y: u8, state: &State) -> State {
    let pc = if state.v[x as usize] != state.v[y as usize] {
        state.pc + 0x2
    } else {
        state.pc
    };
    State { pc, ..*state }
}

/// 6xkk: Vx = kk
pub fn load_imm(x: u8, kk: u8, state: &State) -> State {
    let mut v = state.v;
    v[x as usize] = kk;
    State { v, ..*state }
}

/// 7xkk: Vx += kk, overflow dropped, no flag
pub fn add_imm(x: u8, kk: u8, state: &State) -> State {
    let mut v = state.v;
    v[x as usize] = v[x as usize].wrapping_add(kk);
    State { v, ..*state }
}

/// 8xy0: Vx = Vy
pub fn copy(x: u8, y: u8, state: &State) -> State {
    let mut v = state.v;
    v[x as usize] = v[y as usize];
    State { v, ..*state }
}

/// 8xy1: Vx |= Vy
pub fn or(x: u8, y: u8, state: &State) -> State {
    let mut v = state.v;
    v[x as usize] |= v[y as usize];
    State { v, ..*state }
}

/// 8xy2: Vx &= Vy
pub fn and(x: u8, y: u8, state: &State) -> State {
    let mut v = state.v;
    v[x as usize] &= v[y as usize];
    State { v, ..*state }
}

/// 8xy3: Vx ^= Vy
pub fn xor(x: u8, y: u8, state: &State) -> State {
    let mut v = state.v;
    v[x as usize] ^= v[y as usize];
    State { v, ..*state }
}

/// 8xy4: Vx += Vy; VF = carry
///
/// The flag is written after the sum so it wins when x is VF itself.
pub fn add(x: u8, y: u8, state: &State) -> State {
    let (res, carry) = state.v[x as usize].overflowing_add(state.v[y as usize]);
    let mut v = state.v;
    v[x as usize] = res;
    v[0xF] = carry.into();
    State { v, ..*state }
}

/// 8xy5: Vx -= Vy; VF = 1 iff Vx > Vy
pub fn sub(x: u8, y: u8, state: &State) -> State {
    let flag = state.v[x as usize] > state.v[y as usize];
    let mut v = state.v;
    v[x as usize] = state.v[x as usize].wrapping_sub(state.v[y as usize]);
    v[0xF] = flag.into();
    State { v, ..*state }
}

/// 8xy6: Vx >>= 1; VF = the bit shifted out
pub fn shift_right(x: u8, state: &State) -> State {
    let bit = state.v[x as usize] & 0x1;
    let mut v = state.v;
    v[x as usize] = state.v[x as usize] >> 1;
    v[0xF] = bit;
    State { v, ..*state }
}

/// 8xy7: Vx = Vy - Vx; VF = 1 iff Vy > Vx
pub fn sub_reverse(x: u8, y: u8, state: &State) -> State {
    let flag = state.v[y as usize] > state.v[x as usize];
    let mut v = state.v;
    v[x as usize] = state.v[y as usize].wrapping_sub(state.v[x as usize]);
    v[0xF] = flag.into();
    State { v, ..*state }
}

/// 8xyE: Vx <<= 1; VF = the bit shifted out
pub fn shift_left(x: u8, state: &State) -> State {
    let bit = (state.v[x as usize] & 0x80) >> 7;
    let mut v = state.v;
    v[x as usize] = state.v[x as usize] << 1;
    v[0xF] = bit;
    State { v, ..*state }
}

/// Annn: I = nnn
pub fn load_index(nnn: u16, state: &State) -> State {
    State { i: nnn, ..*state }
}

/// Bnnn: PC = nnn + V0
pub fn jump_offset(nnn: u16, state: &State) -> State {
    State {
        pc: nnn + u16::from(state.v[0x0]),
        ..*state
    }
}

/// Cxkk: Vx = random byte & kk
pub fn random(x: u8, kk: u8, state: &State) -> State {
    let mut v = state.v;
    v[x as usize] = rand::random::<u8>() & kk;
    State { v, ..*state }
}

/// Dxyn: XOR an n-row sprite from memory at I onto the framebuffer at
/// (Vx, Vy); VF = 1 if any pixel was toggled off.
///
/// The start position wraps into the 64x32 grid; individual sprite pixels do
/// not. Rows past the bottom edge and columns past the right edge are
/// clipped, and row reads past the top of memory wrap to the 12-bit address
/// space.
pub fn draw(x: u8, y: u8, n: u8, state: &State) -> State {
    let start_x = state.v[x as usize] as usize % DISPLAY_WIDTH;
    let start_y = state.v[y as usize] as usize % DISPLAY_HEIGHT;

    let mut v = state.v;
    let mut frame_buffer = state.frame_buffer;
    v[0xF] = 0x0;

    for row in 0..n as usize {
        if start_y + row >= DISPLAY_HEIGHT {
            break;
        }
        let sprite = state.memory[(state.i as usize + row) & ADDRESS_MASK];
        for col in 0..8 {
            if start_x + col >= DISPLAY_WIDTH {
                break;
            }
            if sprite & (0x80 >> col) == 0 {
                continue;
            }
            let cell = &mut frame_buffer[(start_y + row) * DISPLAY_WIDTH + (start_x + col)];
            if *cell == PIXEL_ON {
                v[0xF] = 0x1;
            }
            *cell ^= PIXEL_ON;
        }
    }

    State {
        v,
        frame_buffer,
        draw_flag: true,
        ..*state
    }
}

/// Ex9E: if Vx.pressed then PC += 2
///
/// Only the low nibble of Vx names a key; the keypad has 16 entries.
pub fn skip_key_pressed(x: u8, state: &State, pressed_keys: &Keypad) -> State {
    let pc = if pressed_keys[state.v[x as usize] as usize & 0xF] {
        state.pc + 0x2
    } else {
        state.pc
    };
    State { pc, ..*state }
}

/// ExA1: if !Vx.pressed then PC += 2
///
/// Only the low nibble of Vx names a key; the keypad has 16 entries.
pub fn skip_key_released(x: u8, state: &State, pressed_keys: &Keypad) -> State {
    let pc = if pressed_keys[state.v[x as usize] as usize & 0xF] {
        state.pc
    } else {
        state.pc + 0x2
    };
    State { pc, ..*state }
}

/// Fx07: Vx = DT
pub fn read_delay(x: u8, state: &State) -> State {
    let mut v = state.v;
    v[x as usize] = state.delay_timer;
    State { v, ..*state }
}

/// Fx0A: Vx = lowest pressed key, spinning until one is held
///
/// With no key down the program counter rewinds by 2, so the same opcode is
/// fetched again on the next cycle. The register write only happens once a
/// key is observed.
pub fn wait_key(x: u8, state: &State, pressed_keys: &Keypad) -> State {
    match pressed_keys.iter().position(|&pressed| pressed) {
        Some(key) => {
            let mut v = state.v;
            v[x as usize] = key as u8;
            State { v, ..*state }
        }
        None => State {
            pc: state.pc.wrapping_sub(0x2),
            ..*state
        },
    }
}

/// Fx15: DT = Vx
pub fn set_delay(x: u8, state: &State) -> State {
    State {
        delay_timer: state.v[x as usize],
        ..*state
    }
}

/// Fx18: ST = Vx
pub fn set_sound(x: u8, state: &State) -> State {
    State {
        sound_timer: state.v[x as usize],
        ..*state
    }
}

/// Fx1E: I += Vx, wrapping per u16, no flag
pub fn add_index(x: u8, state: &State) -> State {
    State {
        i: state.i.wrapping_add(u16::from(state.v[x as usize])),
        ..*state
    }
}

/// Fx29: I = FONT_START + 5 * Vx
pub fn font_address(x: u8, state: &State) -> State {
    State {
        i: (FONT_START + FONT_GLYPH_SIZE * state.v[x as usize] as usize) as u16,
        ..*state
    }
}

/// Fx33: mem[I..I+3] = the decimal digits of Vx (hundreds, tens, ones)
pub fn store_bcd(x: u8, state: &State) -> State {
    let value = state.v[x as usize];
    let digits = [value / 100, value / 10 % 10, value % 10];
    let mut memory = state.memory;
    for (offset, digit) in digits.iter().enumerate() {
        memory[(state.i as usize + offset) & ADDRESS_MASK] = *digit;
    }
    State { memory, ..*state }
}

/// Fx55: mem[I..=I+x] = V0..=Vx
pub fn store_registers(x: u8, state: &State) -> State {
    let mut memory = state.memory;
    for offset in 0..=x as usize {
        memory[(state.i as usize + offset) & ADDRESS_MASK] = state.v[offset];
    }
    State { memory, ..*state }
}

/// Fx65: V0..=Vx = mem[I..=I+x]
pub fn load_registers(x: u8, state: &State) -> State {
    let mut v = state.v;
    for offset in 0..=x as usize {
        v[offset] = state.memory[(state.i as usize + offset) & ADDRESS_MASK];
    }
    State { v, ..*state }
}
