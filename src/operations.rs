use rand::Rng;

use crate::constants::{FONT_ADDRESS, FONT_GLYPH_SIZE};
use crate::error::FaultKind;
use crate::instruction::Instruction;
use crate::keypad::Keypad;
use crate::state::State;

/// What the interpreter should do once an instruction has run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Next,
    /// Block until a key is pressed, then store it in the register
    AwaitKey(u8),
}

/// Run a single instruction against `state`.
///
/// The program counter must already point past the instruction.
pub fn execute(
    instruction: Instruction,
    state: &mut State,
    keypad: &Keypad,
) -> Result<Flow, FaultKind> {
    use Instruction::*;

    match instruction {
        Clear => clr(state),
        Return => rts(state)?,
        Jump { nnn } => jump(state, nnn),
        Call { nnn } => call(state, nnn)?,
        SkipEqual { x, kk } => ske(state, x, kk),
        SkipNotEqual { x, kk } => skne(state, x, kk),
        SkipEqualReg { x, y } => skre(state, x, y),
        Load { x, kk } => load(state, x, kk),
        Add { x, kk } => add(state, x, kk),
        Move { x, y } => mv(state, x, y),
        Or { x, y } => or(state, x, y),
        And { x, y } => and(state, x, y),
        Xor { x, y } => xor(state, x, y),
        AddReg { x, y } => addr(state, x, y),
        Sub { x, y } => sub(state, x, y),
        ShiftRight { x } => shr(state, x),
        SubN { x, y } => subn(state, x, y),
        ShiftLeft { x } => shl(state, x),
        SkipNotEqualReg { x, y } => skrne(state, x, y),
        LoadI { nnn } => loadi(state, nnn),
        JumpV0 { nnn } => jumpi(state, nnn),
        Random { x, kk } => rand(state, x, kk),
        Draw { x, y, n } => draw(state, x, y, n)?,
        SkipPressed { x } => skpr(state, keypad, x),
        SkipReleased { x } => skup(state, keypad, x),
        GetDelay { x } => moved(state, x),
        WaitKey { x } => return Ok(Flow::AwaitKey(x)),
        SetDelay { x } => loads(state, x),
        SetSound { x } => ld(state, x),
        AddI { x } => addi(state, x),
        Glyph { x } => ldspr(state, x),
        Bcd { x } => bcd(state, x)?,
        Store { x } => stor(state, x)?,
        Restore { x } => read(state, x)?,
    }
    Ok(Flow::Next)
}

fn skip_if(state: &mut State, condition: bool) {
    if condition {
        state.registers.pc = state.registers.pc.wrapping_add(2);
    }
}

/// clear
pub fn clr(state: &mut State) {
    state.frame.clear();
    state.draw_flag = true;
}

/// PC = STACK.pop()
pub fn rts(state: &mut State) -> Result<(), FaultKind> {
    state.registers.pc = state.registers.pop()?;
    Ok(())
}

/// PC = addr
pub fn jump(state: &mut State, nnn: u16) {
    state.registers.pc = nnn;
}

/// STACK.push(PC); PC = addr
pub fn call(state: &mut State, nnn: u16) -> Result<(), FaultKind> {
    let return_address = state.registers.pc;
    state.registers.push(return_address)?;
    state.registers.pc = nnn;
    Ok(())
}

/// if Vx == kk then pc += 2
pub fn ske(state: &mut State, x: u8, kk: u8) {
    let vx = state.registers.v[x as usize];
    skip_if(state, vx == kk);
}

/// if Vx != kk then pc += 2
pub fn skne(state: &mut State, x: u8, kk: u8) {
    let vx = state.registers.v[x as usize];
    skip_if(state, vx != kk);
}

/// if Vx == Vy then pc += 2
pub fn skre(state: &mut State, x: u8, y: u8) {
    let v = state.registers.v;
    skip_if(state, v[x as usize] == v[y as usize]);
}

/// Vx = kk
pub fn load(state: &mut State, x: u8, kk: u8) {
    state.registers.v[x as usize] = kk;
}

/// Vx += kk
/// Add kk to Vx; allow for overflow but implicitly drop it
pub fn add(state: &mut State, x: u8, kk: u8) {
    let v = &mut state.registers.v;
    v[x as usize] = v[x as usize].wrapping_add(kk);
}

/// Vx = Vy
pub fn mv(state: &mut State, x: u8, y: u8) {
    let v = &mut state.registers.v;
    v[x as usize] = v[y as usize];
}

/// Vx |= Vy
pub fn or(state: &mut State, x: u8, y: u8) {
    let v = &mut state.registers.v;
    v[x as usize] |= v[y as usize];
}

/// Vx &= Vy
pub fn and(state: &mut State, x: u8, y: u8) {
    let v = &mut state.registers.v;
    v[x as usize] &= v[y as usize];
}

/// Vx ^= Vy
pub fn xor(state: &mut State, x: u8, y: u8) {
    let v = &mut state.registers.v;
    v[x as usize] ^= v[y as usize];
}

/// Vx += Vy; VF = carry
pub fn addr(state: &mut State, x: u8, y: u8) {
    let v = &mut state.registers.v;
    let (res, carry) = v[x as usize].overflowing_add(v[y as usize]);
    v[x as usize] = res;
    v[0xF] = carry as u8;
}

/// VF = Vx > Vy; Vx -= Vy
pub fn sub(state: &mut State, x: u8, y: u8) {
    let v = &mut state.registers.v;
    let (vx, vy) = (v[x as usize], v[y as usize]);
    v[0xF] = (vx > vy) as u8;
    v[x as usize] = vx.wrapping_sub(vy);
}

/// VF = Vx & 1; Vx >>= 1
pub fn shr(state: &mut State, x: u8) {
    let v = &mut state.registers.v;
    let vx = v[x as usize];
    v[0xF] = vx & 0x1;
    v[x as usize] = vx >> 1;
}

/// VF = Vy > Vx; Vx = Vy - Vx
pub fn subn(state: &mut State, x: u8, y: u8) {
    let v = &mut state.registers.v;
    let (vx, vy) = (v[x as usize], v[y as usize]);
    v[0xF] = (vy > vx) as u8;
    v[x as usize] = vy.wrapping_sub(vx);
}

/// VF = Vx & 0x80; Vx <<= 1
/// The flag keeps the raw high bit, it is not normalised to 1
pub fn shl(state: &mut State, x: u8) {
    let v = &mut state.registers.v;
    let vx = v[x as usize];
    v[0xF] = vx & 0x80;
    v[x as usize] = vx << 1;
}

/// if Vx != Vy then pc += 2
pub fn skrne(state: &mut State, x: u8, y: u8) {
    let v = state.registers.v;
    skip_if(state, v[x as usize] != v[y as usize]);
}

/// I = addr
pub fn loadi(state: &mut State, nnn: u16) {
    state.registers.set_i(nnn);
}

/// PC = V0 + addr
pub fn jumpi(state: &mut State, nnn: u16) {
    state.registers.pc = nnn + u16::from(state.registers.v[0x0]);
}

/// Vx = rand_byte & kk
pub fn rand(state: &mut State, x: u8, kk: u8) {
    let rand_byte: u8 = state.rng.gen();
    state.registers.v[x as usize] = rand_byte & kk;
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs a sprite from memory i..i+n onto the frame at Vx, Vy.
/// Sets VF if any pixels were erased
pub fn draw(state: &mut State, x: u8, y: u8, n: u8) -> Result<(), FaultKind> {
    let vx = state.registers.v[x as usize] as usize;
    let vy = state.registers.v[y as usize] as usize;
    let sprite = state.memory.slice(state.registers.i(), n as usize)?;
    let collided = state.frame.blit(vx, vy, sprite);
    state.registers.v[0xF] = collided as u8;
    state.draw_flag = true;
    Ok(())
}

/// if Vx.pressed then pc += 2
pub fn skpr(state: &mut State, keypad: &Keypad, x: u8) {
    let key = state.registers.v[x as usize];
    skip_if(state, keypad.is_down(key));
}

/// if !Vx.pressed then pc += 2
pub fn skup(state: &mut State, keypad: &Keypad, x: u8) {
    let key = state.registers.v[x as usize];
    skip_if(state, !keypad.is_down(key));
}

/// Vx = DT
pub fn moved(state: &mut State, x: u8) {
    state.registers.v[x as usize] = state.registers.delay_timer;
}

/// DT = Vx
pub fn loads(state: &mut State, x: u8) {
    state.registers.delay_timer = state.registers.v[x as usize];
}

/// ST = Vx
pub fn ld(state: &mut State, x: u8) {
    state.registers.sound_timer = state.registers.v[x as usize];
}

/// I += Vx
pub fn addi(state: &mut State, x: u8) {
    let i = state.registers.i() + u16::from(state.registers.v[x as usize]);
    state.registers.set_i(i);
}

/// I = Vx * 5
/// Set I to the memory address of the glyph for Vx
/// See constants::SPRITE_SHEET for more details
pub fn ldspr(state: &mut State, x: u8) {
    let glyph = u16::from(state.registers.v[x as usize]);
    state
        .registers
        .set_i(FONT_ADDRESS + glyph * FONT_GLYPH_SIZE);
}

/// mem[I..I+3] = bcd(Vx)
/// Store BCD repr of Vx in memory starting at address i
pub fn bcd(state: &mut State, x: u8) -> Result<(), FaultKind> {
    let vx = state.registers.v[x as usize];
    let digits = [vx / 100, vx / 10 % 10, vx % 10];
    state
        .memory
        .slice_mut(state.registers.i(), 3)?
        .copy_from_slice(&digits);
    Ok(())
}

/// mem[I..=I+x] = V0..=Vx
pub fn stor(state: &mut State, x: u8) -> Result<(), FaultKind> {
    let len = x as usize + 1;
    state
        .memory
        .slice_mut(state.registers.i(), len)?
        .copy_from_slice(&state.registers.v[..len]);
    Ok(())
}

/// V0..=Vx = mem[I..=I+x]
pub fn read(state: &mut State, x: u8) -> Result<(), FaultKind> {
    let len = x as usize + 1;
    let bytes = state.memory.slice(state.registers.i(), len)?;
    state.registers.v[..len].copy_from_slice(bytes);
    Ok(())
}
