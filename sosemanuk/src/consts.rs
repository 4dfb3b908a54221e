use round_core::RoundSpec;

/// One Serpent round of the IV setup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InitRound {
    /// Serpent S-box index.
    pub sbox: u8,
    /// The state after this round seeds the upper LFSR cells.
    pub lfsr_tap: bool,
    /// The state after this round seeds two LFSR cells and the FSM.
    pub fsm_tap: bool,
}

const LFSR_TAP_ROUND: usize = 12;
const FSM_TAP_ROUND: usize = 18;

const fn schedule() -> [InitRound; 24] {
    let mut rounds = [InitRound {
        sbox: 0,
        lfsr_tap: false,
        fsm_tap: false,
    }; 24];
    let mut i = 0;
    while i < 24 {
        rounds[i] = InitRound {
            sbox: (i % 8) as u8,
            lfsr_tap: i < LFSR_TAP_ROUND,
            fsm_tap: i < FSM_TAP_ROUND,
        };
        i += 1;
    }
    rounds
}

const ROUNDS: [InitRound; 24] = schedule();

/// IV setup schedule: 24 Serpent rounds.
pub static SOSEMANUK_SPEC: RoundSpec<InitRound> = RoundSpec::new("SOSEMANUK", &ROUNDS);

// GF(2^8) = GF(2)[x] / (x^8 + x^7 + x^5 + x^3 + 1), generated by x
const POLY: u32 = 0x1a9;

const fn exp_table() -> [u8; 255] {
    let mut t = [0u8; 255];
    let mut x = 1u32;
    let mut i = 0;
    while i < 255 {
        t[i] = x as u8;
        x <<= 1;
        if x & 0x100 != 0 {
            x ^= POLY;
        }
        i += 1;
    }
    t
}

const EXP: [u8; 255] = exp_table();

const fn log_table() -> [u8; 256] {
    let mut t = [0u8; 256];
    let mut i = 0;
    while i < 255 {
        t[EXP[i] as usize] = i as u8;
        i += 1;
    }
    t
}

const LOG: [u8; 256] = log_table();

const fn mul_pow(x: usize, e: usize) -> u32 {
    if x == 0 {
        0
    } else {
        EXP[(LOG[x] as usize + e) % 255] as u32
    }
}

const fn alpha_table(e: [usize; 4]) -> [u32; 256] {
    let mut t = [0u32; 256];
    let mut x = 0;
    while x < 256 {
        t[x] = (mul_pow(x, e[0]) << 24)
            | (mul_pow(x, e[1]) << 16)
            | (mul_pow(x, e[2]) << 8)
            | mul_pow(x, e[3]);
        x += 1;
    }
    t
}

/// Multiplication by alpha in GF(2^32), indexed by the top byte.
pub(crate) static MUL_A: [u32; 256] = alpha_table([23, 245, 48, 239]);

/// Division by alpha in GF(2^32), indexed by the bottom byte.
pub(crate) static DIV_A: [u32; 256] = alpha_table([16, 39, 6, 64]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alpha_tables() {
        assert_eq!(MUL_A[0], 0);
        assert_eq!(MUL_A[1], 0xe19f_cf13);
        assert_eq!(MUL_A[0x80], 0x5035_8897);
        assert_eq!(MUL_A[0xff], 0x3f53_b5eb);
        assert_eq!(DIV_A[1], 0x180f_40cd);
        assert_eq!(DIV_A[0xff], 0xb6f3_a5e2);
    }

    #[test]
    fn taps() {
        assert_eq!(ROUNDS.iter().filter(|r| r.lfsr_tap).count(), 12);
        assert_eq!(ROUNDS.iter().filter(|r| r.fsm_tap).count(), 18);
        assert_eq!(ROUNDS[23].sbox, 7);
    }
}
