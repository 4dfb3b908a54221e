use crate::{Func, Step};
use round_core::RoundSpec;

const LEFT_WORDS: [u8; 80] = [
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15,
    7, 4, 13, 1, 10, 6, 15, 3, 12, 0, 9, 5, 2, 14, 11, 8,
    3, 10, 14, 4, 9, 15, 8, 1, 2, 7, 0, 6, 13, 11, 5, 12,
    1, 9, 11, 10, 0, 8, 12, 4, 13, 3, 7, 15, 14, 5, 6, 2,
    4, 0, 5, 9, 7, 12, 2, 10, 14, 1, 3, 8, 11, 6, 15, 13,
];

const LEFT_SHIFTS: [u8; 80] = [
    11, 14, 15, 12, 5, 8, 7, 9, 11, 13, 14, 15, 6, 7, 9, 8,
    7, 6, 8, 13, 11, 9, 7, 15, 7, 12, 15, 9, 11, 7, 13, 12,
    11, 13, 6, 7, 14, 9, 13, 15, 14, 8, 13, 6, 5, 12, 7, 5,
    11, 12, 14, 15, 14, 15, 9, 8, 9, 14, 5, 6, 8, 6, 5, 12,
    9, 15, 5, 11, 6, 8, 13, 12, 5, 12, 13, 14, 11, 8, 5, 6,
];

const RIGHT_WORDS: [u8; 80] = [
    5, 14, 7, 0, 9, 2, 11, 4, 13, 6, 15, 8, 1, 10, 3, 12,
    6, 11, 3, 7, 0, 13, 5, 10, 14, 15, 8, 12, 4, 9, 1, 2,
    15, 5, 1, 3, 7, 14, 6, 9, 11, 8, 12, 2, 10, 0, 4, 13,
    8, 6, 4, 1, 3, 11, 15, 0, 5, 12, 2, 13, 9, 7, 10, 14,
    12, 15, 10, 4, 1, 5, 8, 7, 6, 2, 13, 14, 0, 3, 9, 11,
];

const RIGHT_SHIFTS: [u8; 80] = [
    8, 9, 9, 11, 13, 15, 15, 5, 7, 7, 8, 11, 14, 14, 12, 6,
    9, 13, 15, 7, 12, 8, 9, 11, 7, 7, 12, 7, 6, 15, 13, 11,
    9, 7, 15, 11, 8, 6, 6, 14, 12, 13, 5, 14, 13, 13, 7, 5,
    15, 5, 8, 11, 14, 14, 6, 14, 6, 9, 12, 9, 12, 5, 15, 8,
    8, 5, 12, 9, 12, 5, 14, 6, 8, 13, 6, 5, 15, 13, 11, 11,
];

const fn line(words: [u8; 80], shifts: [u8; 80], funcs: [Func; 5], ks: [u32; 5]) -> [Step; 80] {
    let mut steps = [Step {
        word: 0,
        shift: 0,
        func: Func::F1,
        k: 0,
    }; 80];
    let mut i = 0;
    while i < 80 {
        steps[i] = Step {
            word: words[i],
            shift: shifts[i],
            func: funcs[i / 16],
            k: ks[i / 16],
        };
        i += 1;
    }
    steps
}

const LEFT_STEPS: [Step; 80] = line(
    LEFT_WORDS,
    LEFT_SHIFTS,
    [Func::F1, Func::F2, Func::F3, Func::F4, Func::F5],
    [0x0000_0000, 0x5a82_7999, 0x6ed9_eba1, 0x8f1b_bcdc, 0xa953_fd4e],
);

const RIGHT_STEPS: [Step; 80] = line(
    RIGHT_WORDS,
    RIGHT_SHIFTS,
    [Func::F5, Func::F4, Func::F3, Func::F2, Func::F1],
    [0x50a2_8be6, 0x5c4d_d124, 0x6d70_3ef3, 0x7a6d_76e9, 0x0000_0000],
);

/// Left line of the compression function.
pub static LEFT: RoundSpec<Step> = RoundSpec::new("RIPEMD160", &LEFT_STEPS);
/// Right line of the compression function.
pub static RIGHT: RoundSpec<Step> = RoundSpec::new("RIPEMD160", &RIGHT_STEPS);

pub(crate) const H0: [u32; 5] = [
    0x6745_2301,
    0xefcd_ab89,
    0x98ba_dcfe,
    0x1032_5476,
    0xc3d2_e1f0,
];
