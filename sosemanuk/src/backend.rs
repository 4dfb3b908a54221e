use crate::{
    consts::{DIV_A, MUL_A},
    SosemanukCore,
};
use cipher::{
    consts::{U1, U80},
    Block, BlockSizeUser, ParBlocksSizeUser, StreamBackend,
};
use round_core::words::{self, Endian};
use serpent::hazmat::{sbox, Words};

const FSM_MUL: u32 = 0x5465_5307;

pub(crate) struct Backend<'a>(pub(crate) &'a mut SosemanukCore);

impl<'a> BlockSizeUser for Backend<'a> {
    type BlockSize = U80;
}

impl<'a> ParBlocksSizeUser for Backend<'a> {
    type ParBlocksSize = U1;
}

impl<'a> StreamBackend for Backend<'a> {
    fn gen_ks_block(&mut self, block: &mut Block<Self>) {
        for chunk in block.chunks_exact_mut(16) {
            let mut f: Words = [0; 4];
            let mut s: Words = [0; 4];
            for (f, s) in f.iter_mut().zip(s.iter_mut()) {
                let (ft, st) = self.step();
                *f = ft;
                *s = st;
            }
            sbox(2, &mut f);
            for (f, s) in f.iter_mut().zip(s.iter()) {
                *f ^= s;
            }
            words::write_u32_into(Endian::Little, &f, chunk);
        }
    }
}

impl<'a> Backend<'a> {
    /// Clocks the FSM and the LFSR once, returning `f_t` and `s_t`.
    #[inline(always)]
    fn step(&mut self) -> (u32, u32) {
        let core = &mut *self.0;
        let s = &mut core.lfsr;

        let mux = if core.r1 & 1 != 0 { s[1] ^ s[8] } else { s[1] };
        let r1 = core.r2.wrapping_add(mux);
        let r2 = core.r1.wrapping_mul(FSM_MUL).rotate_left(7);
        core.r1 = r1;
        core.r2 = r2;
        let f = s[9].wrapping_add(r1) ^ r2;

        let out = s[0];
        let fb = s[9] ^ div_a(s[3]) ^ mul_a(s[0]);
        s.copy_within(1.., 0);
        s[9] = fb;
        (f, out)
    }
}

#[inline(always)]
fn mul_a(x: u32) -> u32 {
    (x << 8) ^ MUL_A[(x >> 24) as usize]
}

#[inline(always)]
fn div_a(x: u32) -> u32 {
    (x >> 8) ^ DIV_A[(x & 0xff) as usize]
}
