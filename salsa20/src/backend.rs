use crate::{Salsa20Core, STATE_WORDS};
use cipher::{
    consts::{U1, U64},
    Block, BlockSizeUser, ParBlocksSizeUser, StreamBackend,
};
use round_core::words::{self, Endian};

pub(crate) struct Backend<'a>(pub(crate) &'a mut Salsa20Core);

impl<'a> BlockSizeUser for Backend<'a> {
    type BlockSize = U64;
}

impl<'a> ParBlocksSizeUser for Backend<'a> {
    type ParBlocksSize = U1;
}

impl<'a> StreamBackend for Backend<'a> {
    #[inline]
    fn gen_ks_block(&mut self, block: &mut Block<Self>) {
        let mut x = self.0.state;
        for round in self.0.rounds {
            for &[a, b, c, d] in round.quarters.iter() {
                quarter_round(&mut x, a, b, c, d);
            }
        }
        for (x, s) in x.iter_mut().zip(self.0.state.iter()) {
            *x = x.wrapping_add(*s);
        }
        words::write_u32_into(Endian::Little, &x, block);

        let counter = self.0.counter().wrapping_add(1);
        self.0.set_counter(counter);
    }
}

#[inline(always)]
fn quarter_round(x: &mut [u32; STATE_WORDS], a: usize, b: usize, c: usize, d: usize) {
    x[b] ^= x[a].wrapping_add(x[d]).rotate_left(7);
    x[c] ^= x[b].wrapping_add(x[a]).rotate_left(9);
    x[d] ^= x[c].wrapping_add(x[b]).rotate_left(13);
    x[a] ^= x[d].wrapping_add(x[c]).rotate_left(18);
}
