use hex_literal::hex;
use round_core::{
    words, BlockBuffer, Capabilities, Endian, Error, HashContext, HashCore, Hashable, RoundLimit,
    RoundSpec, SizeRange,
};

#[repr(align(8))]
struct Aligned([u8; 64]);

#[test]
fn zero_copy_and_copy_paths_agree() {
    let mut block = Aligned([0; 64]);
    block.0.iter_mut().enumerate().for_each(|(i, b)| *b = i as u8);

    for &order in &[Endian::Little, Endian::Big] {
        let mut expected = [0u32; 16];
        words::read_u32_into(order, &block.0, &mut expected);

        let mut scratch = [0u32; 16];
        let aligned = words::with_u32_words(order, &block.0, &mut scratch, |w| w.to_vec());
        assert_eq!(aligned, expected);

        // one byte off: never aligned for u32
        let mut shifted = [0u8; 65];
        shifted[1..].copy_from_slice(&block.0);
        let unaligned = words::with_u32_words(order, &shifted[1..], &mut scratch, |w| w.to_vec());
        assert_eq!(unaligned, expected);

        let mut scratch = [0u64; 8];
        let wide = words::with_u64_words(order, &block.0, &mut scratch, |w| w.to_vec());
        let mut expected = [0u64; 8];
        words::read_u64_into(order, &block.0, &mut expected);
        assert_eq!(wide, expected);
    }
}

#[test]
fn word_orders() {
    let bytes = hex!("0102030405060708");
    let mut w = [0u64; 1];
    words::pack_u64(Endian::Little, &bytes, 0, &mut w);
    assert_eq!(w[0], 0x0807_0605_0403_0201);
    words::pack_u64(Endian::Big, &bytes, 0, &mut w);
    assert_eq!(w[0], 0x0102_0304_0506_0708);

    let mut out = [0u8; 8];
    words::write_u32_into(Endian::Big, &[0xdead_beef, 0x0102_0304], &mut out);
    assert_eq!(out, hex!("deadbeef01020304"));
    assert!(Endian::native().is_native());
}

/// Sums every byte; enough to observe the buffering engine.
struct Checksum {
    buffer: BlockBuffer<8>,
    blocks: u64,
    sum: u64,
    limit: RoundLimit,
}

impl HashCore for Checksum {
    const NAME: &'static str = "CHECKSUM";
    const BLOCK_SIZE: usize = 8;
    const OUTPUT_SIZE: usize = 16;
    const MAX_ROUNDS: usize = 3;

    fn with_rounds(limit: RoundLimit) -> Self {
        Self {
            buffer: BlockBuffer::new(),
            blocks: 0,
            sum: 0,
            limit,
        }
    }

    fn update(&mut self, data: &[u8]) {
        let (blocks, sum) = (&mut self.blocks, &mut self.sum);
        self.buffer.update(data, |b| {
            *blocks += 1;
            *sum += b.iter().map(|&x| u64::from(x)).sum::<u64>();
        });
    }

    fn finalize_into(mut self, out: &mut [u8]) {
        let (blocks, sum) = (&mut self.blocks, &mut self.sum);
        self.buffer.md_finalize(Endian::Big, |b| {
            *blocks += 1;
            *sum += b.iter().map(|&x| u64::from(x)).sum::<u64>();
        });
        words::write_u64_into(
            Endian::Big,
            &[self.blocks, self.sum * (self.limit.get() as u64 + 1)],
            out,
        );
    }

    fn buffered_len(&self) -> usize {
        self.buffer.len()
    }
}

fn checksum(chunks: &[&[u8]], rounds: usize) -> [u8; 16] {
    let mut ctx = HashContext::<Checksum>::new(rounds).unwrap();
    for chunk in chunks {
        ctx.update(chunk).unwrap();
        assert!(ctx.buffered_len() < ctx.block_size());
    }
    let mut out = [0u8; 16];
    ctx.finalize_into(&mut out).unwrap();
    out
}

#[test]
fn hash_context_drives_buffer() {
    // an 8-byte block never has room for the length after the 0x80 byte
    let one = checksum(&[b"abc"], 0);
    assert_eq!(one[..8], 2u64.to_be_bytes());
    assert_eq!(one[8..], (97u64 + 98 + 99 + 0x80 + 24).to_be_bytes());

    let data = [1u8; 21];
    let whole = checksum(&[&data], 2);
    let split = checksum(&[&data[..1], &[], &data[1..8], &data[8..]], 2);
    assert_eq!(whole, split);
    assert_eq!(whole[..8], 4u64.to_be_bytes());
}

#[test]
fn hash_context_sequencing() {
    let mut ctx = HashContext::<Checksum>::new(3).unwrap();
    assert_eq!(ctx.name(), "CHECKSUM");
    assert_eq!(ctx.round_limit(), 3);
    let mut short = [0u8; 15];
    assert_eq!(
        ctx.finalize_into(&mut short),
        Err(Error::InvalidLength {
            expected: 16,
            actual: 15
        })
    );
    let mut out = [0u8; 16];
    ctx.finalize_into(&mut out).unwrap();
    assert_eq!(ctx.update(b"x"), Err(Error::AlreadyFinalized));
    assert_eq!(ctx.buffered_len(), 0);
    ctx.init();
    ctx.update(b"x").unwrap();
    assert_eq!(ctx.buffered_len(), 1);

    assert_eq!(
        HashContext::<Checksum>::new(4).err(),
        Some(Error::RoundLimitExceeded {
            name: "CHECKSUM",
            requested: 4,
            max: 3
        })
    );
}

static STEPS: RoundSpec<(u8, u8)> = RoundSpec::new("PAIRS", &[(0, 1), (2, 3), (4, 5)]);

#[test]
fn round_spec_prefixes() {
    for n in 0..=3 {
        let limit = STEPS.limit(n).unwrap();
        assert_eq!(STEPS.steps(limit).len(), n);
        assert_eq!(STEPS.steps(limit), &STEPS.all()[..n]);
    }
    assert!(STEPS.limit(4).is_err());
    assert_eq!(STEPS.name(), "PAIRS");
}

#[test]
fn capability_sets() {
    let aes = Capabilities::BLOCK_CIPHER | Capabilities::STREAM_CIPHER;
    assert!(aes.contains(Capabilities::BLOCK_CIPHER));
    assert!(!aes.contains(Capabilities::HASHABLE));
    assert_eq!(
        aes.names().collect::<Vec<_>>(),
        ["BlockCipherLike", "StreamCipherLike"]
    );
    assert_eq!(Capabilities::NONE.names().count(), 0);
}

#[test]
fn size_enumerations() {
    let aes = SizeRange {
        base: 128,
        step: 64,
        max: 256,
    };
    assert_eq!(aes.iter().collect::<Vec<_>>(), [128, 192, 256]);
    assert!(aes.contains(192));
    assert!(!aes.contains(160));
    assert!(!aes.contains(320));
    assert_eq!(aes.nth(3), None);
}
