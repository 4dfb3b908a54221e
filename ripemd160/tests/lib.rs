use hex_literal::hex;
use ripemd160::{Ripemd160, OUTPUT_SIZE};
use round_core::{Error, HashContext, HashCore, Hashable};

fn digest(rounds: usize, data: &[u8]) -> [u8; OUTPUT_SIZE] {
    let mut h = Ripemd160::new_reduced(rounds).unwrap();
    h.update(data);
    h.finalize()
}

#[test]
fn full_rounds() {
    assert_eq!(digest(80, b""), hex!("9c1185a5c5e9fc54612808977ee8f548b2258d31"));
    assert_eq!(digest(80, b"a"), hex!("0bdc9d2d256b3ee9daae347be6f4dc835a467ffe"));
    assert_eq!(digest(80, b"abc"), hex!("8eb208f7e05d987a9b044a8e98c6b087f15a0bfc"));
    assert_eq!(
        digest(80, b"message digest"),
        hex!("5d0689ef49d2fae572b881b123a85ffa21595f36"),
    );
}

#[test]
fn reduced_rounds() {
    let r0 = hex!("fddcba986413c06c67594a3b7ab0e51a88abcdef");
    assert_eq!(digest(0, b"abc"), r0);
    assert_eq!(digest(0, b""), r0);
    assert_eq!(digest(1, b"abc"), hex!("61fa73eb6413c06c1e76dbb1e089b6e4ecc88642"));
    assert_eq!(digest(1, b""), hex!("61fa73eb6413c06c1e76dbb1dd85a7c9ecc88642"));
    assert_eq!(digest(16, b"abc"), hex!("510de94377ac42ae643b0ac246fc645ad2969efc"));
    assert_eq!(digest(16, b""), hex!("285021a44f5d6f00c6007123395538848a8505e8"));
}

#[test]
fn round_limit_is_checked() {
    assert_eq!(
        Ripemd160::new_reduced(81).err(),
        Some(Error::RoundLimitExceeded {
            name: "RIPEMD160",
            requested: 81,
            max: 80
        }),
    );
    for rounds in [0, 17, 79].iter().copied() {
        assert_eq!(digest(rounds, b"determinism"), digest(rounds, b"determinism"));
    }
}

#[test]
fn chunking_invariance() {
    let data: Vec<u8> = (0..300u32).map(|i| (i * 31) as u8).collect();
    for rounds in [20, 80].iter().copied() {
        let whole = digest(rounds, &data);

        let mut h = Ripemd160::new_reduced(rounds).unwrap();
        for b in data.iter() {
            h.update(core::slice::from_ref(b));
            assert!(h.buffered_len() < 64);
        }
        assert_eq!(h.finalize(), whole);

        let mut h = Ripemd160::new_reduced(rounds).unwrap();
        h.update(&[]);
        h.update(&data[..63]);
        h.update(&[]);
        h.update(&data[63..130]);
        h.update(&data[130..]);
        assert_eq!(h.finalize(), whole);
    }
}

#[test]
fn empty_update_then_abc() {
    let mut ctx = HashContext::<Ripemd160>::new(80).unwrap();
    ctx.update(b"").unwrap();
    ctx.update(b"abc").unwrap();
    let mut out = [0u8; 20];
    ctx.finalize_into(&mut out).unwrap();
    assert_eq!(out, hex!("8eb208f7e05d987a9b044a8e98c6b087f15a0bfc"));
    assert_eq!(ctx.update(b"x"), Err(Error::AlreadyFinalized));
}

#[test]
fn boundary_lengths() {
    assert_eq!(
        digest(80, b"abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq"),
        hex!("12a053384a9c0c88e405a06c27dcf49ada62eb2b"),
    );

    let data = [0x5au8; 129];
    let full: &[(usize, [u8; 20])] = &[
        (55, hex!("38e6c9b4efc51c03c4a50af0b8e0448e16c6c5a9")),
        (56, hex!("87c3ce711a2dc6749d5397a1ed127aac1ad25a0d")),
        (63, hex!("24d441cf6585527987f4b672efb136f3b9b9ce61")),
        (64, hex!("4cf06a9b9b11dfe78683ed9906a45e53d2500baa")),
        (65, hex!("2b241e5d1af552ebc15be2227a95eef589ba1dc5")),
        (127, hex!("31aa5f54358e72ef7e81c66b51b5135a4612afec")),
        (128, hex!("d6f7accdf7a7f8d7d09b28c8b77923c15cf729b1")),
        (129, hex!("dbfba4fa3b3f894f0701375cb340c8c8da6cd180")),
    ];
    for (len, expected) in full {
        assert_eq!(&digest(80, &data[..*len]), expected, "{} bytes", len);
    }

    let data = [b'Z'; 65];
    let reduced: &[(usize, [u8; 20])] = &[
        (55, hex!("ecdc5c6fdf9c2a7d238828fb188507b3552a30d1")),
        (56, hex!("49652858270d2dd02a62605f58eb25d6da7fe308")),
        (63, hex!("d1883764ffad44b751415fcaf2276491deb580db")),
        (64, hex!("9df432df2a111450b9f03b45133144256b7cb7d5")),
        (65, hex!("2126d534b7c24805ee23b385347bb7a040277c1b")),
    ];
    for (len, expected) in reduced {
        assert_eq!(&digest(37, &data[..*len]), expected, "{} bytes, 37 rounds", len);
    }
}
