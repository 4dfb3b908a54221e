use cipher::{KeyIvInit, StreamCipher, StreamCipherSeek};
use hex_literal::hex;
use round_core::{Action, Error, StreamCipherLike};
use salsa20::{Salsa20, Salsa20Session, SALSA20_SPEC};

const KEY128: [u8; 16] = hex!("80000000000000000000000000000000");
const KEY256: [u8; 32] = hex!("80000000000000000000000000000000 00000000000000000000000000000000");
const IV: [u8; 8] = [0; 8];

fn keystream(key: &[u8], rounds: usize, len: usize) -> Vec<u8> {
    let mut ctx = Salsa20Session::new(rounds).unwrap();
    ctx.key_setup(key, key.len() * 8).unwrap();
    ctx.iv_setup(&IV).unwrap();
    let mut out = vec![0u8; len];
    ctx.keystream(&mut out).unwrap();
    out
}

#[test]
fn ecrypt_set1_vector0() {
    let ks = keystream(&KEY128, 20, 512);
    assert_eq!(ks[..16], hex!("4dfa5e481da23ea09a31022050859936"));
    assert_eq!(
        ks[448..],
        hex!(
            "
            b375703739daced4dd4059fd71c3c47f
            c2f9939670fad4a46066adcc6a564578
            3308b90ffb72be04a6b147cbe38cc0c3
            b9267c296a92a7c69873f9f263be9703
            "
        )[..]
    );

    let ks = keystream(&KEY256, 20, 80);
    assert_eq!(ks[..16], hex!("e3be8fdd8beca2e3ea8ef9475b29a6e7"));
    assert_eq!(ks[64..], hex!("8da2b74eef1b6283e7e20166abcae538"));
}

#[test]
fn reduced_rounds() {
    let cases: &[(&[u8], usize, [u8; 16])] = &[
        (&KEY128, 12, hex!("fc207dbfc76c5e1774961e7a5aad0906")),
        (&KEY128, 8, hex!("a9c9f888ab552a2d1bbff9f36bebeb33")),
        (&KEY256, 12, hex!("afe411ed1c4e07e4d0cde3b33e31ec19")),
        (&KEY256, 8, hex!("b1f599e9b0d96df436ae31f5ef589565")),
        (&KEY128, 1, hex!("146457b2bd46933054e490f135fa3290")),
        // no rounds: the feed-forward doubles the input block
        (&KEY128, 0, hex!("caf0e0c2000100000000000000000000")),
    ];
    for (key, rounds, expected) in cases {
        assert_eq!(keystream(key, *rounds, 16), expected, "{} rounds", rounds);
    }
}

#[test]
fn typed_api_matches_session() {
    let mut cipher = Salsa20::new(&KEY256.into(), &IV.into());
    let mut buf = [0u8; 80];
    cipher.apply_keystream(&mut buf);
    assert_eq!(buf[..], keystream(&KEY256, 20, 80)[..]);

    cipher.seek(64u64);
    let mut tail = [0u8; 16];
    cipher.apply_keystream(&mut tail);
    assert_eq!(tail, buf[64..]);
}

#[test]
fn encrypt_decrypt() {
    let pt: Vec<u8> = (0..200u8).collect();
    let mut ctx = Salsa20Session::new(8).unwrap();
    ctx.key_setup(&KEY128, 128).unwrap();
    ctx.iv_setup(&hex!("0102030405060708")).unwrap();
    let mut ct = vec![0u8; pt.len()];
    ctx.process(Action::Encrypt, &pt, &mut ct).unwrap();
    assert_ne!(ct, pt);

    ctx.iv_setup(&hex!("0102030405060708")).unwrap();
    let mut back = vec![0u8; pt.len()];
    ctx.process_blocks(Action::Decrypt, &ct[..192], &mut back[..192]).unwrap();
    ctx.process(Action::Decrypt, &ct[192..], &mut back[192..]).unwrap();
    assert_eq!(back, pt);
}

#[test]
fn sizes_and_limits() {
    assert_eq!(SALSA20_SPEC.max_rounds(), 20);
    assert!(Salsa20Session::new(20).is_ok());
    assert!(matches!(
        Salsa20Session::new(21),
        Err(Error::RoundLimitExceeded { max: 20, .. })
    ));

    let mut ctx = Salsa20Session::new(20).unwrap();
    assert_eq!(ctx.key_setup(&[0; 24], 192), Err(Error::InvalidKeySize(192)));
    ctx.key_setup(&KEY256, 256).unwrap();
    assert_eq!(ctx.iv_setup(&[0; 16]), Err(Error::InvalidIvSize(128)));
    assert_eq!(ctx.block_len(), 64);
}
