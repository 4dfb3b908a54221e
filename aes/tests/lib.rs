#![cfg_attr(rustfmt, rustfmt_skip)]

use aes::{Aes128, Aes192, Aes256, Block};
use cipher::{generic_array::GenericArray, BlockDecrypt, BlockEncrypt, KeyInit};
use hex_literal::hex;
use round_core::Error;

/// FIPS-197 Appendix C vectors
#[test]
fn fips197() {
    let pt = hex!("00112233445566778899aabbccddeeff");

    let key = hex!("000102030405060708090a0b0c0d0e0f");
    let cipher = Aes128::new_from_slice(&key).unwrap();
    let mut block = GenericArray::clone_from_slice(&pt);
    cipher.encrypt_block(&mut block);
    assert_eq!(block.as_slice(), &hex!("69c4e0d86a7b0430d8cdb78070b4c55a"));
    cipher.decrypt_block(&mut block);
    assert_eq!(block.as_slice(), &pt);

    let key = hex!("000102030405060708090a0b0c0d0e0f1011121314151617");
    let cipher = Aes192::new_from_slice(&key).unwrap();
    let mut block = GenericArray::clone_from_slice(&pt);
    cipher.encrypt_block(&mut block);
    assert_eq!(block.as_slice(), &hex!("dda97ca4864cdfe06eaf70a0ec0d7191"));
    cipher.decrypt_block(&mut block);
    assert_eq!(block.as_slice(), &pt);

    let key = hex!("
        000102030405060708090a0b0c0d0e0f
        101112131415161718191a1b1c1d1e1f
    ");
    let cipher = Aes256::new_from_slice(&key).unwrap();
    let mut block = GenericArray::clone_from_slice(&pt);
    cipher.encrypt_block(&mut block);
    assert_eq!(block.as_slice(), &hex!("8ea2b7ca516745bfeafc49904b496089"));
    cipher.decrypt_block(&mut block);
    assert_eq!(block.as_slice(), &pt);
}

#[test]
fn reduced_rounds() {
    let key = hex!("000102030405060708090a0b0c0d0e0f");
    let pt = hex!("00112233445566778899aabbccddeeff");

    let zero = Aes128::with_rounds(&key, 0).unwrap();
    let mut block = GenericArray::clone_from_slice(&pt);
    zero.encrypt_block(&mut block);
    assert_eq!(block.as_slice(), &hex!("00102030405060708090a0b0c0d0e0f0"));

    let one = Aes128::with_rounds(&key, 1).unwrap();
    let mut block = GenericArray::clone_from_slice(&pt);
    one.encrypt_block(&mut block);
    assert_eq!(block.as_slice(), &hex!("89d810e8855ace682d1843d8cb128fe4"));

    let full = Aes128::with_rounds(&key, 10).unwrap();
    let mut block = GenericArray::clone_from_slice(&pt);
    full.encrypt_block(&mut block);
    assert_eq!(block.as_slice(), &hex!("69c4e0d86a7b0430d8cdb78070b4c55a"));
}

#[test]
fn reduced_round_trips() {
    let key = hex!("
        603deb1015ca71be2b73aef0857d7781
        1f352c073b6108d72d9810a30914dff4
    ");
    let mut blocks = [Block::default(); 17];
    for (i, block) in blocks.iter_mut().enumerate() {
        block.iter_mut().enumerate().for_each(|(j, b)| *b = (i * 16 + j) as u8);
    }
    for rounds in 0..=14 {
        let cipher = Aes256::with_rounds(&key, rounds).unwrap();
        assert_eq!(cipher.rounds(), rounds);
        let mut work = blocks;
        cipher.encrypt_blocks(&mut work);
        if rounds > 0 {
            assert!(work[..] != blocks[..]);
        }
        cipher.decrypt_blocks(&mut work);
        assert_eq!(work[..], blocks[..]);
    }
}

#[test]
fn limits() {
    let key = [0u8; 16];
    assert_eq!(
        Aes128::with_rounds(&key, 11).err(),
        Some(Error::RoundLimitExceeded { name: "AES128", requested: 11, max: 10 }),
    );
    assert_eq!(Aes192::with_rounds(&key, 1).err(), Some(Error::InvalidKeySize(128)));
    assert!(Aes192::with_rounds(&[0u8; 24], 12).is_ok());
    assert_eq!(aes::max_rounds(256), Some(14));
    assert_eq!(aes::max_rounds(64), None);
}

#[cfg(feature = "ctr")]
#[test]
fn ctr_stream_face() {
    use cipher::{KeyIvInit, StreamCipher};
    use round_core::{Action, StreamCipherLike};

    let key = hex!("2b7e151628aed2a6abf7158809cf4f3c");
    let iv = hex!("f0f1f2f3f4f5f6f7f8f9fafbfcfdfeff");
    let pt = hex!("
        6bc1bee22e409f96e93d7e117393172a
        ae2d8a571e03ac9c9eb76fac45af8e51
    ");

    let mut session = aes::AesCtr::new(10).unwrap();
    session.key_setup(&key, 128).unwrap();
    session.iv_setup(&iv).unwrap();
    let mut ct = [0u8; 32];
    session.process(Action::Encrypt, &pt, &mut ct).unwrap();
    assert_eq!(ct[..], hex!("
        874d6191b620e3261bef6864990db6ce
        9806f66b7970fdff8617187bb9fffdff
    ")[..]);

    let mut reference = ctr::Ctr128BE::<Aes128>::new(&key.into(), &iv.into());
    let mut data = pt;
    reference.apply_keystream(&mut data);
    assert_eq!(data, ct);

    let mut reduced = aes::AesCtr::new(12).unwrap();
    assert_eq!(
        reduced.key_setup(&key, 128),
        Err(Error::RoundLimitExceeded { name: "AES128", requested: 12, max: 10 }),
    );
}
