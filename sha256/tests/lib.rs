use hex_literal::hex;
use round_core::{Error, HashCore, RoundLimit};
use sha256::Sha256;

fn digest(rounds: usize, data: &[u8]) -> [u8; 32] {
    let mut h = Sha256::new_reduced(rounds).unwrap();
    h.update(data);
    h.finalize()
}

#[test]
fn full_rounds() {
    assert_eq!(
        digest(64, b""),
        hex!("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"),
    );
    assert_eq!(
        digest(64, b"abc"),
        hex!("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"),
    );
    assert_eq!(
        digest(64, b"abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq"),
        hex!("248d6a61d20638b8e5c026930c3e6039a33ce45964ff2167f6ecedd419db06c1"),
    );
}

#[test]
fn reduced_rounds() {
    assert_eq!(
        digest(0, b"abc"),
        hex!("d413ccce76cf5d0a78dde6e44a9fea74a21ca4fe360ad1183f07b356b7c19a32"),
    );
    assert_eq!(
        digest(16, b"abc"),
        hex!("1b0409f57bcc0e6315a1de882ce11eca5867604ca6985a9893de22897a384f31"),
    );
    assert_ne!(digest(63, b"abc"), digest(64, b"abc"));
}

#[test]
fn round_limit_is_checked() {
    assert_eq!(
        Sha256::new_reduced(65).err(),
        Some(Error::RoundLimitExceeded {
            name: "SHA256",
            requested: 65,
            max: 64
        }),
    );
}

#[test]
fn chunking_invariance() {
    let data: Vec<u8> = (0..200u32).map(|i| (i ^ 0xa5) as u8).collect();
    for len in [63, 64, 65, 127, 128, 129].iter().copied() {
        let whole = digest(24, &data[..len]);
        let mut h = Sha256::new_reduced(24).unwrap();
        for chunk in data[..len].chunks(7) {
            h.update(chunk);
            assert!(h.buffered_len() < 64);
        }
        assert_eq!(h.finalize(), whole);
    }
}

#[test]
#[should_panic(expected = "round limit checked against another schedule")]
fn limit_from_longer_schedule() {
    let limit = RoundLimit::new("RIPEMD160", 70, 80).unwrap();
    let mut h = Sha256::with_rounds(limit);
    h.update(b"abc");
    let _ = h.finalize();
}
