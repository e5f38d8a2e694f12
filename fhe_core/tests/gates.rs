use std::sync::Arc;

use fhe_core::{EvaluationKey, SecretKeyPack, DEFAULT_128_BITS_PARAMETERS};
use lattice::Lwe;

/// Noise in a freshly bootstrapped ciphertext must stay below `q/8` for
/// decryption to round correctly.
fn noise_bound() -> u16 {
    (DEFAULT_128_BITS_PARAMETERS.lwe_cipher_modulus().value()) >> 3
}

#[test]
fn gate_truth_tables() {
    let skp = SecretKeyPack::new(Arc::clone(&DEFAULT_128_BITS_PARAMETERS));
    let evk = EvaluationKey::new(&skp);
    let bound = noise_bound();

    for m0 in [false, true] {
        let c0 = skp.encrypt(m0);
        for m1 in [false, true] {
            let c1 = skp.encrypt(m1);

            let cases: [(Lwe<u16>, bool, &str); 6] = [
                (evk.and(&c0, &c1), m0 & m1, "and"),
                (evk.nand(&c0, &c1), !(m0 & m1), "nand"),
                (evk.or(&c0, &c1), m0 | m1, "or"),
                (evk.nor(&c0, &c1), !(m0 | m1), "nor"),
                (evk.xor(&c0, &c1), m0 ^ m1, "xor"),
                (evk.xnor(&c0, &c1), !(m0 ^ m1), "xnor"),
            ];
            for (cipher, expected, name) in cases {
                let (decrypted, noise) = skp.decrypt_with_noise(&cipher);
                assert_eq!(decrypted, expected, "{name}({m0}, {m1})");
                assert!(noise < bound, "{name}({m0}, {m1}) noise {noise} >= {bound}");
            }
        }
    }
}

#[test]
fn not_is_linear() {
    let skp = SecretKeyPack::new(Arc::clone(&DEFAULT_128_BITS_PARAMETERS));
    let evk = EvaluationKey::new(&skp);

    for m in [false, true] {
        let c = skp.encrypt(m);
        let (_, input_noise) = skp.decrypt_with_noise(&c);
        let flipped = evk.not(&c);
        let (decrypted, noise) = skp.decrypt_with_noise(&flipped);
        assert_eq!(decrypted, !m);
        assert_eq!(noise, input_noise);
    }
}

#[test]
fn majority_and_mux() {
    let skp = SecretKeyPack::new(Arc::clone(&DEFAULT_128_BITS_PARAMETERS));
    let evk = EvaluationKey::new(&skp);
    let bound = noise_bound();

    for bits in 0u8..8 {
        let m0 = bits & 1 != 0;
        let m1 = bits & 2 != 0;
        let m2 = bits & 4 != 0;
        let c0 = skp.encrypt(m0);
        let c1 = skp.encrypt(m1);
        let c2 = skp.encrypt(m2);

        let maj = evk.majority(&c0, &c1, &c2);
        let (decrypted, noise) = skp.decrypt_with_noise(&maj);
        assert_eq!(decrypted, (m0 & m1) | (m0 & m2) | (m1 & m2));
        assert!(noise < bound);

        let mux = evk.mux(&c0, &c1, &c2);
        let (decrypted, noise) = skp.decrypt_with_noise(&mux);
        assert_eq!(decrypted, if m0 { m1 } else { m2 });
        assert!(noise < bound);
    }
}

#[test]
fn refresh_resets_noise() {
    let skp = SecretKeyPack::new(Arc::clone(&DEFAULT_128_BITS_PARAMETERS));
    let evk = EvaluationKey::new(&skp);
    let bound = noise_bound();

    for m in [false, true] {
        let mut c = skp.encrypt(m);
        // a chain of refreshes must not accumulate noise
        for _ in 0..4 {
            c = evk.refresh(&c);
            let (decrypted, noise) = skp.decrypt_with_noise(&c);
            assert_eq!(decrypted, m);
            assert!(noise < bound);
        }
    }
}

#[test]
fn ciphertext_serialization_round_trip() {
    let skp = SecretKeyPack::new(Arc::clone(&DEFAULT_128_BITS_PARAMETERS));

    let cipher = skp.encrypt(true);
    let bytes = bincode::serialize(&cipher).unwrap();
    let restored: Lwe<u16> = bincode::deserialize(&bytes).unwrap();
    assert_eq!(restored, cipher);
    assert!(skp.decrypt(&restored));
}
