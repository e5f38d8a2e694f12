use algebra::UnsignedInteger;

/// Encodes a boolean message into the ciphertext modulus domain, mapping
/// `true` to `q/4` and `false` to `0`.
#[inline]
pub fn encode<C: UnsignedInteger>(message: bool, cipher_modulus_bits: u32) -> C {
    if message {
        C::ONE << (cipher_modulus_bits - 2)
    } else {
        C::ZERO
    }
}

/// Decodes a phase back to a boolean by rounding to the nearest multiple
/// of `q/4`.
///
/// A phase whose noise exceeds `q/8` rounds to the wrong message; this
/// is silent by construction and is the correctness contract of the
/// scheme, not a detectable error.
#[inline]
pub fn decode<C: UnsignedInteger>(plaintext: C, cipher_modulus_bits: u32) -> bool {
    let eighths = (plaintext >> (cipher_modulus_bits - 3)).as_u32();
    let message = ((eighths >> 1) + (eighths & 1)) & 3;
    message == 1
}

#[cfg(test)]
mod tests {
    use super::*;

    const Q_BITS: u32 = 14;
    const Q: u16 = 1 << Q_BITS;

    #[test]
    fn encode_decode_round_trip() {
        assert_eq!(encode::<u16>(false, Q_BITS), 0);
        assert_eq!(encode::<u16>(true, Q_BITS), Q / 4);
        assert!(!decode(encode::<u16>(false, Q_BITS), Q_BITS));
        assert!(decode(encode::<u16>(true, Q_BITS), Q_BITS));
    }

    #[test]
    fn decode_tolerates_noise_below_an_eighth() {
        let bound = Q / 8;
        for noise in 0..bound {
            assert!(!decode(noise, Q_BITS));
            assert!(!decode(Q - 1 - noise, Q_BITS));
            assert!(decode(Q / 4 + noise, Q_BITS));
            assert!(decode((Q / 4 - noise).wrapping_sub(1) & (Q - 1), Q_BITS));
        }
    }
}
