use algebra::UnsignedInteger;
use lattice::Lwe;

/// Modulus switch rounding method.
#[derive(Debug, Clone, Copy)]
pub enum ModulusSwitchRoundMethod {
    /// Round to nearest.
    Round,
    /// Round toward zero.
    Floor,
    /// Round away from zero.
    Ceil,
}

#[inline]
fn apply(value: f64, method: ModulusSwitchRoundMethod) -> f64 {
    match method {
        ModulusSwitchRoundMethod::Round => value.round(),
        ModulusSwitchRoundMethod::Floor => value.floor(),
        ModulusSwitchRoundMethod::Ceil => value.ceil(),
    }
}

/// Rescales a ciphertext from one power-of-two modulus to another.
pub fn lwe_modulus_switch<C: UnsignedInteger>(
    cipher: &Lwe<C>,
    modulus_before: u64,
    modulus_after: u64,
    round_method: ModulusSwitchRoundMethod,
) -> Lwe<C> {
    debug_assert!(modulus_before.is_power_of_two() && modulus_after.is_power_of_two());
    let ratio = modulus_after as f64 / modulus_before as f64;
    let mask = C::from_u64(modulus_after - 1);
    let switch = |v: C| C::from_f64(apply(v.as_f64() * ratio, round_method)) & mask;

    Lwe::new(
        cipher.a().iter().map(|&v| switch(v)).collect(),
        switch(cipher.b()),
    )
}

/// Rescales a ciphertext extracted from the ring, with components in
/// canonical form modulo the prime `modulus_before`, onto a power-of-two
/// modulus.
pub fn lwe_modulus_switch_field_to_pow2<C: UnsignedInteger>(
    cipher: &Lwe<u32>,
    modulus_before: u32,
    modulus_after: u64,
    round_method: ModulusSwitchRoundMethod,
) -> Lwe<C> {
    debug_assert!(modulus_after.is_power_of_two());
    let ratio = modulus_after as f64 / f64::from(modulus_before);
    let mask = C::from_u64(modulus_after - 1);
    let switch = |v: u32| C::from_u64(apply(f64::from(v) * ratio, round_method) as u64) & mask;

    Lwe::new(
        cipher.a().iter().map(|&v| switch(v)).collect(),
        switch(cipher.b()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pow2_switch_rounds() {
        let cipher = Lwe::<u16>::new(vec![0, 7, 8, 16383], 4096);
        let switched = lwe_modulus_switch(&cipher, 1 << 14, 1 << 11, ModulusSwitchRoundMethod::Round);
        // scale is 1/8, round half up, wrap at 2N
        assert_eq!(switched.a(), &[0, 1, 1, 0]);
        assert_eq!(switched.b(), 512);
    }

    #[test]
    fn field_switch_maps_encoding() {
        let p: u32 = 132120577;
        // A phase of P/4 must land on q/4.
        let cipher = Lwe::<u32>::new(vec![0, p / 2], p / 4);
        let switched: Lwe<u16> =
            lwe_modulus_switch_field_to_pow2(&cipher, p, 1 << 14, ModulusSwitchRoundMethod::Round);
        assert_eq!(switched.b(), 1 << 12);
        assert_eq!(switched.a()[1], 1 << 13);
    }
}
