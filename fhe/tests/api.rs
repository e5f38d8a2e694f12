use fhe::{
    generate_keys, set_server_key, unset_server_key, ConfigBuilder, Error, FheBool, FheUint32,
    FheUint8,
};
use rand::Rng;

#[test]
fn boolean_gates() {
    let config = ConfigBuilder::all_disabled().enable_default_bool().build();
    let (client_key, server_key) = generate_keys(config);
    set_server_key(server_key);

    let ct_false = FheBool::try_encrypt(false, &client_key).unwrap();
    let ct_true = FheBool::try_encrypt(true, &client_key).unwrap();

    let and = ct_false.and(&ct_true).unwrap();
    assert!(!and.decrypt(&client_key).unwrap());

    let or = ct_false.or(&ct_true).unwrap();
    assert!(or.decrypt(&client_key).unwrap());

    let xor = ct_true.xor(&ct_true).unwrap();
    assert!(!xor.decrypt(&client_key).unwrap());

    let not = ct_false.not().unwrap();
    assert!(not.decrypt(&client_key).unwrap());

    let selected = ct_true.select(&ct_false, &ct_true).unwrap();
    assert!(!selected.decrypt(&client_key).unwrap());
}

#[test]
fn uint8_arithmetic() {
    let config = ConfigBuilder::all_disabled().enable_default_uint8().build();
    let (client_key, server_key) = generate_keys(config);
    set_server_key(server_key);

    let a = FheUint8::try_encrypt(123, &client_key).unwrap();
    let b = FheUint8::try_encrypt(14, &client_key).unwrap();

    let sum = a.add(&b).unwrap();
    assert_eq!(sum.decrypt(&client_key).unwrap(), 137);

    let difference = a.sub(&b).unwrap();
    assert_eq!(difference.decrypt(&client_key).unwrap(), 109);
}

#[test]
fn uint8_wrapping() {
    let config = ConfigBuilder::all_disabled().enable_default_uint8().build();
    let (client_key, server_key) = generate_keys(config);
    set_server_key(server_key);

    let a = FheUint8::try_encrypt(200, &client_key).unwrap();
    let b = FheUint8::try_encrypt(100, &client_key).unwrap();

    let sum = a.add(&b).unwrap();
    assert_eq!(sum.decrypt(&client_key).unwrap(), 44);

    let difference = b.sub(&a).unwrap();
    assert_eq!(difference.decrypt(&client_key).unwrap(), 156);
}

#[test]
fn uint8_comparisons() {
    let config = ConfigBuilder::all_disabled().enable_default_uint8().build();
    let (client_key, server_key) = generate_keys(config);
    set_server_key(server_key);

    let mut rng = rand::thread_rng();
    for _ in 0..4 {
        let x: u8 = rng.gen();
        let y: u8 = rng.gen();
        let a = FheUint8::try_encrypt(x, &client_key).unwrap();
        let b = FheUint8::try_encrypt(y, &client_key).unwrap();

        assert_eq!(a.lt(&b).unwrap().decrypt(&client_key).unwrap(), x < y);
        assert_eq!(a.le(&b).unwrap().decrypt(&client_key).unwrap(), x <= y);
        assert_eq!(a.gt(&b).unwrap().decrypt(&client_key).unwrap(), x > y);
        assert_eq!(a.ge(&b).unwrap().decrypt(&client_key).unwrap(), x >= y);
        assert_eq!(a.eq(&b).unwrap().decrypt(&client_key).unwrap(), x == y);
        assert_eq!(a.ne(&b).unwrap().decrypt(&client_key).unwrap(), x != y);
    }

    let a = FheUint8::try_encrypt(42, &client_key).unwrap();
    let same = FheUint8::try_encrypt(42, &client_key).unwrap();
    assert!(a.eq(&same).unwrap().decrypt(&client_key).unwrap());
    assert!(a.le(&same).unwrap().decrypt(&client_key).unwrap());
    assert!(a.ge(&same).unwrap().decrypt(&client_key).unwrap());
    assert!(!a.lt(&same).unwrap().decrypt(&client_key).unwrap());
}

#[test]
fn uint8_bitwise() {
    let config = ConfigBuilder::all_disabled().enable_default_uint8().build();
    let (client_key, server_key) = generate_keys(config);
    set_server_key(server_key);

    let a = FheUint8::try_encrypt(0b1100_1010, &client_key).unwrap();
    let b = FheUint8::try_encrypt(0b1010_0110, &client_key).unwrap();

    let and = a.bitand(&b).unwrap();
    assert_eq!(and.decrypt(&client_key).unwrap(), 0b1000_0010);

    let or = a.bitor(&b).unwrap();
    assert_eq!(or.decrypt(&client_key).unwrap(), 0b1110_1110);

    let xor = a.bitxor(&b).unwrap();
    assert_eq!(xor.decrypt(&client_key).unwrap(), 0b0110_1100);
}

#[test]
fn uint8_multiplication() {
    let config = ConfigBuilder::all_disabled().enable_default_uint8().build();
    let (client_key, server_key) = generate_keys(config);
    set_server_key(server_key);

    let a = FheUint8::try_encrypt(13, &client_key).unwrap();
    let b = FheUint8::try_encrypt(11, &client_key).unwrap();
    let product = a.mul(&b).unwrap();
    assert_eq!(product.decrypt(&client_key).unwrap(), 143);

    // 20 * 13 = 260 wraps to 4.
    let c = FheUint8::try_encrypt(20, &client_key).unwrap();
    let wrapped = c.mul(&a).unwrap();
    assert_eq!(wrapped.decrypt(&client_key).unwrap(), 4);
}

#[test]
fn uint8_min_max() {
    let config = ConfigBuilder::all_disabled().enable_default_uint8().build();
    let (client_key, server_key) = generate_keys(config);
    set_server_key(server_key);

    let a = FheUint8::try_encrypt(42, &client_key).unwrap();
    let b = FheUint8::try_encrypt(77, &client_key).unwrap();

    assert_eq!(a.min(&b).unwrap().decrypt(&client_key).unwrap(), 42);
    assert_eq!(a.max(&b).unwrap().decrypt(&client_key).unwrap(), 77);
    assert_eq!(b.min(&a).unwrap().decrypt(&client_key).unwrap(), 42);
    assert_eq!(b.max(&a).unwrap().decrypt(&client_key).unwrap(), 77);
}

#[test]
fn public_key_encryption() {
    let config = ConfigBuilder::all_disabled().enable_default_bool().build();
    let (client_key, server_key) = generate_keys(config);
    set_server_key(server_key);

    let public_key = client_key.generate_public_key();
    let ct_true = FheBool::try_encrypt_with_public_key(true, &public_key).unwrap();
    let ct_false = FheBool::try_encrypt_with_public_key(false, &public_key).unwrap();

    assert!(ct_true.decrypt(&client_key).unwrap());
    let and = ct_true.and(&ct_false).unwrap();
    assert!(!and.decrypt(&client_key).unwrap());
}

#[test]
fn trivial_encryption() {
    let config = ConfigBuilder::all_disabled()
        .enable_default_bool()
        .enable_default_uint8()
        .build();
    let (client_key, server_key) = generate_keys(config);
    set_server_key(server_key);

    let trivial = FheBool::try_encrypt_trivial(true).unwrap();
    assert!(trivial.decrypt(&client_key).unwrap());

    let word = FheUint8::try_encrypt_trivial(95).unwrap();
    let encrypted = FheUint8::try_encrypt(5, &client_key).unwrap();
    let sum = word.add(&encrypted).unwrap();
    assert_eq!(sum.decrypt(&client_key).unwrap(), 100);
}

#[test]
fn missing_server_key_is_reported() {
    let config = ConfigBuilder::all_disabled()
        .enable_default_bool()
        .enable_default_uint8()
        .build();
    let (client_key, _server_key) = generate_keys(config);
    unset_server_key();

    let a = FheBool::try_encrypt(true, &client_key).unwrap();
    let b = FheBool::try_encrypt(false, &client_key).unwrap();
    assert_eq!(a.and(&b).unwrap_err(), Error::NoServerKeySet);
    assert_eq!(
        FheBool::try_encrypt_trivial(true).unwrap_err(),
        Error::NoServerKeySet
    );

    let x = FheUint8::try_encrypt(3, &client_key).unwrap();
    let y = FheUint8::try_encrypt(4, &client_key).unwrap();
    assert_eq!(x.add(&y).unwrap_err(), Error::NoServerKeySet);
    assert_eq!(x.lt(&y).unwrap_err(), Error::NoServerKeySet);
}

#[test]
fn disabled_types_are_rejected() {
    let config = ConfigBuilder::all_disabled().enable_default_bool().build();
    let (client_key, server_key) = generate_keys(config);
    set_server_key(server_key);

    assert_eq!(
        FheUint8::try_encrypt(1, &client_key).unwrap_err(),
        Error::TypeNotEnabled
    );
    assert_eq!(
        FheUint8::try_encrypt_trivial(1).unwrap_err(),
        Error::TypeNotEnabled
    );
    assert!(FheBool::try_encrypt(true, &client_key).is_ok());
}

#[test]
fn keys_do_not_interoperate() {
    let config = ConfigBuilder::all_disabled()
        .enable_default_uint32()
        .build();
    let (client_key_a, _) = generate_keys(config);
    let (client_key_b, _) = generate_keys(config);

    // Same parameter set, different secrets: decryption under the wrong
    // key succeeds structurally but yields noise.
    let word_a = FheUint32::try_encrypt(0xDEAD_BEEF, &client_key_a).unwrap();
    let word_b = FheUint32::try_encrypt(0x1234_5678, &client_key_a).unwrap();
    let wrong_a = word_a.decrypt(&client_key_b).unwrap();
    let wrong_b = word_b.decrypt(&client_key_b).unwrap();
    assert!(wrong_a != 0xDEAD_BEEF || wrong_b != 0x1234_5678);
}

#[test]
fn ciphertexts_serialize() {
    let config = ConfigBuilder::all_disabled().enable_default_bool().build();
    let (client_key, server_key) = generate_keys(config);
    set_server_key(server_key);

    let original = FheBool::try_encrypt(true, &client_key).unwrap();
    let bytes = bincode::serialize(&original).unwrap();
    let restored: FheBool = bincode::deserialize(&bytes).unwrap();

    assert!(restored.decrypt(&client_key).unwrap());
    let and = restored.and(&original).unwrap();
    assert!(and.decrypt(&client_key).unwrap());
}
