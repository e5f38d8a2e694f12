use fhe::{generate_keys, set_server_key, ConfigBuilder, FheBool, FheUint8, Result};

fn main() -> Result<()> {
    let config = ConfigBuilder::all_disabled()
        .enable_default_bool()
        .enable_default_uint8()
        .build();

    let (client_key, server_key) = generate_keys(config);
    println!("key generation done");

    set_server_key(server_key);

    let lhs = FheBool::try_encrypt(true, &client_key)?;
    let rhs = FheBool::try_encrypt(false, &client_key)?;

    let and = lhs.and(&rhs)?;
    let xor = lhs.xor(&rhs)?;
    println!(
        "true AND false = {}, true XOR false = {}",
        and.decrypt(&client_key)?,
        xor.decrypt(&client_key)?
    );

    let a = FheUint8::try_encrypt(123, &client_key)?;
    let b = FheUint8::try_encrypt(14, &client_key)?;

    let sum = a.add(&b)?;
    let difference = a.sub(&b)?;
    println!(
        "123 + 14 = {}, 123 - 14 = {}",
        sum.decrypt(&client_key)?,
        difference.decrypt(&client_key)?
    );

    let less = a.lt(&b)?;
    println!("123 < 14 = {}", less.decrypt(&client_key)?);

    Ok(())
}
