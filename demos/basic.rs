use des_linear::{Block, Des, RawKey};

fn main() {
    let key = RawKey(0x1334_5779_9BBC_DFF1);
    let plaintext = Block(0x0123_4567_89AB_CDEF);

    let des = Des::new(key, 16).unwrap();
    println!("Key: {}", hex::encode(key.0.to_be_bytes()));
    println!("Plaintext: {}", plaintext);
    println!("DES (FIPS, 16 rounds): {}", des.encrypt_standard(plaintext));

    for rounds in [3, 5, 7, 8] {
        let reduced = Des::new(key, rounds).unwrap();
        let ciphertext = reduced.encrypt_block(plaintext);
        println!("Core, {} rounds: {}", rounds, ciphertext);
        println!("  decrypted: {}", reduced.decrypt_block(ciphertext));
    }
}
