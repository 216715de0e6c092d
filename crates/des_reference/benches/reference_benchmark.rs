use criterion::{black_box, criterion_group, criterion_main, Criterion};
use des::cipher::generic_array::GenericArray;
use des::cipher::{BlockEncrypt, KeyInit};
use des_reference::{crypt, key_schedule, standard_encrypt, Mode};

const KEY: [u8; 8] = [0x13, 0x34, 0x57, 0x79, 0x9B, 0xBC, 0xDF, 0xF1];
const PLAINTEXT: [u8; 8] = [0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF];

fn reference_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("Reference DES");

    group.bench_function("key schedule (16 rounds)", |b| {
        b.iter(|| key_schedule(black_box(&KEY), Mode::Encrypt, 16))
    });

    // --- Reduced rounds, schedule built once ---
    for rounds in [3usize, 8, 16] {
        let schedule = key_schedule(&KEY, Mode::Encrypt, rounds).unwrap();
        group.bench_with_input(format!("crypt ({rounds} rounds)"), &schedule, |b, s| {
            b.iter(|| crypt(black_box(&PLAINTEXT), s))
        });
    }

    // --- Full DES against RustCrypto ---
    group.bench_function("standard_encrypt", |b| {
        b.iter(|| standard_encrypt(black_box(&KEY), black_box(&PLAINTEXT)))
    });

    let cipher = des::Des::new_from_slice(&KEY).unwrap();
    group.bench_function("des crate encrypt_block", |b| {
        b.iter(|| {
            let mut block = GenericArray::clone_from_slice(black_box(&PLAINTEXT));
            cipher.encrypt_block(&mut block);
            block
        })
    });

    group.finish();
}

criterion_group!(benches, reference_benchmarks);
criterion_main!(benches);
