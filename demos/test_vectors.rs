use des_linear::{Block, Des, RawKey, SUPPORTED_ROUNDS};
use serde::Serialize;

const TEST_VECTOR_KEYS: [u64; 3] = [
    0x0123_45FF_89AB_CDEF,
    0x1334_5779_9BBC_DFF1,
    0x0E32_9232_EA6D_0D73,
];
const TEST_VECTOR_PLAINTEXT: u64 = 0x0123_4567_89AB_CDEF;
const TEST_VECTOR_OUTPUT_FILE: &str = "test_vectors/known_answer.json";

#[derive(Serialize)]
struct TestVector {
    key: String,
    rounds: usize,
    plaintext: String,
    ciphertext: String,
}

fn main() {
    println!("Generating test vectors...");
    let mut test_vectors = Vec::new();
    for key in TEST_VECTOR_KEYS {
        for rounds in SUPPORTED_ROUNDS.into_iter().chain([16]) {
            let des = Des::new(RawKey(key), rounds).unwrap();
            test_vectors.push(TestVector {
                key: hex::encode(key.to_be_bytes()),
                rounds,
                plaintext: hex::encode(TEST_VECTOR_PLAINTEXT.to_be_bytes()),
                ciphertext: hex::encode(des.encrypt_block(Block(TEST_VECTOR_PLAINTEXT)).to_bytes()),
            });
        }
    }
    // Convert the test vectors to a json object, pretty print it
    let test_vectors_json = serde_json::to_string_pretty(&test_vectors).unwrap();
    println!("{}", test_vectors_json);
    std::fs::create_dir_all("test_vectors").unwrap();
    std::fs::write(TEST_VECTOR_OUTPUT_FILE, test_vectors_json).unwrap();
    println!("Test vectors written to {}", TEST_VECTOR_OUTPUT_FILE);
}
