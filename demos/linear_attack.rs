use des_linear::search::actual_fragment;
use des_linear::{
    accumulate, search, Block, ChainedSource, Direction, RawKey, RoundKeySchedule, SampleSet,
    DEEPEST_ROUNDS,
};

const ORACLE_KEY: u64 = 0x0123_45FF_89AB_CDEF;
const CHAIN_IV: u64 = 0x0123_4567_89AB_CDEF;
const SAMPLE_SIZE: usize = 1 << 16;
const BIAS_ROUNDS: [usize; 3] = [3, 5, 7];

fn acquire(rounds: usize) -> (RoundKeySchedule, SampleSet) {
    let oracle = RoundKeySchedule::new(RawKey(ORACLE_KEY), Direction::Encrypt, rounds).unwrap();
    let mut source = ChainedSource::new(Block(CHAIN_IV));
    let samples = SampleSet::acquire(&mut source, &oracle, SAMPLE_SIZE).unwrap();
    (oracle, samples)
}

fn main() {
    // RUST_LOG=debug shows every candidate of the search
    env_logger::init();

    println!("Oracle key: {}", hex::encode(ORACLE_KEY.to_be_bytes()));
    println!("Samples per attack: {}", SAMPLE_SIZE);

    for rounds in BIAS_ROUNDS {
        let (_, samples) = acquire(rounds);
        let counters = accumulate(&samples, rounds, None);
        println!(
            "{} rounds: zeros={} ones={} bias={:+.5} (majority {})",
            rounds,
            counters.zeros,
            counters.ones,
            counters.bias(),
            counters.majority()
        );
    }

    let (oracle, samples) = acquire(DEEPEST_ROUNDS);
    let outcome = search(&samples).unwrap();
    let actual = actual_fragment(&oracle);
    println!(
        "{} rounds: best candidate {} (|zeros - ones| = {}), key bits {:?}",
        DEEPEST_ROUNDS,
        outcome.winner,
        outcome.winning_counters().magnitude(),
        outcome.key_bits
    );
    println!(
        "Final round subkey: {} (fragment {}, {})",
        oracle.final_round_subkey(),
        actual,
        if actual == outcome.winner { "recovered" } else { "not recovered" }
    );
}
