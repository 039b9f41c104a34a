//! Static log corpora used across harnesses.
//!
//! Each corpus mimics the output of one benchmark binary closely enough to
//! exercise every extractor of its format.

/// bench_1 output as printed by the plain single-transaction runner.
pub const BENCH_1_LOG: &str = "\
[INFO] Number of transactions: 3
Transaction 0
CPU halted after 1200 cycles
Trace lengths: TraceCheckpoint { arithmetic_len: 10, byte_packing_len: 2, cpu_len: 1200, keccak_len: 0, keccak_sponge_len: 0, logic_len: 4, memory_len: 3000 }
0.52s to prove
0.0150s to verify
Transaction 1
CPU halted after 800 cycles
0.40s to prove
Transaction 2
CPU halted after 3000 cycles
1.25s to prove
0.0200s to verify
";

/// bench_1 output under the fast-prover FRI configuration.
pub const BENCH_1_FRI_FAST: &str = "\
Number of transactions: 3


******** Transaction 0 ********
CPU halted after 1200 cycles
CPU trace padded to 2048 cycles
Trace lengths (before padding): TraceCheckpoint { arithmetic_len: 10, byte_packing_len: 2, cpu_len: 1200, keccak_len: 0, keccak_sponge_len: 0, logic_len: 4, memory_len: 3000 }
0.5000s to prove
Proof size: 400 KB
0.0250s to verify


******** Transaction 1 ********
CPU halted after 800 cycles
CPU trace padded to 1024 cycles
1.5000s to prove
Proof size: 300 KB
0.0500s to verify


******** Transaction 2 ********
CPU halted after 64 cycles
";

/// Same transactions under the small-proof FRI configuration.
pub const BENCH_1_FRI_SMALL: &str = "\
******** Transaction 0 ********
CPU halted after 1200 cycles
CPU trace padded to 2048 cycles
1.0000s to prove
Proof size: 250 KB
0.0125s to verify
******** Transaction 1 ********
CPU halted after 800 cycles
CPU trace padded to 1024 cycles
2.0000s to prove
Proof size: 200 KB
0.0250s to verify
******** Transaction 2 ********
CPU halted after 64 cycles
0.2500s to prove
Proof size: 100 KB
";

/// bench_2 recursive proving output: no transaction headers, three
/// phrasings of the proving time.
pub const BENCH_2_LOG: &str = "\
******** Level 1: One level of recursion ********
CPU halted after 500 cycles
Root proof for transaction proved in 2.50s
CPU halted after 700 cycles
Proving time: 3.75s
CPU halted after 900 cycles
Time to prove: 4.00s
";

/// Write `contents` to `name` inside `dir`, returning the path.
pub fn write_log(dir: &std::path::Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("fixture log must be writable");
    path
}
