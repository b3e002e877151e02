//! Wall-clock growth of the indexed assembler.
//!
//! n catalog items, n cart lines and n size rows at n = 50, 300, 1000.
//! Linear growth gives a 1000/50 ratio near 20; quadratic would be near
//! 400. The bound below leaves room for timer noise and cache effects.

use cartview_core::{fixture::CartFixture, Assembler, AssemblyConfig};
use std::time::{Duration, Instant};

const SIZES: [usize; 3] = [50, 300, 1000];
const ROUNDS: usize = 15;

fn best_time(n: usize, assembler: &Assembler) -> Duration {
    let fixture = CartFixture::generate(n, 0xC0FF_EE00 + n as u64);
    // Repeat small inputs more so every sample is well above timer
    // resolution.
    let reps = 20_000 / n;
    (0..ROUNDS)
        .map(|_| {
            let start = Instant::now();
            for _ in 0..reps {
                let assembly = assembler.assemble(&fixture.cart_lines, &fixture.catalog_items, &fixture.size_rows);
                assert_eq!(assembly.rows.len(), n);
            }
            start.elapsed() / reps as u32
        })
        .min()
        .unwrap_or_default()
}

#[test]
fn assembly_time_grows_sub_quadratically() {
    let _ = env_logger::builder().is_test(true).try_init();

    let assembler = Assembler::new(AssemblyConfig { log_missing: false, ..AssemblyConfig::default() });
    let times: Vec<Duration> = SIZES.iter().map(|&n| best_time(n, &assembler)).collect();

    let small = times[0].as_nanos().max(1) as f64;
    let large = times[2].as_nanos() as f64;
    let ratio = large / small;
    let n_ratio = (SIZES[2] / SIZES[0]) as f64;

    assert!(
        ratio < n_ratio * n_ratio / 4.0,
        "growth 50 -> 1000 was {ratio:.1}x (times {times:?}); expected roughly linear"
    );
}
