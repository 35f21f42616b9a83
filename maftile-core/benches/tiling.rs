use criterion::{black_box, criterion_group, criterion_main, Criterion};
use maftile_core::{Block, GenomicInterval, Row, Sequence, Strand, Tiler};

fn generate_text(length: usize, gap_every: usize) -> String {
    let pattern = b"ATCGATCG";
    (0..length)
        .map(|i| {
            if gap_every > 0 && i % gap_every == gap_every - 1 {
                '-'
            } else {
                pattern[i % pattern.len()] as char
            }
        })
        .collect()
}

fn row(source: &str, start: u64, text: String) -> Row {
    let size = text.bytes().filter(|&b| b != b'-').count() as u64;
    Sequence::new(source, start, size, Strand::Forward, 250_000_000, text).into()
}

/// Overlapping blocks every 500 bases, each 800 bases wide
fn generate_blocks(count: usize) -> Vec<Block> {
    (0..count)
        .map(|i| {
            Block::scored(
                (i % 7) as f64,
                vec![
                    row("hg19.chr1", (i * 500) as u64, generate_text(800, 0)),
                    row("mm9.chr4", (i * 480) as u64, generate_text(800, 13)),
                    row("canFam2.chr9", (i * 470) as u64, generate_text(800, 29)),
                ],
            )
        })
        .collect()
}

fn bench_tile_blocks(c: &mut Criterion) {
    let blocks = generate_blocks(200);
    let species: Vec<String> = ["hg19", "mm9", "canFam2", "rn4"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    c.bench_function("tile_200_blocks_100kb", |b| {
        b.iter(|| {
            let mut tiler = Tiler::new(
                GenomicInterval::new("chr1", 0, 100_000),
                species.clone(),
            );
            tiler.tile_blocks(black_box(blocks.clone())).unwrap()
        })
    });
}

fn bench_text_range(c: &mut Criterion) {
    let seq = Sequence::new(
        "mm9.chr4",
        1_000,
        0,
        Strand::Forward,
        250_000_000,
        String::new(),
    );
    let text = generate_text(10_000, 11);
    let size = text.bytes().filter(|&b| b != b'-').count() as u64;
    let seq = Sequence { size, text, ..seq };

    c.bench_function("text_range_gapped_10kb", |b| {
        b.iter(|| seq.text_range(black_box(5_000..8_000)).unwrap())
    });
}

criterion_group!(benches, bench_tile_blocks, bench_text_range);
criterion_main!(benches);
