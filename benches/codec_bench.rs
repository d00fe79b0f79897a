use criterion::{black_box, criterion_group, criterion_main, Criterion};
use chrome_pak::entry::write_entries;
use chrome_pak::{IndexDocument, PakArchive, PakHeader};

fn sample_pak(count: usize, size: usize) -> Vec<u8> {
    let header = PakHeader::new(5, 1, count, 0).unwrap();
    let mut buf = header.to_bytes();
    buf.extend(write_entries(header.data_start(), (0..count).map(|i| (i as u16, size))).unwrap());
    buf.extend(std::iter::repeat(0x5Au8).take(count * size));
    buf
}

fn bench_parse(c: &mut Criterion) {
    let pak = sample_pak(4096, 256);

    c.bench_function("parse_4096_resources", |b| {
        b.iter(|| PakArchive::parse(black_box(&pak)).unwrap().resources().len())
    });
}

fn bench_entry_table(c: &mut Criterion) {
    c.bench_function("write_entries_4096", |b| {
        b.iter(|| write_entries(black_box(48), (0..4096u16).map(|i| (i, 256))).unwrap())
    });
}

fn bench_index(c: &mut Criterion) {
    let mut doc = IndexDocument::new(5, 1);
    for i in 0..4096u16 {
        doc.push_resource(i, format!("{i}.png"));
    }
    let text = doc.to_bytes();

    c.bench_function("index_write_4096", |b| b.iter(|| black_box(&doc).to_bytes()));
    c.bench_function("index_parse_4096", |b| {
        b.iter(|| IndexDocument::parse(black_box(&text)).unwrap())
    });
}

criterion_group!(benches, bench_parse, bench_entry_table, bench_index);
criterion_main!(benches);
