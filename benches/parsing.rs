use criterion::{black_box, criterion_group, criterion_main, Criterion};

use ged_parse::GedcomBuilder;

fn synthetic_file(individuals: usize) -> Vec<u8> {
    let mut text = String::from(
        "0 HEAD\n1 SOUR GED_PARSE\n2 VERS 1.0\n1 GEDC\n2 VERS 5.5.1\n1 CHAR ASCII\n",
    );
    for i in 0..individuals {
        text.push_str(&format!(
            "0 @I{i}@ INDI\n1 NAME Person{i} /Family{}/\n1 SEX M\n1 BIRT\n2 DATE 1 JAN 1900\n2 PLAC Springfield\n",
            i % 50
        ));
    }
    for i in 0..individuals / 3 {
        text.push_str(&format!(
            "0 @F{i}@ FAM\n1 HUSB @I{}@\n1 WIFE @I{}@\n1 CHIL @I{}@\n",
            i * 3,
            i * 3 + 1,
            i * 3 + 2
        ));
    }
    text.push_str("0 TRLR\n");
    text.into_bytes()
}

fn bench_parse(c: &mut Criterion) {
    let small = synthetic_file(100);
    let large = synthetic_file(5_000);

    c.bench_function("parse 100 individuals", |b| {
        b.iter(|| {
            let outcome = GedcomBuilder::new()
                .build_from_bytes(black_box(&small))
                .unwrap();
            black_box(outcome.gedcom.individuals.len())
        });
    });

    c.bench_function("parse 5000 individuals", |b| {
        b.iter(|| {
            let outcome = GedcomBuilder::new()
                .build_from_bytes(black_box(&large))
                .unwrap();
            black_box(outcome.gedcom.individuals.len())
        });
    });
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);
