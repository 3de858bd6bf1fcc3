use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pox_npm_semver::{Options, Range, Semver, VersionParser};

fn bench_parse_versions(c: &mut Criterion) {
    let strict = Options::default();
    let loose = Options::loose();
    let versions = [
        "1.2.3",
        "v1.2.3",
        "1.2.3-beta.1",
        "2.4.0+build.5",
        "1.2.3-alpha.10.beta+exp.sha.5114f85",
        "10.20.30",
        "=1.2.3",
        "01.002.0003",
    ];

    c.bench_function("parse_versions", |b| {
        b.iter(|| {
            for version in versions {
                black_box(VersionParser::parse(black_box(version), &strict).ok());
                black_box(VersionParser::parse(black_box(version), &loose).ok());
            }
        })
    });
}

fn bench_compare(c: &mut Criterion) {
    let options = Options::default();
    let cases = [
        ("1.2.3", "1.2.4"),
        ("2.4.0-alpha", "2.4.0"),
        ("1.0.0-alpha.1", "1.0.0-alpha.beta"),
        ("1.2.3+build.1", "1.2.3+build.2"),
        ("1.0.0-rc.1", "1.0.0-rc.10"),
    ];

    c.bench_function("compare", |b| {
        b.iter(|| {
            for (a, bver) in cases {
                black_box(Semver::compare(black_box(a), black_box(bver), &options).ok());
            }
        })
    });
}

fn bench_parse_ranges(c: &mut Criterion) {
    let options = Options::default();
    let ranges = [
        ">=1.2.3 <2.0.0",
        "^1.2.3 || ~2.4",
        "1.2.x || 2.*",
        "1.2.3 - 2.0.0",
        "~1.2.1 >=1.2.3",
        "^0.0.1-beta",
        ">1.0 <3.0 || >=4.0",
        "*",
    ];

    c.bench_function("parse_ranges", |b| {
        b.iter(|| {
            for range in ranges {
                black_box(Range::parse(black_box(range), &options).ok());
            }
        })
    });
}

fn bench_satisfies(c: &mut Criterion) {
    let options = Options::default();
    let cases = [
        ("1.2.3", "^1.2.0"),
        ("1.2.3-beta", "^1.2.3"),
        ("2.4.5", "~2.4"),
        ("1.2.3", ">=1.2.3 <2.0.0"),
        ("1.9999.9999", "<2.0.0"),
        ("1.2.3", "1.2.* || 2.*"),
    ];

    c.bench_function("satisfies", |b| {
        b.iter(|| {
            for (version, range) in cases {
                black_box(Semver::satisfies(black_box(version), black_box(range), &options));
            }
        })
    });
}

fn bench_satisfies_parsed(c: &mut Criterion) {
    let versions = ["1.2.3", "1.2.3-beta", "2.4.5", "1.9999.9999", "1.9.0", "2.0.0"];
    let Ok(range) = Range::parse("^1.2", &Options::default()) else {
        return;
    };

    c.bench_function("satisfies_parsed", |b| {
        b.iter(|| {
            for version in versions {
                black_box(range.test_str(black_box(version)));
            }
        })
    });
}

fn bench_sort(c: &mut Criterion) {
    let options = Options::default();
    let versions = vec![
        "1.0.0",
        "0.1.0",
        "0.1.1",
        "3.2.1",
        "2.4.0-alpha",
        "2.4.0",
        "50.2.0",
        "1.2.3",
        "2.4.5",
        "2.4.5-rc.1",
        "2.4.5+build",
    ];

    c.bench_function("sort", |b| {
        b.iter(|| {
            black_box(Semver::sort(black_box(&versions), &options).ok());
        })
    });
}

criterion_group!(
    benches,
    bench_parse_versions,
    bench_compare,
    bench_parse_ranges,
    bench_satisfies,
    bench_satisfies_parsed,
    bench_sort
);
criterion_main!(benches);
