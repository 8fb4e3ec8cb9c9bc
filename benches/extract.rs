// benches/extract.rs
use criterion::{criterion_group, criterion_main, Criterion, black_box};

use espn_mma_scrape::core::{locate, normalize::normalize, parse};
use espn_mma_scrape::specs;

/// Page with a large event map behind a lot of script noise.
fn synthetic_page(events: usize) -> String {
    let mut map = String::new();
    for i in 0..events {
        if i > 0 { map.push(','); }
        map.push_str(&format!(
            r#""{i}":{{"gameDate":"20{:02}-0{}-01T00:00Z","gameResult":"{}","name":"Event {{{i}}} // night",
               "opponent":{{"displayName":"Opponent {i}"}},
               "status":{{"result":{{"displayName":"Decision"}},"period":3,"displayClock":"5:00"}},}}"#,
            i % 100, 1 + i % 9, if i % 3 == 0 { "L" } else { "W" },
        ));
    }
    let noise = "<div class=\"x\">{not json}</div>\n".repeat(2_000);
    format!(
        "<html>{noise}<script>window['__espnfitt__']={{\"page\":{{\"content\":{{\"prtlCmnApiRsp\":{{\
         \"athlete\":{{\"displayName\":\"Bench Fighter\"}}, // trailing\n\"eventsMap\":{{{map}}},}}}}}}}};</script>{noise}</html>"
    )
}

fn bench_extract(c: &mut Criterion) {
    let page = synthetic_page(500);
    let span = locate::locate_str(&page, "prtlCmnApiRsp").unwrap().to_owned();

    c.bench_function("locate", |b| {
        b.iter(|| black_box(locate::locate(black_box(&page), "prtlCmnApiRsp").unwrap()))
    });

    c.bench_function("normalize", |b| {
        b.iter(|| black_box(normalize(black_box(&span)).len()))
    });

    c.bench_function("parse", |b| {
        b.iter(|| black_box(parse(black_box(&span)).unwrap()))
    });

    c.bench_function("map_page", |b| {
        let tree = parse(&span).unwrap();
        b.iter(|| black_box(specs::map_page(black_box(&tree), "Bench Fighter").unwrap().profile.history.len()))
    });
}

criterion_group!(benches, bench_extract);
criterion_main!(benches);
