// Copyright (c) 2026 Bountyy Oy. All rights reserved.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mustekala::{BrowserRequest, Cookie, CookieJar, ParamValue, RequestTranslator, SessionState};
use url::Url;

fn translation_benchmark(c: &mut Criterion) {
    let translator = RequestTranslator::new();
    let jar = CookieJar::new();
    let state = SessionState::default();

    let request = BrowserRequest::post("https://example.com/submit")
        .unwrap()
        .param(
            "user",
            ParamValue::map(vec![
                ("name", ParamValue::from("tester")),
                ("email", ParamValue::from("tester@example.com")),
            ]),
        )
        .param(
            "tags",
            ParamValue::map(vec![
                ("0", ParamValue::from("first")),
                ("1", ParamValue::from("second")),
            ]),
        );

    c.bench_function("translate_form_post", |b| {
        b.iter(|| black_box(translator.translate(&request, &state, &jar).unwrap()))
    });
}

fn cookie_lookup_benchmark(c: &mut Criterion) {
    let jar = CookieJar::new();
    for i in 0..50 {
        jar.set(Cookie::new(format!("cookie{}", i), "value").domain("example.com"));
    }
    let url = Url::parse("https://www.example.com/path").unwrap();

    c.bench_function("cookie_values_for", |b| {
        b.iter(|| black_box(jar.values_for(&url, true)))
    });
}

criterion_group!(benches, translation_benchmark, cookie_lookup_benchmark);
criterion_main!(benches);
