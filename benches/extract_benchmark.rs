use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use flights_alert::{filter_by_price, Extractor};
use rand::{thread_rng, Rng};

const CITIES: [(&str, &str); 6] = [
    ("Barcelona", "BCN"),
    ("Rzym", "CIA"),
    ("Malta", "MLA"),
    ("Londyn", "STN"),
    ("Dublin", "DUB"),
    ("Paryż", "BVA"),
];

// Results page with `blocks` offers, roughly one in ten missing its return leg
fn results_page(blocks: usize) -> String {
    let mut rng = thread_rng();
    let mut html = String::from("<html><body><div id=\"reslist\">");

    for _ in 0..blocks {
        let (city, code) = CITIES[rng.gen_range(0..CITIES.len())];
        let price = rng.gen_range(49..900);
        let inbound = if rng.gen_bool(0.1) {
            String::new()
        } else {
            format!(
                "<p><span class=\"caption sem\">Z powrotem</span>\
                 <span class=\"date\">wt&nbsp;26/08/25</span>\
                 <span class=\"from\"><strong>21:10</strong> {city} <span class=\"code\">{code}</span></span>\
                 <span class=\"to\"><strong>23:25</strong> Kraków <span class=\"code\">KRK</span></span></p>"
            )
        };
        html.push_str(&format!(
            "<div class=\"result\"><div class=\"text\">\
             <p><span class=\"caption tam\">Tam</span>\
             <span class=\"date\">pt&nbsp;22/08/25</span>\
             <span class=\"from\"><strong>18:30</strong> Kraków <span class=\"code\">KRK</span></span>\
             <span class=\"to\"><strong>20:45</strong> {city} <span class=\"code\">{code}</span></span></p>\
             {inbound}</div>\
             <div class=\"totalPrice\"><span class=\"tp\">{price},00 zł</span></div></div>"
        ));
    }

    html.push_str("</div></body></html>");
    html
}

pub fn extract_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("results_page_extraction");
    let extractor = Extractor::default();

    for blocks in [10, 100, 500].iter() {
        let page = results_page(*blocks);
        group.bench_with_input(BenchmarkId::from_parameter(blocks), &page, |b, page| {
            b.iter(|| {
                let offers = extractor.extract(black_box(page));
                black_box(filter_by_price(offers, 300.0))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, extract_benchmark);
criterion_main!(benches);
