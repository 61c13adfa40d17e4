use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use urlmap::manifest::RouteManifest;
use urlmap::{HttpMethod, Router, VarType};

fn example_manifest() -> &'static str {
    r#"
routes:
  - { method: GET,  name: root,            pattern: / }
  - { method: GET,  name: get_animals,     pattern: /zoo/animals }
  - { method: POST, name: create_animal,   pattern: /zoo/animals/ }
  - { method: GET,  name: get_animal,      pattern: "/zoo/animals/{id}", types: [long] }
  - { method: GET,  name: animal_toy,      pattern: "/zoo/animals/{id}/toys/{toy_id}", types: [long, int] }
  - { method: GET,  name: habitat_section, pattern: "/zoo/{category}/animals/{id}/habitats/{habitat_id}/sections/{section_id}", types: [string, long, int, int] }
  - { method: POST, name: post_item_batch, pattern: "/inventory/{warehouse_id}/feeds/{feed_id}/items/{item_id}/batches/{batch_id}", types: [int, int, long, long] }
  - { method: GET,  name: complex_many_params, pattern: "/complex/{a}/{b}/{c}/{d}/{e}/{f}/{g}/{h}/{i}" }
  - { method: PUT,  name: price,           pattern: "/zoo/animals/{id}/price/{amount}", types: [long, decimal] }
"#
}

fn build_router() -> Router<u64> {
    let manifest = RouteManifest::from_yaml_str(example_manifest()).expect("failed to parse manifest");
    manifest.build_router(true).expect("failed to build router")
}

fn bench_route_throughput(c: &mut Criterion) {
    let router = build_router();
    c.bench_function("route_match", |b| {
        let test_paths = [
            ("GET", "/zoo/animals/123"),
            ("GET", "/zoo/animals/123/toys/456"),
            ("GET", "/zoo/cats/animals/123/habitats/88/sections/5"),
            ("POST", "/inventory/1/feeds/2/items/3/batches/4"),
            ("GET", "/complex/1/2/3/4/5/6/7/8/9"),
            ("PUT", "/zoo/animals/1/price/35.5"),
        ];
        b.iter(|| {
            for (method, path) in test_paths.iter() {
                let res = router.match_path(method, *path);
                black_box(&res);
            }
        })
    });
}

fn bench_not_found(c: &mut Criterion) {
    let router = build_router();
    c.bench_function("route_not_found", |b| {
        b.iter(|| black_box(router.match_path("GET", black_box("/does/not/exist"))))
    });
}

fn bench_large_table(c: &mut Criterion) {
    let mut router: Router<u64> = Router::default();
    for i in 0..500 {
        router
            .get(
                &format!("handler_{i}"),
                &format!("/api/v1/resource{i}/{{id}}"),
                |m, acc: &mut u64| {
                    *acc += m.variable::<i64>("id")?.unsigned_abs();
                    Ok(())
                },
                &[VarType::Long],
            )
            .expect("register");
    }

    c.bench_function("dispatch_500_routes_last", |b| {
        let mut acc = 0_u64;
        b.iter(|| {
            let res = router.dispatch_method(HttpMethod::Get, black_box("/api/v1/resource499/42"), &mut acc);
            black_box(&res);
        })
    });
}

criterion_group!(benches, bench_route_throughput, bench_not_found, bench_large_table);
criterion_main!(benches);
