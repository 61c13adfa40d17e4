use urlmap::{
    manifest::RouteManifest,
    router::{HttpMethod, Router},
    RouterError, VarType, NOT_FOUND,
};

fn example_manifest() -> &'static str {
    r#"
routes:
  - { method: GET,     name: root,           pattern: / }
  - { method: GET,     name: list_products,  pattern: /products }
  - { method: POST,    name: create_product, pattern: /products/ }
  - { method: GET,     name: all_products,   pattern: /products/all }
  - { method: GET,     name: show_product,   pattern: "/products/{id}", types: [int] }
  - { method: PUT,     name: update_product, pattern: "/products/{id}", types: [int] }
  - { method: DELETE,  name: delete_product, pattern: "/products/{id}", types: [int] }
  - { method: GET,     name: product_image,  pattern: "/products/{id}/images/{imgId}", types: [int, long] }
  - { method: POST,    name: add_discount,   pattern: "/products/{id}/discounts/{amount}", types: [long, decimal] }
  - { method: GET,     name: toggle,         pattern: "/features/{flag}", types: [boolean] }
  - { method: HEAD,    name: health_check,   pattern: /health }
  - { method: OPTIONS, name: supported_ops,  pattern: /health }
  - { method: TRACE,   name: trace_route,    pattern: /health }
"#
}

fn build_router(trailing: bool) -> Router<()> {
    let manifest = RouteManifest::from_yaml_str(example_manifest()).expect("failed to parse manifest");
    manifest.build_router(trailing).expect("failed to build router")
}

fn assert_route_match(router: &Router<()>, method: &str, path: &str, expected: &str) {
    let result = router
        .match_path(method, path)
        .unwrap_or_else(|e| panic!("{method} {path} failed: {e}"));
    if result.is_not_found() {
        println!("❌ {method} {path} → no match");
    } else {
        println!("✅ {method} {path} → {result}");
    }
    assert_eq!(
        result.name(),
        expected,
        "Route mismatch for {method} {path}: expected '{expected}', got '{}'",
        result.name()
    );
}

#[test]
fn test_router_root_path() {
    let router = build_router(true);
    assert_route_match(&router, "GET", "/", "root");
}

#[test]
fn test_router_list_products() {
    let router = build_router(true);
    assert_route_match(&router, "GET", "/products", "list_products");
    assert_route_match(&router, "GET", "/products/", "list_products");
}

#[test]
fn test_router_literal_before_variable() {
    let router = build_router(true);
    assert_route_match(&router, "GET", "/products/all", "all_products");
    assert_route_match(&router, "GET", "/products/7", "show_product");
}

#[test]
fn test_router_non_numeric_id_does_not_match() {
    let router = build_router(true);
    assert_route_match(&router, "GET", "/products/abc", NOT_FOUND);
}

#[test]
fn test_router_put_and_delete() {
    let router = build_router(true);
    assert_route_match(&router, "PUT", "/products/123", "update_product");
    assert_route_match(&router, "delete", "/products/123", "delete_product");
}

#[test]
fn test_router_product_image_variables() {
    let router = build_router(true);
    let m = router.match_path("GET", "/products/13/images/35").unwrap();
    assert!(m.is("product_image"));
    assert_eq!(m.variable::<i32>("id").unwrap(), 13);
    assert_eq!(m.variable::<i64>("imgId").unwrap(), 35);
    assert_eq!(m.value("id").unwrap().var_type(), VarType::Integer);
    assert_eq!(m.value("imgId").unwrap().var_type(), VarType::Long);
}

#[test]
fn test_router_discount_decimal() {
    let router = build_router(true);
    let m = router
        .match_path("POST", "/products/13/discounts/35.5")
        .unwrap();
    assert!(m.is("add_discount"));
    assert_eq!(m.variable::<i64>("id").unwrap(), 13);
    assert_eq!(m.variable::<f64>("amount").unwrap(), 35.5);

    let whole = router.match_path("POST", "/products/13/discounts/10").unwrap();
    assert_eq!(whole.variable::<f64>("amount").unwrap(), 10.0);
}

#[test]
fn test_router_boolean_is_case_insensitive() {
    let router = build_router(true);
    for (path, expected) in [
        ("/features/true", true),
        ("/features/FALSE", false),
        ("/features/True", true),
    ] {
        let m = router.match_path("GET", path).unwrap();
        assert_eq!(m.variable::<bool>("flag").unwrap(), expected, "{path}");
    }
    assert_route_match(&router, "GET", "/features/yes", NOT_FOUND);
}

#[test]
fn test_router_unknown_path() {
    let router = build_router(true);
    assert_route_match(&router, "GET", "/unknown", NOT_FOUND);
}

#[test]
fn test_router_head_options_trace() {
    let router = build_router(true);
    assert_route_match(&router, "HEAD", "/health", "health_check");
    assert_route_match(&router, "OPTIONS", "/health", "supported_ops");
    assert_route_match(&router, "TRACE", "/health", "trace_route");
    assert_route_match(&router, "GET", "/health", NOT_FOUND);
}

#[test]
fn test_router_post_with_trailing_slash_policy() {
    let router = build_router(true);
    assert_route_match(&router, "POST", "/products", "create_product");
    assert_route_match(&router, "POST", "/products/", "create_product");
}

#[test]
fn test_router_post_without_trailing_slash_policy() {
    let router = build_router(false);
    assert_route_match(&router, "POST", "/products", NOT_FOUND);
    assert_route_match(&router, "POST", "/products/", "create_product");
    assert_route_match(&router, "GET", "/products/", NOT_FOUND);
}

#[test]
fn test_router_patch_is_unsupported() {
    let router = build_router(true);
    let err = router.match_path("PATCH", "/products/1").unwrap_err();
    assert!(matches!(err, RouterError::UnsupportedMethod { ref method } if method == "PATCH"));
}

#[test]
fn test_router_null_path_is_root() {
    let mut router: Router<()> = Router::new(false);
    router
        .register_named(HttpMethod::Get, "mount_root", "", &[])
        .unwrap();
    // "" is registered as "/", with the policy off an absent path does not reach it
    assert!(router.match_path("GET", None).unwrap().is_not_found());

    let mut router: Router<()> = Router::new(true);
    router
        .register_named(HttpMethod::Get, "mount_root", "/", &[])
        .unwrap();
    assert!(router.match_path("GET", None).unwrap().is("mount_root"));
}

#[test]
fn test_router_unsupported_type_name() {
    let mut router: Router<()> = Router::default();
    let err = router
        .register_with_type_names(HttpMethod::Get, "file", "/files/{f}", None, &["url"])
        .unwrap_err();
    assert!(matches!(err, RouterError::UnsupportedType { ref name } if name == "url"));
    assert!(err.is_registration_error());
    assert!(router.is_empty());
}

#[test]
fn test_router_dispatch_end_to_end() {
    let mut router: Router<Vec<String>> = Router::default();
    router
        .get(
            "image",
            "/products/{id}/images/{imgId}",
            |m, log: &mut Vec<String>| {
                log.push(format!(
                    "image {} of {}",
                    m.variable::<i64>("imgId")?,
                    m.variable::<i32>("id")?
                ));
                Ok(())
            },
            &[VarType::Integer, VarType::Long],
        )
        .unwrap()
        .post(
            "discount",
            "/products/{id}/discounts/{amount}",
            |m, log: &mut Vec<String>| {
                log.push(format!("discount {}", m.variable::<f64>("amount")?));
                Ok(())
            },
            &[VarType::Long, VarType::Decimal],
        )
        .unwrap();

    let mut log = Vec::new();
    assert!(router
        .dispatch("GET", "/products/13/images/35", &mut log)
        .unwrap()
        .is("image"));
    assert!(router
        .dispatch("POST", "/products/13/discounts/35.5", &mut log)
        .unwrap()
        .is("discount"));
    assert!(router
        .dispatch("GET", "/unknown", &mut log)
        .unwrap()
        .is_not_found());
    assert_eq!(log, ["image 35 of 13", "discount 35.5"]);
}
