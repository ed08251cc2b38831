mod support;

use axum::http::StatusCode;
use serde_json::{json, Value};
use uuid::Uuid;

use support::{admin_token, app, body_json, call, json_request, register, skip_db};

fn bakery(city: &str) -> Value {
    json!({
        "name": "Corner Bakery",
        "category": "Grocery",
        "address": "9 Elm Street",
        "city": city,
        "phone": "(555) 000-1111",
        "description": "Fresh bread daily"
    })
}

#[tokio::test]
async fn business_lifecycle_from_registration_to_products() {
    if skip_db() { return; }
    let mut app = app().await;
    let city = format!("Testville {}", Uuid::new_v4().simple());
    let (owner, _) = register(&mut app, "business", &city).await;
    let (customer, _) = register(&mut app, "customer", &city).await;
    let admin = admin_token(&mut app).await;

    // customers cannot register a business
    let resp = call(&mut app, json_request("POST", "/api/business", Some(&customer), Some(bakery(&city)))).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(resp).await["message"], "User role customer is not authorized to access this route");

    let resp = call(&mut app, json_request("POST", "/api/business", Some(&owner), Some(bakery(&city)))).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created = body_json(resp).await;
    assert_eq!(created["approved"], false);
    let business_id = created["id"].as_str().unwrap().to_string();

    let resp = call(&mut app, json_request("POST", "/api/business", Some(&owner), Some(bakery(&city)))).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // pending businesses are hidden from the public and from other users
    let list_uri = format!("/api/business?city={}", city.replace(' ', "%20"));
    let resp = call(&mut app, json_request("GET", &list_uri, None, None)).await;
    assert_eq!(body_json(resp).await, json!([]));
    let resp = call(&mut app, json_request("GET", &format!("/api/business/{business_id}"), Some(&customer), None)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let resp = call(&mut app, json_request("GET", &format!("/api/business/{business_id}"), Some(&owner), None)).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let product = json!({"name": "Sourdough Loaf", "price": 6.5, "category": "Food & Beverages", "description": "Naturally leavened"});
    let resp = call(&mut app, json_request("POST", "/api/product", Some(&owner), Some(product.clone()))).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(resp).await["message"], "Your business must be approved before adding products");

    let resp = call(&mut app, json_request("PUT", &format!("/api/business/approve/{business_id}"), Some(&owner), None)).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let resp = call(&mut app, json_request("PUT", &format!("/api/business/approve/{business_id}"), Some(&admin), None)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["message"], "Business approved successfully");
    assert_eq!(body["business"]["approved"], true);

    let resp = call(&mut app, json_request("GET", &list_uri, None, None)).await;
    let listed = body_json(resp).await;
    assert_eq!(listed.as_array().map(Vec::len), Some(1));
    assert_eq!(listed[0]["owner"]["name"], "business user");

    let resp = call(&mut app, json_request("POST", "/api/product", Some(&owner), Some(product))).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created = body_json(resp).await;
    assert_eq!(created["availability"], true);
    assert_eq!(created["business"]["city"], city);
    let product_id = created["id"].as_str().unwrap().to_string();

    let search = format!("/api/product/search?keyword=SOURDOUGH&city={}", city.replace(' ', "%20"));
    let resp = call(&mut app, json_request("GET", &search, None, None)).await;
    assert_eq!(body_json(resp).await.as_array().map(Vec::len), Some(1));

    // only the owner may touch the product
    let patch = json!({"price": 7.25, "availability": false});
    let resp = call(&mut app, json_request("PUT", &format!("/api/product/{product_id}"), Some(&customer), Some(patch.clone()))).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let resp = call(&mut app, json_request("PUT", &format!("/api/product/{product_id}"), Some(&owner), Some(patch))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["price"], 7.25);

    let resp = call(&mut app, json_request("GET", "/api/product/my/products", Some(&owner), None)).await;
    assert_eq!(body_json(resp).await.as_array().map(Vec::len), Some(1));

    let resp = call(&mut app, json_request("DELETE", &format!("/api/product/{product_id}"), Some(&owner), None)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["message"], "Product removed successfully");
    let resp = call(&mut app, json_request("GET", &format!("/api/product/{product_id}"), None, None)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn owner_updates_and_fetches_own_business() {
    if skip_db() { return; }
    let mut app = app().await;
    let city = format!("Patchton {}", Uuid::new_v4().simple());
    let (owner, _) = register(&mut app, "business", &city).await;
    let (other, _) = register(&mut app, "business", &city).await;

    let resp = call(&mut app, json_request("GET", "/api/business/my/business", Some(&owner), None)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(resp).await["message"], "No business found for this user");

    let resp = call(&mut app, json_request("POST", "/api/business", Some(&owner), Some(bakery(&city)))).await;
    let id = body_json(resp).await["id"].as_str().unwrap().to_string();

    let patch = json!({"name": "Corner Bakery & Cafe", "phone": ""});
    let resp = call(&mut app, json_request("PUT", &format!("/api/business/{id}"), Some(&other), Some(patch.clone()))).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(resp).await["message"], "Not authorized to update this business");

    let resp = call(&mut app, json_request("PUT", &format!("/api/business/{id}"), Some(&owner), Some(patch))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated = body_json(resp).await;
    assert_eq!(updated["name"], "Corner Bakery & Cafe");
    assert!(updated["phone"].is_null());

    let resp = call(&mut app, json_request("GET", "/api/business/my/business", Some(&owner), None)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["id"], id);

    let resp = call(&mut app, json_request("GET", &format!("/api/business/{}", Uuid::new_v4()), Some(&owner), None)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn admin_dashboard_and_user_removal() {
    if skip_db() { return; }
    let mut app = app().await;
    let city = format!("Adminburg {}", Uuid::new_v4().simple());
    let (owner, owner_id) = register(&mut app, "business", &city).await;
    let (customer, _) = register(&mut app, "customer", &city).await;
    let admin = admin_token(&mut app).await;

    let resp = call(&mut app, json_request("POST", "/api/business", Some(&owner), Some(bakery(&city)))).await;
    let business_id = body_json(resp).await["id"].as_str().unwrap().to_string();

    for uri in ["/api/admin/users", "/api/admin/businesses", "/api/admin/stats"] {
        let resp = call(&mut app, json_request("GET", uri, Some(&customer), None)).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN, "{uri}");
    }

    let resp = call(&mut app, json_request("GET", "/api/admin/stats", Some(&admin), None)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let stats = body_json(resp).await;
    assert!(stats["totalUsers"].as_u64().unwrap_or(0) >= 3);
    assert!(stats["pendingBusinesses"].as_u64().unwrap_or(0) >= 1);

    // admins see pending businesses in the dashboard list
    let resp = call(&mut app, json_request("GET", "/api/admin/businesses", Some(&admin), None)).await;
    let all = body_json(resp).await;
    assert!(all.as_array().unwrap().iter().any(|b| b["id"] == business_id.as_str()));

    let resp = call(&mut app, json_request("GET", "/api/admin/users?page=1&per_page=1", Some(&admin), None)).await;
    assert_eq!(body_json(resp).await.as_array().map(Vec::len), Some(1));

    let resp = call(&mut app, json_request("DELETE", &format!("/api/admin/user/{owner_id}"), Some(&admin), None)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["message"], "User removed successfully");

    // business goes with its owner
    let resp = call(&mut app, json_request("GET", &format!("/api/business/{business_id}"), Some(&admin), None)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = call(&mut app, json_request("DELETE", &format!("/api/admin/user/{owner_id}"), Some(&admin), None)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
