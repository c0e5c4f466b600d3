//! Record store behaviour against an in-memory SQLite database

use chrono::{TimeZone, Utc};
use gadget_models::schema;
use gadget_models::{Customer, Discount, MonthlySubscription, Outlet, PointRedemption, Product, Purchase};
use gadget_orm::{
    predicates, Combinator, Database, DatabaseConfig, DatabaseValue, Entity, Predicates, QueryOperator,
    QueryOptions, RecordStore, SearchOperators, StoreError, SEARCH_COMBINATOR_KEY,
};

async fn setup() -> Database {
    let db = Database::connect(&DatabaseConfig::new("sqlite::memory:"))
        .await
        .expect("in-memory database");
    schema::migrate(&db).await.expect("schema");
    db
}

fn product(name: &str, price: f64, stock: i64) -> Product {
    Product {
        name: name.to_string(),
        price,
        stock,
        ..Product::default()
    }
}

async fn seed_products(store: &RecordStore<Product>, count: usize) -> Vec<Product> {
    let mut created = Vec::with_capacity(count);
    for n in 1..=count {
        let mut item = product(&format!("product-{:02}", n), n as f64 * 10.0, n as i64);
        store.create(&mut item).await.unwrap();
        created.push(item);
    }
    created
}

#[tokio::test]
async fn test_create_assigns_identifiers_and_reads_back() {
    let db = setup().await;
    let outlets = db.store::<Outlet>();

    let mut downtown = Outlet {
        id: None,
        name: "Downtown".to_string(),
        location: "1 Main St".to_string(),
    };
    let mut airport = Outlet {
        id: None,
        name: "Airport".to_string(),
        location: "Terminal 2".to_string(),
    };
    outlets.create(&mut downtown).await.unwrap();
    outlets.create(&mut airport).await.unwrap();

    let first = downtown.id.unwrap();
    let second = airport.id.unwrap();
    assert_ne!(first, second);

    let found = outlets.find_by_id(second).await.unwrap().unwrap();
    assert_eq!(found, airport);
    assert_eq!(outlets.find_by_id(second + 100).await.unwrap(), None);
}

#[tokio::test]
async fn test_typed_fields_round_trip() {
    let db = setup().await;
    let expiry = Utc.with_ymd_and_hms(2025, 3, 31, 23, 59, 59).unwrap();

    let mut customer = Customer {
        id: None,
        name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
        gadget_points: 120,
        subscription_expiry: Some(expiry),
    };
    db.store::<Customer>().create(&mut customer).await.unwrap();
    let loaded = db.store::<Customer>().find_by_id(customer.id.unwrap()).await.unwrap().unwrap();
    assert_eq!(loaded, customer);

    let mut subscription = MonthlySubscription {
        customer_id: customer.id,
        online_store_id: Some(3),
        start_at: Some(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()),
        end_at: Some(expiry),
        num_of_months: 3,
        paid: true,
        ..MonthlySubscription::default()
    };
    db.store::<MonthlySubscription>().create(&mut subscription).await.unwrap();
    let loaded = db
        .store::<MonthlySubscription>()
        .find_by_id(subscription.id.unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(loaded, subscription);
    assert!(loaded.paid);
    assert!(!loaded.actived);

    let mut discount = Discount {
        kind: "member".to_string(),
        description: "Members save 5%".to_string(),
        discount_amount: 5.0,
        ..Discount::default()
    };
    db.store::<Discount>().create(&mut discount).await.unwrap();
    let members = db
        .store::<Discount>()
        .find_by_keys(&predicates([("kind", "member")]))
        .await
        .unwrap();
    assert_eq!(members, vec![discount]);
}

#[tokio::test]
async fn test_pages_follow_the_full_ordering() {
    let db = setup().await;
    let products = db.store::<Product>();
    seed_products(&products, 25).await;

    let page = products.find_by_pages(2, 10).await.unwrap();
    let names: Vec<&str> = page.iter().map(|p| p.name.as_str()).collect();
    let expected: Vec<String> = (11..=20).map(|n| format!("product-{:02}", n)).collect();
    assert_eq!(names, expected);

    let all = products.find_all(&[]).await.unwrap();
    assert_eq!(all.len(), 25);
    for page_number in 1..=3u32 {
        let page = products.find_by_pages(page_number, 10).await.unwrap();
        assert!(page.len() <= 10);
        for (n, item) in page.iter().enumerate() {
            assert_eq!(item, &all[n + (page_number as usize - 1) * 10]);
        }
    }

    assert_eq!(products.find_by_pages(3, 10).await.unwrap().len(), 5);
    assert!(products.find_by_pages(4, 10).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_invalid_pagination() {
    let db = setup().await;
    let products = db.store::<Product>();

    assert!(matches!(
        products.find_by_pages(0, 10).await,
        Err(StoreError::InvalidPagination { .. })
    ));
    assert!(matches!(
        products.find_by_pages_with_keys(&Predicates::new(), 1, 0, &[]).await,
        Err(StoreError::InvalidPagination { .. })
    ));
}

#[tokio::test]
async fn test_find_all_with_options() {
    let db = setup().await;
    let products = db.store::<Product>();
    seed_products(&products, 6).await;

    let top = products
        .find_all(&[
            QueryOptions::new().order_by_desc("price").limit(4),
            QueryOptions::new().select("name").select("price").limit(10),
        ])
        .await
        .unwrap();

    let names: Vec<&str> = top.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["product-06", "product-05", "product-04", "product-03"]);
    // unselected columns decode to zero values
    assert!(top.iter().all(|p| p.id.is_none() && p.stock == 0));

    let filtered = products
        .find_all(&[QueryOptions::new().filter("stock", 2i64), QueryOptions::new().filter("price", 20.0)])
        .await
        .unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].name, "product-02");
}

#[tokio::test]
async fn test_keyed_lookups_without_matches() {
    let db = setup().await;
    let products = db.store::<Product>();
    seed_products(&products, 3).await;

    let keys = predicates([("name", "tablet")]);
    assert!(products.find_by_keys(&keys).await.unwrap().is_empty());
    assert!(products.find_by_pages_with_keys(&keys, 1, 10, &[]).await.unwrap().is_empty());
    assert_eq!(
        products.count_with_keys(&keys, &SearchOperators::new(), &[]).await.unwrap(),
        0
    );

    let exact = products
        .find_by_keys(&predicates([("name", DatabaseValue::from("product-02")), ("stock", DatabaseValue::from(2i64))]))
        .await
        .unwrap();
    assert_eq!(exact.len(), 1);
}

#[tokio::test]
async fn test_find_by_pages_with_keys() {
    let db = setup().await;
    let products = db.store::<Product>();

    let mut outlet = Outlet {
        name: "Mall".to_string(),
        ..Outlet::default()
    };
    db.store::<Outlet>().create(&mut outlet).await.unwrap();

    for n in 1..=12 {
        let mut item = product(&format!("case-{:02}", n), 15.0, n);
        if n % 2 == 0 {
            item.outlet_id = outlet.id;
        }
        products.create(&mut item).await.unwrap();
    }

    let keys = predicates([("outlet_id", outlet.id)]);
    let first = products
        .find_by_pages_with_keys(&keys, 1, 4, &[QueryOptions::new().order_by_desc("stock")])
        .await
        .unwrap();
    let stocks: Vec<i64> = first.iter().map(|p| p.stock).collect();
    assert_eq!(stocks, vec![12, 10, 8, 6]);

    let second = products
        .find_by_pages_with_keys(&keys, 2, 4, &[QueryOptions::new().order_by_desc("stock").limit(1)])
        .await
        .unwrap();
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].stock, 4);
}

#[tokio::test]
async fn test_fuzzy_search_and_counts() {
    let db = setup().await;
    let products = db.store::<Product>();
    for (name, price) in [
        ("smartphone X", 999.0),
        ("phone case", 19.0),
        ("headphones", 199.0),
        ("tablet", 499.0),
        ("charger", 29.0),
    ] {
        products.create(&mut product(name, price, 10)).await.unwrap();
    }

    let keys = predicates([("name", "phone")]);
    let operators = SearchOperators::new().with_operator("name", QueryOperator::Like);
    let found = products
        .search_by_pages_with_keys(&keys, &operators, 1, 10, &[QueryOptions::new().order_by("price")])
        .await
        .unwrap();
    let names: Vec<&str> = found.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["phone case", "headphones", "smartphone X"]);
    assert_eq!(products.count_with_keys(&keys, &operators, &[]).await.unwrap(), 3);

    // no operator falls back to substring match
    assert_eq!(
        products.count_with_keys(&keys, &SearchOperators::new(), &[]).await.unwrap(),
        3
    );

    // OR widens the match set
    let either = predicates([("name", DatabaseValue::from("tablet")), ("price", DatabaseValue::from(900.0))]);
    let or_operators = SearchOperators::new().with_operator("price", QueryOperator::GreaterThanOrEqual);
    assert_eq!(products.count_with_keys(&either, &or_operators, &[]).await.unwrap(), 2);

    // AND narrows it
    let both = predicates([("name", DatabaseValue::from("phone")), ("price", DatabaseValue::from(100.0))]);
    let and_operators =
        SearchOperators::from_map([("price", ">"), ("name", "like"), (SEARCH_COMBINATOR_KEY, "and")]).unwrap();
    assert_eq!(and_operators.combinator(), Combinator::And);
    let expensive = products
        .search_by_pages_with_keys(&both, &and_operators, 1, 10, &[QueryOptions::new().order_by_desc("price")])
        .await
        .unwrap();
    let names: Vec<&str> = expensive.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["smartphone X", "headphones"]);

    // option predicates are AND-ed with the search group
    let count = products
        .count_with_keys(&keys, &operators, &[QueryOptions::new().filter("price", 19.0).limit(1)])
        .await
        .unwrap();
    assert_eq!(count, 1);
    assert_eq!(products.count().await.unwrap(), 5);
}

#[tokio::test]
async fn test_search_pages() {
    let db = setup().await;
    let products = db.store::<Product>();
    seed_products(&products, 25).await;

    let keys = predicates([("name", "product-1")]);
    let operators = SearchOperators::new();
    let page = products
        .search_by_pages_with_keys(&keys, &operators, 2, 4, &[QueryOptions::new().order_by("stock")])
        .await
        .unwrap();
    let stocks: Vec<i64> = page.iter().map(|p| p.stock).collect();
    assert_eq!(stocks, vec![14, 15, 16, 17]);
    assert_eq!(products.count_with_keys(&keys, &operators, &[]).await.unwrap(), 10);

    // substring match on a numeric column compares its text form
    let digits = predicates([("stock", 2i64)]);
    let matched = products
        .search_by_pages_with_keys(&digits, &operators, 1, 25, &[QueryOptions::new().order_by("stock")])
        .await
        .unwrap();
    let stocks: Vec<i64> = matched.iter().map(|p| p.stock).collect();
    assert_eq!(stocks, vec![2, 12, 20, 21, 22, 23, 24, 25]);
    assert_eq!(products.count_with_keys(&predicates([("id", 25i64)]), &operators, &[]).await.unwrap(), 1);
}

#[tokio::test]
async fn test_updates_and_deletes() {
    let db = setup().await;
    let products = db.store::<Product>();
    let created = seed_products(&products, 3).await;
    let id = created[0].id.unwrap();

    let patch = Product {
        stock: 42,
        ..Product::default()
    };
    assert_eq!(products.update_patch(&patch, id).await.unwrap(), 1);
    let updated = products.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(updated.stock, 42);
    assert_eq!(updated.name, "product-01");
    assert_eq!(updated.price, 10.0);

    let rename = Product {
        name: "product-two".to_string(),
        ..Product::default()
    };
    assert_eq!(products.update(&rename, "name", "product-02").await.unwrap(), 1);
    assert_eq!(products.find_by_keys(&predicates([("name", "product-two")])).await.unwrap().len(), 1);

    assert_eq!(products.update(&rename, "name", "missing").await.unwrap(), 0);
    assert_eq!(products.update_patch(&patch, id + 1000).await.unwrap(), 0);
    assert_eq!(products.delete("name", "missing").await.unwrap(), 0);

    assert_eq!(products.delete("id", id).await.unwrap(), 1);
    assert_eq!(products.find_by_id(id).await.unwrap(), None);
    assert_eq!(products.count().await.unwrap(), 2);

    assert_eq!(
        products.update(&Product::default(), "id", id).await,
        Err(StoreError::EmptyUpdate { entity: "products" })
    );
}

#[tokio::test]
async fn test_unknown_fields_are_rejected() {
    let db = setup().await;
    let products = db.store::<Product>();
    let item = product("phone", 10.0, 1);

    for result in [
        products.update(&item, "colour", "red").await.map(|_| ()),
        products.delete("colour", "red").await.map(|_| ()),
        products.find_by_keys(&predicates([("colour", "red")])).await.map(|_| ()),
        products.find_all(&[QueryOptions::new().order_by("colour")]).await.map(|_| ()),
        products
            .count_with_keys(&predicates([("colour", "red")]), &SearchOperators::new(), &[])
            .await
            .map(|_| ()),
        products.update_sql_vals(&item, &["colour"]).map(|_| ()),
    ] {
        assert!(matches!(result, Err(StoreError::FieldNotFound { .. })));
    }
}

#[tokio::test]
async fn test_create_omit_columns_leaves_defaults() {
    let db = setup().await;
    let products = db.store::<Product>();

    let mut item = product("phone", 799.0, 3);
    products.create_omit_columns(&mut item, &["price"]).await.unwrap();
    let id = item.id.unwrap();

    let row = db
        .pool()
        .fetch_optional("SELECT price, create_time FROM products WHERE id = ?", &[id.into()])
        .await
        .unwrap()
        .unwrap();
    assert!(row.get_by_name("price").unwrap().unwrap().is_null());
    assert!(!row.get_by_name("create_time").unwrap().unwrap().is_null());

    let stored = products.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(stored.price, 0.0);
    assert_eq!(stored.stock, 3);
}

#[tokio::test]
async fn test_redemption_defaults_to_not_replenished() {
    let db = setup().await;
    let redemptions = db.store::<PointRedemption>();

    let mut redemption = PointRedemption {
        customer_id: Some(1),
        outlet_id: Some(2),
        product_id: Some(3),
        redemption_date: Some(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()),
        ..PointRedemption::default()
    };
    redemptions.create_omit_columns(&mut redemption, &["replenished"]).await.unwrap();

    let open = redemptions
        .find_by_keys(&predicates([("replenished", false)]))
        .await
        .unwrap();
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].outlet_id, Some(2));

    let restocked = PointRedemption {
        replenished: true,
        ..PointRedemption::default()
    };
    assert_eq!(redemptions.update_patch(&restocked, redemption.id.unwrap()).await.unwrap(), 1);
    assert!(redemptions.find_by_keys(&predicates([("replenished", false)])).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_sql_string_is_not_executed() {
    let db = setup().await;
    let purchases = db.store::<Purchase>();

    let purchase = Purchase {
        id: Some(5),
        customer_id: Some(9),
        product_id: None,
        purchase_date: Some(Utc.with_ymd_and_hms(2024, 2, 29, 18, 45, 0).unwrap()),
        quantity: 2,
    };
    let sql = purchases
        .update_sql_string(
            &purchase,
            &["customer_id", "product_id", "purchase_date", "quantity"],
            Purchase::table_name(),
            "id",
            &DatabaseValue::Int64(5),
        )
        .unwrap();
    assert_eq!(
        sql,
        "UPDATE purchases SET customer_id = 9, purchase_date = '2024-02-29 18:45:00', quantity = 2 WHERE id = 5"
    );
    assert_eq!(purchases.count().await.unwrap(), 0);

    let empty = Purchase::default();
    assert_eq!(
        purchases.update_sql_vals(&empty, &["customer_id", "quantity"]),
        Err(StoreError::EmptyUpdate { entity: "purchases" })
    );
}

#[tokio::test]
async fn test_migrate_is_idempotent_and_close_ends_the_pool() {
    let db = setup().await;
    schema::migrate(&db).await.unwrap();

    db.close().await.unwrap();
    assert!(matches!(
        db.store::<Outlet>().count().await,
        Err(StoreError::Query(_))
    ));
}
